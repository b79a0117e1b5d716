use chrono::Utc;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::transaction::{TransactionId, MAX_SAFE_ID};

/// Width of the random component mixed into each timestamp.
///
/// `millis * RANDOM_SPAN` stays below [`MAX_SAFE_ID`] for the foreseeable
/// future, so ids remain exact in any JSON reader.
const RANDOM_SPAN: u64 = 1_000;

/// Issues timestamp-plus-random identifiers that never repeat or go backwards
/// within one generator.
///
/// Two generators in different processes can still collide if they draw the
/// same random component in the same millisecond.
#[derive(Debug)]
pub struct IdGenerator {
    last: u64,
    rng: StdRng,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::starting_after(TransactionId(0))
    }

    /// Generator whose ids are all greater than `floor`.
    pub fn starting_after(floor: TransactionId) -> Self {
        Self {
            last: floor.0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Next id, or `None` once no id above the last one fits under [`MAX_SAFE_ID`].
    pub fn next_id(&mut self) -> Option<TransactionId> {
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let candidate = millis
            .checked_mul(RANDOM_SPAN)
            .and_then(|base| base.checked_add(self.rng.gen_range(0..RANDOM_SPAN)))
            .filter(|candidate| *candidate > self.last && *candidate <= MAX_SAFE_ID);
        let id = match candidate {
            Some(id) => id,
            None => self.last.checked_add(1).filter(|id| *id <= MAX_SAFE_ID)?,
        };
        self.last = id;
        Some(TransactionId(id))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
