use thiserror::Error;

/// Input rejected before any state change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a description for the transaction.")]
    EmptyDescription,
    #[error("Please enter a valid positive amount (got `{0}`).")]
    InvalidAmount(String),
}

/// Failures raised by a key-value store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage quota exceeded for `{key}`: {needed} bytes, quota {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Error type returned by every ledger mutator.
///
/// `Persistence` is reported after the in-memory mutation has already been
/// applied; the ledger keeps the new state.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to persist ledger: {0}")]
    Persistence(#[from] StoreError),
    #[error("No transaction ids left below the safe integer limit")]
    IdsExhausted,
}

impl LedgerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }
}
