use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    config::{Config, DEFAULT_STORE_KEY},
    errors::LedgerError,
    storage::{JsonFileStore, MemoryStore, StorageBackend},
};

use super::{
    id::IdGenerator,
    summary::Summary,
    transaction::{
        parse_amount, validate_amount, validate_text, Transaction, TransactionId, TransactionKind,
    },
};

/// What `Ledger::initialize` found in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Stored value parsed; holds the number of records kept.
    Loaded(usize),
    /// Nothing stored under the key yet.
    Missing,
    /// Stored value could not be parsed.
    Corrupt(String),
    /// The store could not be read.
    Unavailable(String),
}

impl LoadStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, LoadStatus::Corrupt(_) | LoadStatus::Unavailable(_))
    }
}

/// Insertion-ordered set of transactions, written through to a store on every mutation.
pub struct Ledger {
    transactions: Vec<Transaction>,
    store: Box<dyn StorageBackend>,
    key: String,
    ids: IdGenerator,
    load_status: LoadStatus,
}

impl Ledger {
    /// Loads the ledger stored under `key`.
    ///
    /// Never fails: a missing, unreadable or malformed value yields an empty
    /// ledger, and the outcome is kept in [`Ledger::load_status`].
    pub fn initialize(store: Box<dyn StorageBackend>, key: impl Into<String>) -> Self {
        let key = key.into();
        let (transactions, load_status) = match store.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Value>>(&raw) {
                Ok(records) => {
                    let kept = retain_well_formed(records);
                    let count = kept.len();
                    (kept, LoadStatus::Loaded(count))
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "stored ledger is malformed; starting empty");
                    (Vec::new(), LoadStatus::Corrupt(err.to_string()))
                }
            },
            Ok(None) => (Vec::new(), LoadStatus::Missing),
            Err(err) => {
                warn!(key = %key, error = %err, "ledger store unreadable; starting empty");
                (Vec::new(), LoadStatus::Unavailable(err.to_string()))
            }
        };

        let floor = transactions
            .iter()
            .map(|txn| txn.id)
            .max()
            .unwrap_or(TransactionId(0));
        info!(key = %key, count = transactions.len(), "ledger initialized");
        Self {
            transactions,
            store,
            key,
            ids: IdGenerator::starting_after(floor),
            load_status,
        }
    }

    /// Ledger over a fresh in-process store; nothing survives the process.
    pub fn in_memory() -> Self {
        Self::initialize(Box::new(MemoryStore::new()), DEFAULT_STORE_KEY)
    }

    /// Opens the ledger described by `config`, falling back to in-memory mode
    /// when the data directory cannot be prepared.
    pub fn open(config: &Config) -> Self {
        let dir = config.data_dir();
        let store: Box<dyn StorageBackend> = match JsonFileStore::new(&dir) {
            Ok(store) => Box::new(store),
            Err(err) => {
                warn!(
                    dir = %dir.display(),
                    error = %err,
                    "data directory unavailable; ledger will not be durable"
                );
                Box::new(MemoryStore::new())
            }
        };
        Self::initialize(store, config.store_key.clone())
    }

    /// Validates and appends a new transaction, then persists.
    pub fn add(
        &mut self,
        text: &str,
        amount: f64,
        kind: TransactionKind,
    ) -> Result<Transaction, LedgerError> {
        let text = validate_text(text)?;
        let amount = validate_amount(amount)?;
        let id = self.ids.next_id().ok_or_else(|| {
            warn!(key = %self.key, "transaction id space exhausted");
            LedgerError::IdsExhausted
        })?;
        let txn = Transaction::new(id, &text, amount, kind)?;
        self.transactions.push(txn.clone());
        debug!(id = %txn.id, amount = txn.amount, kind = ?txn.kind, "transaction added");
        self.persist()?;
        Ok(txn)
    }

    /// Like [`Ledger::add`], taking the amount as entered by the user.
    pub fn add_input(
        &mut self,
        text: &str,
        raw_amount: &str,
        kind: TransactionKind,
    ) -> Result<Transaction, LedgerError> {
        let amount = parse_amount(raw_amount)?;
        self.add(text, amount, kind)
    }

    /// Removes the transaction with `id`, returning whether one was removed.
    pub fn delete(&mut self, id: TransactionId) -> Result<bool, LedgerError> {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.id != id);
        let removed = self.transactions.len() != before;
        debug!(id = %id, removed, "transaction delete");
        self.persist()?;
        Ok(removed)
    }

    /// Removes every transaction and returns how many were removed.
    ///
    /// Callers are expected to have obtained the user's confirmation.
    pub fn clear_all(&mut self) -> Result<usize, LedgerError> {
        if self.transactions.is_empty() {
            return Ok(0);
        }
        let removed = self.transactions.len();
        self.transactions.clear();
        debug!(removed, "ledger cleared");
        self.persist()?;
        Ok(removed)
    }

    pub fn summary(&self) -> Summary {
        Summary::from_transactions(&self.transactions)
    }

    /// Most recently added first.
    pub fn list_descending(&self) -> Vec<&Transaction> {
        self.transactions.iter().rev().collect()
    }

    /// Writes the full sequence to the store, replacing the previous value.
    ///
    /// On failure the in-memory state is left as is.
    pub fn persist(&self) -> Result<(), LedgerError> {
        let json = serde_json::to_string(&self.transactions).map_err(|err| {
            warn!(key = %self.key, error = %err, "ledger serialization failed");
            LedgerError::Persistence(err.into())
        })?;
        self.store.set(&self.key, &json).map_err(|err| {
            warn!(key = %self.key, error = %err, "ledger persistence failed; continuing in memory");
            LedgerError::Persistence(err)
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn store_key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.store.as_ref()
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("key", &self.key)
            .field("transactions", &self.transactions)
            .field("load_status", &self.load_status)
            .finish_non_exhaustive()
    }
}

/// Decodes stored records one by one, dropping any that fail to decode or
/// break the ledger invariants, and keeping the first of any duplicate id.
fn retain_well_formed(records: Vec<Value>) -> Vec<Transaction> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Transaction>(record) {
            Ok(txn) => Some(txn),
            Err(err) => {
                warn!(index, error = %err, "dropping undecodable stored transaction");
                None
            }
        })
        .filter(|txn| {
            if !txn.is_well_formed() {
                warn!(id = %txn.id, "dropping invalid stored transaction");
                return false;
            }
            if !seen.insert(txn.id) {
                warn!(id = %txn.id, "dropping duplicate stored transaction");
                return false;
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{StoreError, ValidationError};
    use crate::storage::Result as StoreResult;

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl StorageBackend for ReadOnlyStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Unavailable("read-only".into()))
        }

        fn remove(&self, _key: &str) -> StoreResult<()> {
            Ok(())
        }
    }

    #[test]
    fn add_appends_and_returns_record() {
        let mut ledger = Ledger::in_memory();
        let txn = ledger
            .add("Salary", 100.0, TransactionKind::Credit)
            .expect("valid transaction");
        assert_eq!(ledger.len(), 1);
        assert_eq!(txn.text, "Salary");
        assert_eq!(txn.amount, 100.0);
        assert_eq!(ledger.get(txn.id), Some(&txn));
    }

    #[test]
    fn add_rejects_invalid_input_without_mutation() {
        let mut ledger = Ledger::in_memory();
        for text in ["", "   "] {
            let err = ledger
                .add(text, 10.0, TransactionKind::Debit)
                .expect_err("blank text");
            assert!(matches!(
                err,
                LedgerError::Validation(ValidationError::EmptyDescription)
            ));
        }
        for amount in [0.0, -5.0] {
            let err = ledger
                .add("Coffee", amount, TransactionKind::Debit)
                .expect_err("non-positive amount");
            assert!(matches!(
                err,
                LedgerError::Validation(ValidationError::InvalidAmount(_))
            ));
        }
        let err = ledger
            .add_input("Coffee", "twelve", TransactionKind::Debit)
            .expect_err("non-numeric amount");
        assert!(err.is_validation());
        assert!(ledger.is_empty());
        assert_eq!(ledger.storage().get(DEFAULT_STORE_KEY).unwrap(), None);
    }

    #[test]
    fn delete_reports_whether_anything_was_removed() {
        let mut ledger = Ledger::in_memory();
        let a = ledger.add("A", 1.0, TransactionKind::Credit).unwrap();
        let b = ledger.add("B", 2.0, TransactionKind::Debit).unwrap();
        let c = ledger.add("C", 3.0, TransactionKind::Credit).unwrap();

        assert!(ledger.delete(b.id).unwrap());
        assert!(ledger.get(b.id).is_none());
        assert_eq!(ledger.transactions(), &[a.clone(), c.clone()]);

        assert!(!ledger.delete(b.id).unwrap());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn delete_of_absent_id_still_writes() {
        let mut ledger = Ledger::initialize(Box::new(ReadOnlyStore), "transactions");
        let err = ledger
            .delete(TransactionId(999))
            .expect_err("write attempted against read-only store");
        assert!(matches!(err, LedgerError::Persistence(_)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn exhausted_ids_reject_add_without_mutation() {
        let store = MemoryStore::new().with_value(
            "transactions",
            &format!(
                r#"[{{"id": {}, "text": "last", "amount": 1, "type": "credit"}}]"#,
                crate::ledger::transaction::MAX_SAFE_ID
            ),
        );
        let mut ledger = Ledger::initialize(Box::new(store), "transactions");
        assert_eq!(ledger.len(), 1);
        let err = ledger
            .add("one more", 1.0, TransactionKind::Debit)
            .expect_err("no ids left");
        assert!(matches!(err, LedgerError::IdsExhausted));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn clear_all_on_empty_ledger_skips_the_write() {
        let mut ledger = Ledger::initialize(Box::new(ReadOnlyStore), "transactions");
        assert_eq!(ledger.clear_all().unwrap(), 0);
    }

    #[test]
    fn summary_matches_worked_example() {
        let mut ledger = Ledger::in_memory();
        ledger.add("Pay", 100.0, TransactionKind::Credit).unwrap();
        ledger.add("Food", 30.0, TransactionKind::Debit).unwrap();
        ledger.add("Refund", 5.0, TransactionKind::Credit).unwrap();
        let summary = ledger.summary();
        assert_eq!(summary.total_income, 105.0);
        assert_eq!(summary.total_expense, 30.0);
        assert_eq!(summary.balance, 75.0);
    }

    #[test]
    fn persistence_failure_keeps_in_memory_mutation() {
        let mut ledger = Ledger::initialize(Box::new(ReadOnlyStore), "transactions");
        let err = ledger
            .add("Rent", 900.0, TransactionKind::Debit)
            .expect_err("store rejects writes");
        assert!(matches!(err, LedgerError::Persistence(_)));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.list_descending()[0].text, "Rent");
    }

    #[test]
    fn unreadable_store_is_reported_as_degraded() {
        struct BrokenStore;
        impl StorageBackend for BrokenStore {
            fn get(&self, _key: &str) -> StoreResult<Option<String>> {
                Err(StoreError::Unavailable("disk gone".into()))
            }
            fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
                Ok(())
            }
            fn remove(&self, _key: &str) -> StoreResult<()> {
                Ok(())
            }
        }

        let ledger = Ledger::initialize(Box::new(BrokenStore), "transactions");
        assert!(ledger.is_empty());
        assert!(ledger.load_status().is_degraded());
    }
}
