use pocket_ledger::{
    ledger::Ledger,
    storage::{JsonFileStore, StorageBackend},
};
use tempfile::TempDir;

pub const KEY: &str = "transactions";

/// Creates a file-backed store in a fresh temp directory.
///
/// The returned guard must outlive the store.
pub fn setup_store() -> (JsonFileStore, TempDir) {
    let temp = TempDir::new().expect("create temp dir");
    let store = JsonFileStore::new(temp.path().join("data")).expect("create json store");
    (store, temp)
}

/// Opens a ledger over a clone of `store`, as a restarted process would.
pub fn reopen(store: &JsonFileStore) -> Ledger {
    Ledger::initialize(Box::new(store.clone()), KEY)
}

#[allow(dead_code)]
pub fn raw_value(store: &JsonFileStore) -> Option<String> {
    store.get(KEY).expect("read store")
}
