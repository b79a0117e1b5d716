//! Transaction ledger: records, identity, aggregation and the write-through ledger itself.

pub mod id;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod summary;
pub mod transaction;

pub use id::IdGenerator;
pub use ledger::{Ledger, LoadStatus};
pub use summary::Summary;
pub use transaction::{Transaction, TransactionId, TransactionKind};
