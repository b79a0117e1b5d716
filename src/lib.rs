#![doc(test(attr(deny(warnings))))]

//! Pocket Ledger is a local personal-finance ledger: it records income and
//! expense entries, writes them through to a durable key-value store, and
//! derives the running balance.

pub mod config;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;
pub mod view;

pub use errors::{LedgerError, StoreError, ValidationError};
pub use ledger::{Ledger, Summary, Transaction, TransactionId, TransactionKind};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Pocket Ledger tracing initialized.");
    });
}
