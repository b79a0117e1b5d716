use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionKind};

/// Aggregate totals over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub balance: f64,
    pub total_income: f64,
    pub total_expense: f64,
}

impl Summary {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut total_income = 0.0;
        let mut total_expense = 0.0;
        for txn in transactions {
            match txn.kind {
                TransactionKind::Credit => total_income += txn.amount,
                TransactionKind::Debit => total_expense += txn.amount,
            }
        }
        Self {
            balance: total_income - total_expense,
            total_income,
            total_expense,
        }
    }
}
