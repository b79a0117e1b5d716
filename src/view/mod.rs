//! Display-ready projection of a ledger for the UI layer.

use serde::Serialize;

use crate::{
    currency::{format_amount, format_signed, CurrencyFormat},
    ledger::{Ledger, Transaction, TransactionId},
};

pub const EMPTY_TITLE: &str = "No transactions yet.";
pub const EMPTY_HINT: &str = "Add your first transaction to get started!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub id: TransactionId,
    /// HTML-escaped description.
    pub text: String,
    /// Formatted amount with explicit sign, e.g. `+₹100.00`.
    pub amount: String,
    pub tone: Tone,
}

impl TransactionRow {
    pub fn from_transaction(txn: &Transaction, format: &CurrencyFormat) -> Self {
        let credit = txn.is_credit();
        Self {
            id: txn.id,
            text: escape_html(&txn.text),
            amount: format_signed(txn.amount, credit, format),
            tone: if credit { Tone::Positive } else { Tone::Negative },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerView {
    pub balance: String,
    pub total_income: String,
    pub total_expense: String,
    /// Newest first.
    pub rows: Vec<TransactionRow>,
    pub show_clear_all: bool,
}

impl LedgerView {
    pub fn build(ledger: &Ledger, format: &CurrencyFormat) -> Self {
        let summary = ledger.summary();
        let rows = ledger
            .list_descending()
            .into_iter()
            .map(|txn| TransactionRow::from_transaction(txn, format))
            .collect();
        Self {
            balance: format_amount(summary.balance, format),
            total_income: format_amount(summary.total_income, format),
            total_expense: format_amount(summary.total_expense, format),
            rows,
            show_clear_all: !ledger.is_empty(),
        }
    }

    /// Empty-state message, present only when there are no rows.
    pub fn placeholder(&self) -> Option<(&'static str, &'static str)> {
        self.rows.is_empty().then_some((EMPTY_TITLE, EMPTY_HINT))
    }
}

/// Escapes text for safe interpolation into HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
