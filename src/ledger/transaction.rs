use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Largest id a JSON reader using doubles can represent exactly (2^53 - 1).
pub const MAX_SAFE_ID: u64 = (1 << 53) - 1;

/// Identifier assigned by the ledger when a transaction is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub u64);

impl TransactionId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Income; increases the balance.
    Credit,
    /// Expense; decreases the balance.
    Debit,
}

impl TransactionKind {
    pub fn sign(self) -> f64 {
        match self {
            TransactionKind::Credit => 1.0,
            TransactionKind::Debit => -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub text: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    /// Validates the inputs and builds a record with the given id.
    pub fn new(
        id: TransactionId,
        text: &str,
        amount: f64,
        kind: TransactionKind,
    ) -> Result<Self, ValidationError> {
        let text = validate_text(text)?;
        let amount = validate_amount(amount)?;
        Ok(Self {
            id,
            text,
            amount,
            kind,
        })
    }

    pub fn is_credit(&self) -> bool {
        self.kind == TransactionKind::Credit
    }

    /// Amount with the kind's sign applied.
    pub fn signed_amount(&self) -> f64 {
        self.kind.sign() * self.amount
    }

    /// Whether a record read back from storage still satisfies the ledger invariants.
    pub(crate) fn is_well_formed(&self) -> bool {
        self.id.0 <= MAX_SAFE_ID
            && !self.text.trim().is_empty()
            && self.amount.is_finite()
            && self.amount > 0.0
    }
}

pub fn validate_text(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}

pub fn validate_amount(amount: f64) -> Result<f64, ValidationError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::InvalidAmount(amount.to_string()));
    }
    Ok(amount)
}

/// Parses a user-entered amount such as `" 250.75 "`.
pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;
    validate_amount(amount).map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))
}
