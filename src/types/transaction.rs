//! Transaction-related types for the account ledger
//!
//! This module defines the transaction kinds, the raw request a caller submits,
//! the validated form the processor works with, and the immutable ledger entry
//! that is appended once a submission commits.

use super::account::AccountId;
use super::error::LedgerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum description length, in characters
///
/// Matches what a statement line can display.
pub const DESCRIPTION_MAX_CHARS: usize = 10;

/// Direction of a transaction
///
/// Serialized with the single-letter codes used on the wire: `c` for credit
/// and `d` for debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Increases the balance
    #[serde(rename = "c")]
    Credit,

    /// Decreases the balance, bounded by the account limit
    #[serde(rename = "d")]
    Debit,
}

impl TransactionKind {
    /// Wire code for this kind
    pub fn code(self) -> &'static str {
        match self {
            TransactionKind::Credit => "c",
            TransactionKind::Debit => "d",
        }
    }

    /// Apply this kind's direction to a positive magnitude
    pub fn signed(self, amount: i64) -> i64 {
        match self {
            TransactionKind::Credit => amount,
            TransactionKind::Debit => -amount,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c" => Ok(TransactionKind::Credit),
            "d" => Ok(TransactionKind::Debit),
            other => Err(LedgerError::validation(
                "kind",
                format!("'{}' is not a transaction kind (expected 'c' or 'd')", other),
            )),
        }
    }
}

/// A transaction submission exactly as received from a caller
///
/// Nothing about it has been checked yet. The processor calls
/// [`TransactionRequest::validate`] before touching any store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    /// Requested magnitude; must be positive
    pub amount: i64,

    /// Requested kind code; must be `c` or `d`
    pub kind: String,

    /// Free text shown on the statement
    pub description: String,
}

impl TransactionRequest {
    /// Create a new request
    pub fn new(amount: i64, kind: impl Into<String>, description: impl Into<String>) -> Self {
        TransactionRequest {
            amount,
            kind: kind.into(),
            description: description.into(),
        }
    }

    /// Shorthand for a credit request
    pub fn credit(amount: i64, description: impl Into<String>) -> Self {
        Self::new(amount, TransactionKind::Credit.code(), description)
    }

    /// Shorthand for a debit request
    pub fn debit(amount: i64, description: impl Into<String>) -> Self {
        Self::new(amount, TransactionKind::Debit.code(), description)
    }

    /// Check the shape of the request
    ///
    /// # Returns
    ///
    /// * `Ok(ValidatedTransaction)` - If amount, kind and description are well-formed
    /// * `Err(LedgerError::Validation)` - Naming the first offending field
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is zero or negative
    /// - The kind is not `c` or `d`
    /// - The description is empty or longer than [`DESCRIPTION_MAX_CHARS`]
    pub fn validate(&self) -> Result<ValidatedTransaction, LedgerError> {
        if self.amount <= 0 {
            return Err(LedgerError::validation(
                "amount",
                format!("must be a positive integer, got {}", self.amount),
            ));
        }

        let kind = self.kind.parse::<TransactionKind>()?;

        let chars = self.description.chars().count();
        if chars == 0 {
            return Err(LedgerError::validation("description", "must not be empty"));
        }
        if chars > DESCRIPTION_MAX_CHARS {
            return Err(LedgerError::validation(
                "description",
                format!(
                    "must be at most {} characters, got {}",
                    DESCRIPTION_MAX_CHARS, chars
                ),
            ));
        }

        Ok(ValidatedTransaction {
            amount: self.amount,
            kind,
            description: self.description.clone(),
        })
    }
}

/// A request that passed shape validation
///
/// Only obtainable through [`TransactionRequest::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTransaction {
    amount: i64,
    kind: TransactionKind,
    description: String,
}

impl ValidatedTransaction {
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Balance change this transaction causes when committed
    pub fn signed_delta(&self) -> i64 {
        self.kind.signed(self.amount)
    }

    /// Build the ledger entry recorded when this transaction commits
    pub fn into_entry(self, account_id: AccountId, occurred_at: DateTime<Utc>) -> Transaction {
        Transaction {
            account_id,
            amount: self.amount,
            kind: self.kind,
            description: self.description,
            occurred_at,
        }
    }
}

/// Ledger entry
///
/// Created exactly once per committed submission and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// The account this entry belongs to
    pub account_id: AccountId,

    /// Positive magnitude; the direction is carried by `kind`
    pub amount: i64,

    /// Credit or debit
    pub kind: TransactionKind,

    /// Statement text
    pub description: String,

    /// Commit time, non-decreasing per account in commit order
    pub occurred_at: DateTime<Utc>,
}

impl Transaction {
    /// Balance change this entry represents
    pub fn signed_amount(&self) -> i64 {
        self.kind.signed(self.amount)
    }
}
