//! Error types for the account ledger
//!
//! This module defines every error the engine and its I/O surfaces can produce.
//!
//! # Error Categories
//!
//! - **Rejections**: validation failures, unknown accounts, insufficient limit and
//!   contention. Expected outcomes; the stores are left untouched.
//! - **Store outcomes**: `Conflict` and `LimitExceeded` are returned by an
//!   [`AccountStore`](crate::core::AccountStore) and translated by the processor.
//! - **Provisioning errors**: duplicate or malformed accounts.
//! - **System faults**: storage, file I/O and CSV parsing failures.

use super::account::AccountId;
use thiserror::Error;

/// Main error type for the account ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Malformed submission, rejected before any store is touched
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// No provisioned account has this id
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The requested account id
        account: AccountId,
    },

    /// A debit would take the balance below `-limit`
    ///
    /// This is an expected business outcome, not a fault.
    #[error(
        "Insufficient limit for account {account}: balance {balance}, limit {limit}, requested {requested}"
    )]
    InsufficientLimit {
        /// Account id
        account: AccountId,
        /// Balance observed when the debit was attempted
        balance: i64,
        /// The account's limit
        limit: i64,
        /// Requested debit amount
        requested: i64,
    },

    /// Concurrent writers kept invalidating the update past the retry budget
    #[error("Account {account} is contended: gave up after {attempts} attempts")]
    Contention {
        /// Account id
        account: AccountId,
        /// Attempts made before giving up
        attempts: u32,
    },

    /// The stored balance no longer matches the expected prior balance
    #[error("Balance conflict on account {account}: expected {expected}, found {actual}")]
    Conflict {
        /// Account id
        account: AccountId,
        /// Balance the caller based its update on
        expected: i64,
        /// Balance actually stored
        actual: i64,
    },

    /// Applying the delta would violate the account floor
    #[error("Limit exceeded on account {account}: resulting balance {balance} below -{limit}")]
    LimitExceeded {
        /// Account id
        account: AccountId,
        /// Balance the update would have produced
        balance: i64,
        /// The account's limit
        limit: i64,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account id
        account: AccountId,
    },

    /// Provisioning an id that already exists
    #[error("Account {account} already exists")]
    DuplicateAccount {
        /// Account id
        account: AccountId,
    },

    /// Provisioning an account whose state breaks the account invariants
    #[error("Invalid account {account}: {message}")]
    InvalidAccount {
        /// Account id
        account: AccountId,
        /// What is wrong with it
        message: String,
    },

    /// Failure in the underlying storage
    ///
    /// Propagated to the caller, never retried by the engine.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the failure
        message: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for LedgerError {
    fn from(error: csv_async::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(error: serde_json::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create a Validation error
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        LedgerError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: AccountId) -> Self {
        LedgerError::AccountNotFound { account }
    }

    /// Create an InsufficientLimit error
    pub fn insufficient_limit(account: AccountId, balance: i64, limit: i64, requested: i64) -> Self {
        LedgerError::InsufficientLimit {
            account,
            balance,
            limit,
            requested,
        }
    }

    /// Create a Contention error
    pub fn contention(account: AccountId, attempts: u32) -> Self {
        LedgerError::Contention { account, attempts }
    }

    /// Create a Conflict error
    pub fn conflict(account: AccountId, expected: i64, actual: i64) -> Self {
        LedgerError::Conflict {
            account,
            expected,
            actual,
        }
    }

    /// Create a LimitExceeded error
    pub fn limit_exceeded(account: AccountId, balance: i64, limit: i64) -> Self {
        LedgerError::LimitExceeded {
            account,
            balance,
            limit,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: AccountId) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(account: AccountId) -> Self {
        LedgerError::DuplicateAccount { account }
    }

    /// Create an InvalidAccount error
    pub fn invalid_account(account: AccountId, message: impl Into<String>) -> Self {
        LedgerError::InvalidAccount {
            account,
            message: message.into(),
        }
    }

    /// Create a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        LedgerError::Storage {
            message: message.into(),
        }
    }

    /// Whether this error is an expected rejection of the caller's request
    ///
    /// Rejections leave every store exactly as it was; anything else is a
    /// system fault.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LedgerError::Validation { .. }
                | LedgerError::AccountNotFound { .. }
                | LedgerError::InsufficientLimit { .. }
                | LedgerError::Contention { .. }
                | LedgerError::ArithmeticOverflow { .. }
        )
    }
}
