//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account state and identifiers
//! - `transaction`: Transaction kinds, requests and ledger entries
//! - `statement`: Read-side views (statement, submission outcome)
//! - `error`: Error types for the account ledger

pub mod account;
pub mod error;
pub mod statement;
pub mod transaction;

pub use account::{Account, AccountId};
pub use error::LedgerError;
pub use statement::{Statement, TransactionOutcome};
pub use transaction::{
    Transaction, TransactionKind, TransactionRequest, ValidatedTransaction,
    DESCRIPTION_MAX_CHARS,
};
