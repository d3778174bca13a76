//! Read-side views returned by the engine

use super::account::AccountId;
use super::transaction::Transaction;
use chrono::{DateTime, Utc};

/// Result of a committed submission: the account's limit and new balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionOutcome {
    pub limit: i64,
    pub balance: i64,
}

/// Point-in-time view of an account and its latest ledger entries
///
/// Derived on every request, never stored. Balance and entries come from the
/// same consistent read, so every commit reflected in `balance` appears in
/// `recent_transactions` (window permitting) and vice versa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub account_id: AccountId,
    pub balance: i64,
    pub limit: i64,

    /// When the consistent read happened
    pub snapshot_at: DateTime<Utc>,

    /// Most recent entries, newest first
    pub recent_transactions: Vec<Transaction>,
}
