//! Core traits for account storage and the transaction ledger
//!
//! The processor and the statement service are written against these traits so
//! that the physical storage stays an external collaborator. Both traits take
//! `&self`: implementations are shared between threads and synchronize
//! internally.

use crate::types::{Account, AccountId, LedgerError, Transaction};

/// Owns durable account state
///
/// The store is the sole writer of `balance`. Every other component reads it
/// through [`AccountStore::get`].
pub trait AccountStore: Send + Sync {
    /// Current state of an account
    ///
    /// Fails with `AccountNotFound` if the id was never provisioned.
    fn get(&self, id: AccountId) -> Result<Account, LedgerError>;

    /// Atomically move the balance from `expected_prior_balance` by `delta`
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the id was never provisioned
    /// - `Conflict` if the stored balance is no longer `expected_prior_balance`
    /// - `ArithmeticOverflow` if the new balance does not fit
    /// - `LimitExceeded` if the new balance would be below `-limit`
    fn apply_delta(
        &self,
        id: AccountId,
        delta: i64,
        expected_prior_balance: i64,
    ) -> Result<Account, LedgerError>;

    /// Register a new account
    fn provision(&self, account: Account) -> Result<(), LedgerError>;

    /// All provisioned accounts, sorted by id
    fn accounts(&self) -> Result<Vec<Account>, LedgerError>;
}

/// Append-only store of ledger entries per account
pub trait TransactionLedger: Send + Sync {
    /// Add one immutable entry at the end of the account's log
    fn append(&self, account_id: AccountId, transaction: Transaction) -> Result<(), LedgerError>;

    /// Up to `n` most recently appended entries, newest first
    ///
    /// An account without entries yields an empty vector, not an error.
    fn recent(&self, account_id: AccountId, n: usize) -> Result<Vec<Transaction>, LedgerError>;
}
