//! Account-related types for the account ledger
//!
//! This module defines the Account structure and the identifier used to
//! address it from every other component.

use serde::{Deserialize, Serialize};

/// Account identifier
///
/// Opaque to the engine; assigned by whoever provisions the account.
pub type AccountId = u32;

/// Durable account state
///
/// An account is provisioned once (outside the engine) and afterwards only its
/// balance changes, and only through the transaction processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The account identifier
    pub id: AccountId,

    /// Maximum overdraft magnitude
    ///
    /// The balance may go down to `-limit` and no further. Never negative.
    pub limit: i64,

    /// Current signed balance
    ///
    /// Invariant: `balance >= -limit`.
    pub balance: i64,
}

impl Account {
    /// Create a new account with a zero balance
    ///
    /// # Arguments
    ///
    /// * `id` - The account identifier
    /// * `limit` - The overdraft limit for this account
    pub fn new(id: AccountId, limit: i64) -> Self {
        Self::with_balance(id, limit, 0)
    }

    /// Create an account with an opening balance
    pub fn with_balance(id: AccountId, limit: i64, balance: i64) -> Self {
        Account { id, limit, balance }
    }

    /// The lowest balance this account may hold
    pub fn floor(&self) -> i64 {
        -self.limit
    }

    /// Whether `balance` respects this account's limit (the floor is inclusive)
    pub fn admits(&self, balance: i64) -> bool {
        balance >= self.floor()
    }
}
