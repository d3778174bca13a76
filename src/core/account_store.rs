//! Thread-safe in-memory account store
//!
//! This module provides the `InMemoryAccountStore`, which keeps account state in
//! a `DashMap` so that different accounts are read and updated without a global
//! lock, while every update to a single account is serialized by the map entry.
//!
//! # Conditional Update
//!
//! `apply_delta` is a compare-and-set: the caller passes the balance it observed
//! and the update only happens if that is still the stored balance. The check,
//! the limit test and the write all run while holding the entry, so no other
//! writer can slip in between them.

use crate::core::traits::AccountStore;
use crate::types::{Account, AccountId, LedgerError};
use dashmap::DashMap;

/// In-memory implementation of [`AccountStore`]
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    /// Account state by id
    ///
    /// DashMap shards its locks, so operations on different accounts proceed
    /// in parallel.
    accounts: DashMap<AccountId, Account>,
}

impl InMemoryAccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Create a store holding `accounts`
    ///
    /// # Errors
    ///
    /// Fails on the first account that cannot be provisioned.
    pub fn with_accounts(
        accounts: impl IntoIterator<Item = Account>,
    ) -> Result<Self, LedgerError> {
        let store = Self::new();
        for account in accounts {
            store.provision(account)?;
        }
        Ok(store)
    }

    /// Number of provisioned accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.accounts
            .get(&id)
            .map(|entry| *entry.value())
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    fn apply_delta(
        &self,
        id: AccountId,
        delta: i64,
        expected_prior_balance: i64,
    ) -> Result<Account, LedgerError> {
        let mut entry = self
            .accounts
            .get_mut(&id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;
        let account = entry.value_mut();

        // Conflict before limit: a stale read is retried, never rejected.
        if account.balance != expected_prior_balance {
            return Err(LedgerError::conflict(
                id,
                expected_prior_balance,
                account.balance,
            ));
        }

        let new_balance = expected_prior_balance
            .checked_add(delta)
            .ok_or_else(|| LedgerError::arithmetic_overflow("apply_delta", id))?;

        if !account.admits(new_balance) {
            return Err(LedgerError::limit_exceeded(id, new_balance, account.limit));
        }

        account.balance = new_balance;
        Ok(*account)
    }

    fn provision(&self, account: Account) -> Result<(), LedgerError> {
        if account.limit < 0 {
            return Err(LedgerError::invalid_account(
                account.id,
                format!("limit must not be negative, got {}", account.limit),
            ));
        }
        if !account.admits(account.balance) {
            return Err(LedgerError::invalid_account(
                account.id,
                format!(
                    "opening balance {} is below -{}",
                    account.balance, account.limit
                ),
            ));
        }

        let mut inserted = false;
        self.accounts.entry(account.id).or_insert_with(|| {
            inserted = true;
            account
        });

        if inserted {
            Ok(())
        } else {
            Err(LedgerError::duplicate_account(account.id))
        }
    }

    fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| *entry.value())
            .collect();
        accounts.sort_by_key(|account| account.id);
        Ok(accounts)
    }
}
