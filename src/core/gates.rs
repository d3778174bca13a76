//! Per-account commit gates
//!
//! A commit (balance update plus ledger append) holds its account's gate
//! exclusively; a statement read holds it shared. A reader therefore never sees
//! a balance without its ledger entry or the other way round.
//!
//! Gates are created on first use. The `Arc` is cloned out of the map before
//! locking, so a thread waiting on one account's gate never holds a `DashMap`
//! shard and never blocks work on other accounts.

use crate::types::{AccountId, LedgerError};
use dashmap::DashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Lazily created reader/writer gate per account
#[derive(Debug, Default)]
pub struct CommitGates {
    gates: DashMap<AccountId, Arc<RwLock<()>>>,
}

impl CommitGates {
    pub fn new() -> Self {
        Self {
            gates: DashMap::new(),
        }
    }

    /// The gate guarding `account_id`, created if needed
    ///
    /// Callers should only ask for gates of accounts they have already resolved,
    /// so unknown ids never allocate one.
    pub fn gate(&self, account_id: AccountId) -> Arc<RwLock<()>> {
        Arc::clone(self.gates.entry(account_id).or_default().value())
    }

    /// Number of gates allocated so far
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

/// Take a gate exclusively, for a commit
pub fn lock_commit(gate: &RwLock<()>) -> Result<RwLockWriteGuard<'_, ()>, LedgerError> {
    gate.write()
        .map_err(|_| LedgerError::storage("commit gate poisoned"))
}

/// Take a gate shared, for a consistent read
pub fn lock_read(gate: &RwLock<()>) -> Result<RwLockReadGuard<'_, ()>, LedgerError> {
    gate.read()
        .map_err(|_| LedgerError::storage("commit gate poisoned"))
}
