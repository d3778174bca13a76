//! Consistent statement reads
//!
//! A statement combines the account's balance with its latest ledger entries.
//! Both are read while holding the account's commit gate in shared mode, so no
//! commit can land between the two reads.

use crate::core::config::EngineConfig;
use crate::core::gates::{lock_read, CommitGates};
use crate::core::traits::{AccountStore, TransactionLedger};
use crate::types::{AccountId, LedgerError, Statement};
use chrono::Utc;
use std::sync::Arc;

/// Builds statements from the account store and the ledger
#[derive(Debug)]
pub struct StatementService<A, L> {
    accounts: Arc<A>,
    ledger: Arc<L>,
    gates: Arc<CommitGates>,
    window: usize,
}

impl<A: AccountStore, L: TransactionLedger> StatementService<A, L> {
    pub fn new(
        accounts: Arc<A>,
        ledger: Arc<L>,
        gates: Arc<CommitGates>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            accounts,
            ledger,
            gates,
            window: config.statement_window,
        }
    }

    /// Current balance and latest entries of an account, as of one instant
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the account was never provisioned
    /// - any store error, propagated unchanged
    pub fn statement(&self, account_id: AccountId) -> Result<Statement, LedgerError> {
        // Resolve first so unknown ids never allocate a gate.
        self.accounts.get(account_id)?;

        let gate = self.gates.gate(account_id);
        let _read = lock_read(&gate)?;

        let account = self.accounts.get(account_id)?;
        let recent_transactions = self.ledger.recent(account_id, self.window)?;

        Ok(Statement {
            account_id,
            balance: account.balance,
            limit: account.limit,
            snapshot_at: Utc::now(),
            recent_transactions,
        })
    }
}
