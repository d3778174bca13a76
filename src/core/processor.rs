//! Transaction processing
//!
//! This module provides the `TransactionProcessor`, which turns a raw submission
//! into exactly one committed ledger entry plus the matching balance change, or
//! into an error that leaves both stores untouched.
//!
//! # Commit Protocol
//!
//! ```text
//! validate ──> get(account) ──> take commit gate ──> apply_delta(CAS)
//!                  ^                                     │
//!                  └──── Conflict (bounded retries) ─────┤
//!                                                        ├─ LimitExceeded ──> InsufficientLimit
//!                                                        └─ Ok ──> append entry ──> outcome
//!                                                                     │
//!                                                                     └─ Err ──> undo delta, propagate
//! ```
//!
//! The balance is read without any lock. The compare-and-set in the store
//! detects writers that committed in between, and the commit gate makes the
//! balance update and the ledger append one unit for statement readers.

use crate::core::config::EngineConfig;
use crate::core::gates::{lock_commit, CommitGates};
use crate::core::traits::{AccountStore, TransactionLedger};
use crate::types::{
    Account, AccountId, LedgerError, TransactionOutcome, TransactionRequest, ValidatedTransaction,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Validates submissions and commits them atomically
///
/// Cheap to share: all state lives behind `Arc`s, and the processor itself
/// never holds a lock across calls.
#[derive(Debug)]
pub struct TransactionProcessor<A, L> {
    accounts: Arc<A>,
    ledger: Arc<L>,
    gates: Arc<CommitGates>,
    max_attempts: u32,
}

impl<A: AccountStore, L: TransactionLedger> TransactionProcessor<A, L> {
    /// Create a processor over the given stores
    ///
    /// # Arguments
    ///
    /// * `accounts` - Account state, shared with the statement service
    /// * `ledger` - Ledger entries, shared with the statement service
    /// * `gates` - Commit gates, shared with the statement service
    /// * `config` - Supplies the retry budget
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
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// Submit a transaction for an account
    ///
    /// # Returns
    ///
    /// * `Ok(TransactionOutcome)` - The account's limit and post-commit balance
    ///
    /// # Errors
    ///
    /// - `Validation` if the request is malformed (no store is touched)
    /// - `AccountNotFound` if the account was never provisioned
    /// - `InsufficientLimit` if a debit would take the balance below `-limit`
    /// - `Contention` if concurrent commits invalidated every attempt
    /// - `Storage` (or any store error) if the commit could not be recorded;
    ///   the balance change is undone before returning
    pub fn submit(
        &self,
        account_id: AccountId,
        request: &TransactionRequest,
    ) -> Result<TransactionOutcome, LedgerError> {
        let transaction = request.validate()?;
        let delta = transaction.signed_delta();

        for attempt in 1..=self.max_attempts {
            let observed = self.accounts.get(account_id)?;

            let gate = self.gates.gate(account_id);
            let _commit = lock_commit(&gate)?;

            match self.accounts.apply_delta(account_id, delta, observed.balance) {
                Ok(updated) => return self.record(updated, transaction, delta),
                Err(LedgerError::Conflict {
                    expected, actual, ..
                }) => {
                    debug!(
                        account = account_id,
                        attempt, expected, actual, "balance moved before commit, retrying"
                    );
                }
                Err(LedgerError::LimitExceeded { limit, .. }) => {
                    debug!(
                        account = account_id,
                        balance = observed.balance,
                        limit,
                        amount = transaction.amount(),
                        "debit rejected by limit"
                    );
                    return Err(LedgerError::insufficient_limit(
                        account_id,
                        observed.balance,
                        limit,
                        transaction.amount(),
                    ));
                }
                Err(other) => return Err(other),
            }
        }

        warn!(
            account = account_id,
            attempts = self.max_attempts,
            "giving up on contended account"
        );
        Err(LedgerError::contention(account_id, self.max_attempts))
    }

    /// Append the ledger entry for a balance change that already happened
    ///
    /// Must be called with the account's commit gate held.
    fn record(
        &self,
        updated: Account,
        transaction: ValidatedTransaction,
        delta: i64,
    ) -> Result<TransactionOutcome, LedgerError> {
        let appended = self.next_timestamp(updated.id).and_then(|occurred_at| {
            self.ledger
                .append(updated.id, transaction.into_entry(updated.id, occurred_at))
        });

        if let Err(cause) = appended {
            self.undo(&updated, delta);
            return Err(cause);
        }

        debug!(
            account = updated.id,
            delta,
            balance = updated.balance,
            "transaction committed"
        );
        Ok(TransactionOutcome {
            limit: updated.limit,
            balance: updated.balance,
        })
    }

    /// Reverse a balance change whose ledger entry could not be recorded
    ///
    /// Runs under the commit gate, so no other commit can have moved the
    /// balance since `updated` was produced.
    fn undo(&self, updated: &Account, delta: i64) {
        match self
            .accounts
            .apply_delta(updated.id, -delta, updated.balance)
        {
            Ok(restored) => warn!(
                account = updated.id,
                balance = restored.balance,
                "ledger append failed, balance change undone"
            ),
            Err(e) => error!(
                account = updated.id,
                delta,
                error = %e,
                "ledger append failed and the balance change could not be undone"
            ),
        }
    }

    /// Commit time for the next entry of an account
    ///
    /// Never earlier than the account's latest entry, so `occurred_at` is
    /// non-decreasing in commit order even if the wall clock steps back.
    fn next_timestamp(&self, account_id: AccountId) -> Result<DateTime<Utc>, LedgerError> {
        let now = Utc::now();
        let latest = self.ledger.recent(account_id, 1)?;
        Ok(latest
            .first()
            .map_or(now, |last| last.occurred_at.max(now)))
    }
}
