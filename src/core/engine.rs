//! Ledger engine
//!
//! This module provides the `LedgerEngine`, which wires one account store, one
//! ledger and the commit gates they share into a processor and a statement
//! service. It is the entry point used by the HTTP server and the replay
//! strategies.
//!
//! # Architecture
//!
//! ```text
//! LedgerEngine
//!     ├── Arc<A: AccountStore>       (account state)
//!     ├── Arc<L: TransactionLedger>  (append-only entries)
//!     ├── TransactionProcessor       (validate + atomic commit)
//!     └── StatementService           (consistent reads)
//!              both share Arc<CommitGates>
//! ```

use crate::core::account_store::InMemoryAccountStore;
use crate::core::config::EngineConfig;
use crate::core::gates::CommitGates;
use crate::core::ledger::InMemoryLedger;
use crate::core::processor::TransactionProcessor;
use crate::core::statement_service::StatementService;
use crate::core::traits::{AccountStore, TransactionLedger};
use crate::types::{
    Account, AccountId, LedgerError, Statement, TransactionOutcome, TransactionRequest,
};
use std::sync::Arc;

/// Account ledger consistency engine
///
/// Safe to share between threads behind an `Arc`; every method takes `&self`.
#[derive(Debug)]
pub struct LedgerEngine<A = InMemoryAccountStore, L = InMemoryLedger> {
    accounts: Arc<A>,
    ledger: Arc<L>,
    processor: TransactionProcessor<A, L>,
    statements: StatementService<A, L>,
}

impl LedgerEngine {
    /// Create an engine over empty in-memory stores
    pub fn in_memory(config: EngineConfig) -> Self {
        Self::new(
            Arc::new(InMemoryAccountStore::new()),
            Arc::new(InMemoryLedger::new()),
            config,
        )
    }

    /// Create an in-memory engine holding `accounts`
    ///
    /// # Errors
    ///
    /// Fails on the first account that cannot be provisioned.
    pub fn with_accounts(
        accounts: impl IntoIterator<Item = Account>,
        config: EngineConfig,
    ) -> Result<Self, LedgerError> {
        let engine = Self::in_memory(config);
        for account in accounts {
            engine.provision(account)?;
        }
        Ok(engine)
    }
}

impl<A: AccountStore, L: TransactionLedger> LedgerEngine<A, L> {
    /// Create an engine over the given stores
    pub fn new(accounts: Arc<A>, ledger: Arc<L>, config: EngineConfig) -> Self {
        let gates = Arc::new(CommitGates::new());
        let processor = TransactionProcessor::new(
            Arc::clone(&accounts),
            Arc::clone(&ledger),
            Arc::clone(&gates),
            &config,
        );
        let statements =
            StatementService::new(Arc::clone(&accounts), Arc::clone(&ledger), gates, &config);

        Self {
            accounts,
            ledger,
            processor,
            statements,
        }
    }

    /// Register an account
    pub fn provision(&self, account: Account) -> Result<(), LedgerError> {
        self.accounts.provision(account)
    }

    /// Submit a transaction; see [`TransactionProcessor::submit`]
    pub fn process_transaction(
        &self,
        account_id: AccountId,
        request: &TransactionRequest,
    ) -> Result<TransactionOutcome, LedgerError> {
        self.processor.submit(account_id, request)
    }

    /// Consistent statement; see [`StatementService::statement`]
    pub fn get_statement(&self, account_id: AccountId) -> Result<Statement, LedgerError> {
        self.statements.statement(account_id)
    }

    /// Statements of every provisioned account, ordered by id
    pub fn statements(&self) -> Result<Vec<Statement>, LedgerError> {
        self.accounts
            .accounts()?
            .iter()
            .map(|account| self.get_statement(account.id))
            .collect()
    }

    pub fn account_store(&self) -> &A {
        &self.accounts
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }
}
