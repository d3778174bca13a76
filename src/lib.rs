//! Rust Account Ledger Library
//! # Overview
//!
//! This library provides an account ledger consistency engine: credit and debit
//! submissions against accounts with an overdraft limit, an append-only ledger of
//! committed entries, and statements that always agree with the ledger.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, TransactionRequest, Statement, LedgerError)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::account_store`] - Account state with compare-and-set balance updates
//!   - [`core::ledger`] - Append-only transaction ledger
//!   - [`core::processor`] - Validation and atomic commit of submissions
//!   - [`core::statement_service`] - Consistent statement reads
//!   - [`core::engine`] - Wiring of the above
//! - [`io`] - CSV readers for replay and provisioning, JSON wire format
//! - [`strategy`] - Sync and async replay pipelines
//! - [`server`] - HTTP surface
//!
//! # Transactions
//!
//! - **Credit** (`c`): adds the amount to the balance; always admitted
//! - **Debit** (`d`): subtracts the amount; rejected if the balance would fall
//!   below `-limit`
//!
//! # Guarantees
//!
//! - The balance never goes below `-limit`
//! - The balance equals the signed sum of the account's ledger entries
//! - A balance change and its ledger entry are committed together or not at all
//! - A statement's balance and entries come from the same committed state

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod server;
pub mod strategy;
pub mod types;

pub use core::{EngineConfig, LedgerEngine};
pub use types::{
    Account, AccountId, LedgerError, Statement, Transaction, TransactionKind, TransactionOutcome,
    TransactionRequest,
};
