//! Core business logic module
//!
//! This module contains the account ledger consistency engine:
//! - `traits` - Storage abstractions the engine is written against
//! - `account_store` - In-memory account state with compare-and-set updates
//! - `ledger` - In-memory append-only transaction ledger
//! - `gates` - Per-account commit gates shared by writers and readers
//! - `processor` - Validation and atomic commit of submissions
//! - `statement_service` - Consistent statement reads
//! - `engine` - Wiring of the above behind the two external calls
//! - `config` - Engine tuning and default accounts

pub mod account_store;
pub mod config;
pub mod engine;
pub mod gates;
pub mod ledger;
pub mod processor;
pub mod statement_service;
pub mod traits;

pub use account_store::InMemoryAccountStore;
pub use config::{seed_accounts, EngineConfig};
pub use engine::LedgerEngine;
pub use gates::CommitGates;
pub use ledger::InMemoryLedger;
pub use processor::TransactionProcessor;
pub use statement_service::StatementService;
pub use traits::{AccountStore, TransactionLedger};
