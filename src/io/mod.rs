//! I/O module
//!
//! Handles CSV parsing and JSON output.
//!
//! # Components
//!
//! - `csv_format` - CSV row shapes for replay and provisioning files
//! - `json_format` - JSON bodies of the HTTP API and the replay report
//! - `sync_reader` - Synchronous CSV readers with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod json_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_csv_record, CsvAccountRecord, CsvTransactionRecord, ReplayRecord};
pub use json_format::{
    write_statements_json, AccountStatementBody, BalanceBody, EntryBody, ErrorBody, OutcomeBody,
    StatementBody, TransactionBody,
};
pub use sync_reader::{read_accounts, read_accounts_from, SyncReader};
