//! Synchronous CSV readers
//!
//! Provides a streaming iterator over replay records and a loader for account
//! provisioning files. Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<ReplayRecord, LedgerError>` for each CSV row:
//!
//! ```no_run
//! use rust_account_ledger::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("transactions.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("Submitting for account {}", record.account),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the iterator
//! - Line numbers are attached to every record error

use crate::io::csv_format::{convert_csv_record, CsvAccountRecord, CsvTransactionRecord, ReplayRecord};
use crate::types::{Account, LedgerError};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Synchronous replay reader
///
/// Reads one row at a time; memory use does not grow with the file.
#[derive(Debug)]
pub struct SyncReader<R = File> {
    reader: csv::Reader<R>,
    line_num: u64,
}

impl SyncReader<File> {
    /// Open a replay file
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(LedgerError::IoError)` if file could not be opened
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| LedgerError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        })?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> SyncReader<R> {
    /// Read replay rows from any reader
    ///
    /// The CSV reader is configured to trim whitespace from all fields and to
    /// allow a missing trailing description column.
    pub fn from_reader(reader: R) -> Self {
        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(reader);

        Self {
            reader,
            line_num: 1,
        }
    }
}

impl<R: Read> Iterator for SyncReader<R> {
    type Item = Result<ReplayRecord, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvTransactionRecord>();
        let next = deserializer.next()?;
        self.line_num += 1;
        let line = self.line_num;

        let record = next
            .map_err(LedgerError::from)
            .and_then(convert_csv_record)
            .map_err(|e| match e {
                LedgerError::ParseError { message, .. } => LedgerError::ParseError {
                    line: Some(line),
                    message,
                },
                other => other,
            });
        Some(record)
    }
}

/// Load a provisioning file (`id,limite,saldo`)
///
/// # Errors
///
/// Unlike replay, the first malformed row aborts the load.
pub fn read_accounts(path: &Path) -> Result<Vec<Account>, LedgerError> {
    let file = File::open(path).map_err(|e| LedgerError::IoError {
        message: format!("Failed to open file '{}': {}", path.display(), e),
    })?;
    read_accounts_from(file)
}

/// Load provisioning rows from any reader
pub fn read_accounts_from<R: Read>(reader: R) -> Result<Vec<Account>, LedgerError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    reader
        .deserialize::<CsvAccountRecord>()
        .map(|row| row.map(Account::from).map_err(LedgerError::from))
        .collect()
}
