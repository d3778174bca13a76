//! CSV format handling for replay input and account provisioning
//!
//! This module centralizes all CSV format concerns, providing:
//! - `CsvTransactionRecord` for replay rows (`cliente,tipo,valor,descricao`)
//! - `CsvAccountRecord` for provisioning rows (`id,limite,saldo`)
//! - Conversion from CSV records to domain types
//!
//! All functions are pure (no I/O) for easy testing. Shape validation of the
//! transaction itself is left to the engine; these conversions only deal with
//! what cannot be represented at all.

use crate::types::{Account, AccountId, LedgerError, TransactionRequest};
use serde::Deserialize;

/// Replay row as read from CSV
///
/// The amount is kept as text so that a malformed value is reported with the
/// row instead of aborting the whole file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvTransactionRecord {
    #[serde(rename = "cliente")]
    pub account: AccountId,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "valor")]
    pub amount: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
}

/// A replay row ready to be submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayRecord {
    pub account: AccountId,
    pub request: TransactionRequest,
}

/// Convert a CsvTransactionRecord to a ReplayRecord
///
/// # Returns
///
/// * `Ok(ReplayRecord)` - The row as a submission for its account
/// * `Err(LedgerError::ParseError)` - If the amount is not an integer
pub fn convert_csv_record(csv_record: CsvTransactionRecord) -> Result<ReplayRecord, LedgerError> {
    let amount = csv_record
        .amount
        .trim()
        .parse::<i64>()
        .map_err(|_| LedgerError::ParseError {
            line: None,
            message: format!(
                "Invalid amount '{}' for account {}",
                csv_record.amount, csv_record.account
            ),
        })?;

    Ok(ReplayRecord {
        account: csv_record.account,
        request: TransactionRequest::new(
            amount,
            csv_record.kind,
            csv_record.description.unwrap_or_default(),
        ),
    })
}

/// Provisioning row as read from CSV
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvAccountRecord {
    pub id: AccountId,
    #[serde(rename = "limite")]
    pub limit: i64,
    #[serde(rename = "saldo", default)]
    pub balance: Option<i64>,
}

impl From<CsvAccountRecord> for Account {
    fn from(record: CsvAccountRecord) -> Self {
        Account::with_balance(record.id, record.limit, record.balance.unwrap_or(0))
    }
}
