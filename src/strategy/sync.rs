//! Synchronous replay strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. It
//! orchestrates the replay by coordinating the SyncReader (CSV input) and the
//! LedgerEngine (business logic).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Submission to `LedgerEngine::process_transaction`
//! - Report output to `json_format::write_statements_json`
//!
//! Records are streamed one at a time; memory use is O(accounts + ledger),
//! independent of the input size.

use crate::core::LedgerEngine;
use crate::io::json_format::write_statements_json;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingStrategy, ReplaySummary};
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Synchronous replay strategy
///
/// # Examples
///
/// ```no_run
/// use rust_account_ledger::core::{seed_accounts, EngineConfig, LedgerEngine};
/// use rust_account_ledger::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let engine = Arc::new(
///     LedgerEngine::with_accounts(seed_accounts(), EngineConfig::default()).unwrap(),
/// );
/// let mut output = std::io::stdout();
///
/// SyncProcessingStrategy
///     .process(&engine, Path::new("transactions.csv"), &mut output)
///     .expect("Replay failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        engine: &Arc<LedgerEngine>,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ReplaySummary, LedgerError> {
        let reader = SyncReader::new(input_path)?;
        let mut summary = ReplaySummary::default();

        for result in reader {
            match result {
                Ok(record) => {
                    let outcome = engine.process_transaction(record.account, &record.request);
                    summary.record(&record, outcome)?;
                }
                Err(e) => {
                    summary.skipped += 1;
                    warn!(error = %e, "skipping replay row");
                }
            }
        }

        write_statements_json(engine.statements()?, output)?;

        info!(
            submitted = summary.submitted,
            committed = summary.committed,
            rejected = summary.rejected,
            skipped = summary.skipped,
            "replay finished"
        );
        Ok(summary)
    }
}
