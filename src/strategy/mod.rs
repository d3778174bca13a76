//! Replay strategy module
//!
//! This module defines the Strategy pattern for replaying a transaction file
//! through a `LedgerEngine`, encompassing CSV parsing, submission and the final
//! statement report. This allows different processing implementations
//! (synchronous, asynchronous batch) to be selected at runtime.

use crate::cli::StrategyType;
use crate::core::LedgerEngine;
use crate::io::ReplayRecord;
use crate::types::{LedgerError, TransactionOutcome};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, ReplayConfig};
pub use sync::SyncProcessingStrategy;

/// Replay strategy trait
///
/// Each strategy reads replay rows from a CSV file, submits them to the
/// engine and writes the statements of every account to `output`.
pub trait ProcessingStrategy: Send + Sync {
    /// Replay `input_path` through `engine` and write the statement report
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened
    /// - A submission fails with a system fault (storage failure)
    /// - Output cannot be written
    ///
    /// Rejected submissions and unparseable rows are logged and counted in
    /// the returned summary; they do not stop the replay.
    fn process(
        &self,
        engine: &Arc<LedgerEngine>,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ReplaySummary, LedgerError>;
}

/// Counters of one replay run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Rows handed to the engine
    pub submitted: usize,
    /// Submissions that were committed
    pub committed: usize,
    /// Submissions the engine rejected
    pub rejected: usize,
    /// Rows that could not be parsed
    pub skipped: usize,
}

impl ReplaySummary {
    /// Account for one submission result
    ///
    /// Business rejections are logged and counted; system faults are returned
    /// so the caller can abort.
    pub fn record(
        &mut self,
        record: &ReplayRecord,
        result: Result<TransactionOutcome, LedgerError>,
    ) -> Result<(), LedgerError> {
        self.submitted += 1;
        match result {
            Ok(outcome) => {
                self.committed += 1;
                debug!(account = record.account, balance = outcome.balance, "replayed");
                Ok(())
            }
            Err(e) if e.is_rejection() => {
                self.rejected += 1;
                warn!(account = record.account, error = %e, "submission rejected");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Fold the counters of a partial run into this one
    pub fn merge(&mut self, other: ReplaySummary) {
        self.submitted += other.submitted;
        self.committed += other.committed;
        self.rejected += other.rejected;
        self.skipped += other.skipped;
    }
}

/// Create a replay strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<ReplayConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
