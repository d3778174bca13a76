//! Asynchronous batch replay strategy
//!
//! Multi-threaded implementation of the ProcessingStrategy trait. Replay rows
//! are read in batches and each batch is partitioned by account so that
//! different accounts are submitted in parallel.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── ReplayConfig (batch_size, max_concurrent)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── partition_by_account (file order kept per account)
//!     └── Arc<LedgerEngine> (shared across blocking tasks)
//! ```
//!
//! # Ordering
//!
//! Batches are processed one after the other. Within a batch, each account's
//! rows run sequentially inside one blocking task, so per-account submission
//! order matches the file across the whole replay.

use crate::core::LedgerEngine;
use crate::io::async_reader::AsyncReader;
use crate::io::json_format::write_statements_json;
use crate::io::ReplayRecord;
use crate::strategy::{ProcessingStrategy, ReplaySummary};
use crate::types::{AccountId, LedgerError};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// Configuration for batch replay
#[derive(Clone, Debug)]
pub struct ReplayConfig {
    /// Number of rows per batch
    pub batch_size: usize,
    /// Maximum number of account partitions submitting concurrently
    pub max_concurrent: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent: num_cpus::get(),
        }
    }
}

impl ReplayConfig {
    /// Create a new ReplayConfig, falling back to defaults for zero values
    pub fn new(batch_size: usize, max_concurrent: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent = if max_concurrent == 0 {
            warn!(
                max_concurrent,
                default = default.max_concurrent,
                "invalid max_concurrent, using default"
            );
            default.max_concurrent
        } else {
            max_concurrent
        };

        Self {
            batch_size,
            max_concurrent,
        }
    }
}

/// Split a batch into per-account runs, keeping file order inside each run
pub fn partition_by_account(batch: Vec<ReplayRecord>) -> HashMap<AccountId, Vec<ReplayRecord>> {
    let mut partitions: HashMap<AccountId, Vec<ReplayRecord>> = HashMap::new();

    for record in batch {
        partitions.entry(record.account).or_default().push(record);
    }

    partitions
}

/// Submit one account's run sequentially
fn replay_partition(
    engine: &LedgerEngine,
    records: Vec<ReplayRecord>,
) -> Result<ReplaySummary, LedgerError> {
    let mut summary = ReplaySummary::default();
    for record in records {
        let outcome = engine.process_transaction(record.account, &record.request);
        summary.record(&record, outcome)?;
    }
    Ok(summary)
}

/// Asynchronous batch replay strategy
///
/// # Configuration
///
/// - `batch_size`: Number of rows per batch (default: 1000)
/// - `max_concurrent`: Partitions in flight and worker threads (default: CPU cores)
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: ReplayConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: ReplayConfig) -> Self {
        Self { config }
    }

    async fn replay_batch(
        &self,
        engine: &Arc<LedgerEngine>,
        semaphore: &Arc<Semaphore>,
        batch: Vec<ReplayRecord>,
    ) -> Result<ReplaySummary, LedgerError> {
        let mut tasks = Vec::new();
        for (_account, records) in partition_by_account(batch) {
            let permit = Arc::clone(semaphore)
                .acquire_owned()
                .await
                .map_err(|e| LedgerError::storage(format!("replay semaphore closed: {}", e)))?;
            let engine = Arc::clone(engine);
            tasks.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                replay_partition(&engine, records)
            }));
        }

        // Every task is awaited before a fault is returned
        let mut summary = ReplaySummary::default();
        let mut fault = None;
        for task in tasks {
            match task.await {
                Ok(Ok(partial)) => summary.merge(partial),
                Ok(Err(e)) => {
                    fault.get_or_insert(e);
                }
                Err(e) => {
                    fault.get_or_insert(LedgerError::storage(format!("replay task failed: {}", e)));
                }
            }
        }

        match fault {
            Some(e) => Err(e),
            None => Ok(summary),
        }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        engine: &Arc<LedgerEngine>,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ReplaySummary, LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent)
            .build()
            .map_err(|e| LedgerError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        let summary = runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| LedgerError::IoError {
                    message: format!("Failed to open file '{}': {}", input_path.display(), e),
                })?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);
            let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent));
            let mut summary = ReplaySummary::default();

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                let partial = self.replay_batch(engine, &semaphore, batch).await?;
                summary.merge(partial);
            }

            summary.skipped = reader.skipped();
            Ok::<_, LedgerError>(summary)
        })?;

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
