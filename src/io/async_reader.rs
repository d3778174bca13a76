//! Asynchronous CSV reader with batch interface
//!
//! Streams replay rows from a CSV source and hands them out in batches, so the
//! async replay strategy can keep a bounded number of submissions in flight.
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of ReplayRecords
//!                  ↓
//!           csv_format module
//!           (CsvTransactionRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvTransactionRecord, ReplayRecord};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous replay reader
///
/// Memory use is bounded by the batch size, not by the input.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: u64,
    skipped: usize,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 1,
            skipped: 0,
        }
    }

    /// Read up to `batch_size` replay records
    ///
    /// Rows that cannot be parsed are logged with their line number and
    /// skipped. Returns an empty vector once the input is exhausted.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<ReplayRecord> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvTransactionRecord>();

        while batch.len() < batch_size {
            let next = match records.next().await {
                Some(next) => next,
                None => break,
            };
            self.line_num += 1;

            match next {
                Ok(csv_record) => match convert_csv_record(csv_record) {
                    Ok(record) => batch.push(record),
                    Err(e) => {
                        self.skipped += 1;
                        warn!(line = self.line_num, error = %e, "skipping replay row");
                    }
                },
                Err(e) => {
                    self.skipped += 1;
                    warn!(line = self.line_num, error = %e, "CSV parse error");
                }
            }
        }

        batch
    }

    /// Rows skipped so far because they could not be parsed
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
