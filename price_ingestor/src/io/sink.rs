use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use snafu::{Backtrace, Snafu};

use crate::models::symbol_batch::SymbolBatch;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// An error occurred while trying to write the data (constraint violation, lost connection, ...).
    #[snafu(display("Failed to write data: {message}"))]
    Write {
        message: String,
        backtrace: Backtrace,
    },

    /// A canonical [`PriceRecord`](crate::models::price_record::PriceRecord) could not be
    /// converted into the destination's column types.
    #[snafu(display("Data conversion error: {message}"))]
    Conversion {
        message: String,
        backtrace: Backtrace,
    },

    /// No connection to the destination could be obtained.
    #[snafu(display("Connection unavailable: {message}"))]
    Unavailable {
        message: String,
        backtrace: Backtrace,
    },
}

/// How rows are written into the raw table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Insert-or-ignore on `(symbol, date, source)`. Re-running over an
    /// overlapping range leaves existing rows untouched.
    #[default]
    Upsert,
    /// Blind append. Overlapping re-runs hit the uniqueness constraint and the
    /// whole batch is rejected.
    Append,
}

#[async_trait]
pub trait DataSink: Send + Sync {
    /// Writes every record of `batch` or none of them.
    ///
    /// Returns the number of rows that are new in the destination. With
    /// [`WriteMode::Upsert`] this can be lower than `batch.len()` when some rows
    /// were already present.
    async fn write(&self, batch: &SymbolBatch) -> Result<usize, SinkError>;
}

#[async_trait]
impl<S: DataSink + ?Sized> DataSink for Box<S> {
    async fn write(&self, batch: &SymbolBatch) -> Result<usize, SinkError> {
        (**self).write(batch).await
    }
}
