use tracing::{debug, warn};

use crate::{
    io::sink::DataSink, models::symbol_batch::SymbolBatch, retry::RetryPolicy,
    utils::truncate_message,
};

/// Longest sink error text that makes it into the log.
const MAX_ERROR_CHARS: usize = 200;

/// Appends a [`SymbolBatch`] to a [`DataSink`] and reports how many rows were written.
///
/// Like the [`Fetcher`](crate::fetcher::Fetcher), the loader never fails: a
/// sink fault is logged and reported as zero rows.
pub struct Loader<S> {
    sink: S,
    retry: RetryPolicy,
}

impl<S: DataSink> Loader<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            retry: RetryPolicy::none(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns `batch.len()` once the sink accepted the batch, or 0 for an
    /// empty batch (the sink is not called) or a sink fault.
    pub async fn load(&self, batch: &SymbolBatch) -> usize {
        if batch.is_empty() {
            return 0;
        }

        match self
            .retry
            .run(batch.symbol(), |_| self.sink.write(batch))
            .await
        {
            Ok(inserted) => {
                if inserted < batch.len() {
                    debug!(
                        symbol = batch.symbol(),
                        submitted = batch.len(),
                        inserted,
                        "some rows were already present"
                    );
                }
                batch.len()
            }
            Err(err) => {
                warn!(
                    symbol = batch.symbol(),
                    rows = batch.len(),
                    error = %truncate_message(&err.to_string(), MAX_ERROR_CHARS),
                    "load failed"
                );
                0
            }
        }
    }
}
