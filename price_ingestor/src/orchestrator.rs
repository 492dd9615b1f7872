//! Batch run over a list of symbols: fetch, then load, one symbol at a time.

use std::num::NonZeroUsize;

use chrono::NaiveDate;
use futures::{StreamExt, stream};
use tracing::info;

use crate::{
    fetcher::Fetcher,
    io::sink::DataSink,
    loader::Loader,
    models::run_summary::{RunSummary, SymbolOutcome},
    providers::DataProvider,
};

pub struct Orchestrator<P, S> {
    fetcher: Fetcher<P>,
    loader: Loader<S>,
    concurrency: NonZeroUsize,
}

impl<P: DataProvider, S: DataSink> Orchestrator<P, S> {
    pub fn new(fetcher: Fetcher<P>, loader: Loader<S>) -> Self {
        Self {
            fetcher,
            loader,
            concurrency: NonZeroUsize::MIN,
        }
    }

    /// Number of symbols in flight at once. `1` (the default) runs strictly in order.
    ///
    /// With more than one, outcomes are still folded into the summary in input
    /// order by the single task driving the run.
    pub fn with_concurrency(mut self, concurrency: NonZeroUsize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn fetcher(&self) -> &Fetcher<P> {
        &self.fetcher
    }

    pub fn loader(&self) -> &Loader<S> {
        &self.loader
    }

    /// Ingests every symbol in `symbols`, in the given order and without
    /// deduplication. Per-symbol failures only show up in the summary counters.
    pub async fn run<T: AsRef<str>>(
        &self,
        symbols: &[T],
        start: NaiveDate,
        end: NaiveDate,
    ) -> RunSummary {
        info!(
            symbols = symbols.len(),
            %start,
            %end,
            concurrency = self.concurrency.get(),
            "fetching stock data"
        );

        let summary: RunSummary = stream::iter(symbols)
            .map(|symbol| self.ingest_symbol(symbol.as_ref(), start, end))
            .buffered(self.concurrency.get())
            .collect()
            .await;

        info!(
            attempted = summary.attempted,
            successful = summary.successful,
            total_records = summary.total_records,
            "run complete"
        );
        summary
    }

    async fn ingest_symbol(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> SymbolOutcome {
        let batch = self.fetcher.fetch(symbol, start, end).await;
        if batch.is_empty() {
            info!(symbol, "no data");
            return SymbolOutcome {
                symbol: symbol.to_string(),
                fetched: 0,
                loaded: 0,
            };
        }

        let fetched = batch.len();
        let loaded = self.loader.load(&batch).await;
        info!(symbol, fetched, loaded, "symbol ingested");

        SymbolOutcome {
            symbol: symbol.to_string(),
            fetched,
            loaded,
        }
    }
}
