//! Daily price ingestion: fetch per-symbol history from a market-data provider,
//! normalize it into [`PriceRecord`](models::price_record::PriceRecord) rows and
//! load each symbol's batch into a raw sink, isolating failures per symbol.

pub mod config;
pub mod fetcher;
pub mod io;
pub mod loader;
pub mod models;
pub mod orchestrator;
pub mod providers;
pub mod retry;
pub mod utils;

pub use fetcher::Fetcher;
pub use loader::Loader;
pub use orchestrator::Orchestrator;
