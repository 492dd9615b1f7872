//! PostgreSQL bronze layer for the daily price pipeline.
//!
//! - [`db`]: connection settings, pooled connections, embedded provisioning migrations.
//! - [`schema`] / [`models`]: Diesel mapping of `bronze.stock_prices`.
//! - [`sink::PgSink`]: the [`DataSink`](price_ingestor::io::sink::DataSink) the
//!   `bronze-ingest` binary loads through.

pub mod db;
pub mod models;
pub mod schema;
pub mod sink;
