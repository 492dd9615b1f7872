#![allow(dead_code)]

use bronze_store::db::{config::DbConfig, connection, migrate};
use chrono::NaiveDate;
use price_ingestor::models::{price_record::PriceRecord, symbol_batch::SymbolBatch};
use secrecy::ExposeSecret;

/// Live database from `POSTGRES_*`, provisioned and pooled. `None` when the
/// environment does not point at a server.
pub async fn live_pool() -> Option<connection::PgPool> {
    let cfg = DbConfig::from_env().ok()?;
    let url = cfg.database_url();
    tokio::task::spawn_blocking(move || migrate::run_postgres(url.expose_secret()))
        .await
        .expect("join migration task")
        .expect("migrations");
    Some(connection::build_pool(&cfg).expect("pool"))
}

pub fn batch(symbol: &str, days: std::ops::RangeInclusive<u32>) -> SymbolBatch {
    let ts = NaiveDate::from_ymd_opt(2024, 2, 1)
        .unwrap()
        .and_hms_opt(6, 30, 0)
        .unwrap();
    let records = days
        .map(|day| PriceRecord {
            symbol: symbol.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: 100.0 + day as f64,
            high: 101.5 + day as f64,
            low: 99.25 + day as f64,
            close: 100.75 + day as f64,
            adj_close: 100.75 + day as f64,
            volume: 1_000 * day as u64,
            source: "bronze_store_test".to_string(),
            ingestion_timestamp: ts,
        })
        .collect();
    SymbolBatch::new(symbol, records)
}
