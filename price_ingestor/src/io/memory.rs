//! In-process [`DataSink`] used in tests and dry runs.

use std::{
    collections::HashSet,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    io::sink::{DataSink, SinkError, WriteSnafu, WriteMode},
    models::{price_record::PriceRecord, symbol_batch::SymbolBatch},
};

/// Keeps written rows in a vector, honoring the same `(symbol, date, source)`
/// uniqueness rule as the database table.
#[derive(Debug, Default)]
pub struct MemorySink {
    mode: WriteMode,
    rows: Mutex<Vec<PriceRecord>>,
    writes: AtomicUsize,
}

impl MemorySink {
    pub fn new(mode: WriteMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> Vec<PriceRecord> {
        self.rows.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Number of `write` calls received, successful or not.
    pub fn write_calls(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

type Key = (String, NaiveDate, String);

fn key(r: &PriceRecord) -> Key {
    (r.symbol.clone(), r.date, r.source.clone())
}

#[async_trait]
impl DataSink for MemorySink {
    async fn write(&self, batch: &SymbolBatch) -> Result<usize, SinkError> {
        self.writes.fetch_add(1, Ordering::SeqCst);

        let mut rows = self.rows.lock().map_err(|_| {
            WriteSnafu {
                message: "memory sink lock poisoned",
            }
            .build()
        })?;
        let mut seen: HashSet<Key> = rows.iter().map(key).collect();

        let mut fresh = Vec::with_capacity(batch.len());
        for record in batch {
            if seen.insert(key(record)) {
                fresh.push(record.clone());
            } else if self.mode == WriteMode::Append {
                // Nothing has been pushed to `rows` yet, so the batch is rejected whole.
                return WriteSnafu {
                    message: format!(
                        "duplicate key value violates unique constraint: ({}, {}, {})",
                        record.symbol, record.date, record.source
                    ),
                }
                .fail();
            }
        }

        let inserted = fresh.len();
        rows.extend(fresh);
        Ok(inserted)
    }
}
