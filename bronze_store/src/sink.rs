//! [`DataSink`] backed by `bronze.stock_prices`.

use async_trait::async_trait;
use diesel::{insert_into, result::Error as DieselError};
use diesel_async::{AsyncConnection, RunQueryDsl, scoped_futures::ScopedFutureExt};
use price_ingestor::{
    io::sink::{DataSink, SinkError, UnavailableSnafu, WriteMode, WriteSnafu},
    models::symbol_batch::SymbolBatch,
};
use tracing::debug;

use crate::{db::connection::PgPool, models::NewStockPrice, schema::stock_prices};

/// PostgreSQL caps a statement at 65535 bind parameters; each row binds ten.
pub const MAX_ROWS_PER_STATEMENT: usize = 5_000;

pub struct PgSink {
    pool: PgPool,
    mode: WriteMode,
}

impl PgSink {
    pub fn new(pool: PgPool, mode: WriteMode) -> Self {
        Self { pool, mode }
    }
}

#[async_trait]
impl DataSink for PgSink {
    /// Writes the whole batch in one transaction. In [`WriteMode::Upsert`] rows
    /// whose `(symbol, date, source)` already exist are skipped and not counted.
    async fn write(&self, batch: &SymbolBatch) -> Result<usize, SinkError> {
        let rows = batch
            .iter()
            .map(NewStockPrice::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut conn = self.pool.get().await.map_err(|e| {
            UnavailableSnafu {
                message: e.to_string(),
            }
            .build()
        })?;

        let mode = self.mode;
        let inserted = conn
            .transaction::<usize, DieselError, _>(|conn| {
                async move {
                    let mut inserted = 0;
                    for chunk in rows.chunks(MAX_ROWS_PER_STATEMENT) {
                        let insert = insert_into(stock_prices::table).values(chunk);
                        inserted += match mode {
                            WriteMode::Upsert => {
                                insert
                                    .on_conflict((
                                        stock_prices::symbol,
                                        stock_prices::date,
                                        stock_prices::source,
                                    ))
                                    .do_nothing()
                                    .execute(conn)
                                    .await?
                            }
                            WriteMode::Append => insert.execute(conn).await?,
                        };
                    }
                    Ok(inserted)
                }
                .scope_boxed()
            })
            .await
            .map_err(|e| {
                WriteSnafu {
                    message: e.to_string(),
                }
                .build()
            })?;

        debug!(symbol = batch.symbol(), rows = batch.len(), inserted, ?mode, "batch committed");
        Ok(inserted)
    }
}
