//! Row types written to `bronze.stock_prices`.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use price_ingestor::{
    io::sink::{ConversionSnafu, SinkError},
    models::price_record::PriceRecord,
};
use rust_decimal::{Decimal, prelude::FromPrimitive};

use crate::schema::stock_prices;

/// Digits kept after the decimal point, matching `NUMERIC(18, 6)`.
pub const PRICE_SCALE: u32 = 6;

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = stock_prices)]
pub struct NewStockPrice<'a> {
    pub symbol: &'a str,
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub adj_close: Decimal,
    pub volume: i64,
    pub source: &'a str,
    pub ingestion_timestamp: NaiveDateTime,
}

impl<'a> TryFrom<&'a PriceRecord> for NewStockPrice<'a> {
    type Error = SinkError;

    fn try_from(r: &'a PriceRecord) -> Result<Self, Self::Error> {
        let price = |column: &str, value: f64| -> Result<Decimal, SinkError> {
            Decimal::from_f64(value)
                .map(|d| d.round_dp(PRICE_SCALE))
                .ok_or_else(|| {
                    ConversionSnafu {
                        message: format!("{} {} {column}={value} is not a finite price", r.symbol, r.date),
                    }
                    .build()
                })
        };
        let volume = i64::try_from(r.volume).map_err(|_| {
            ConversionSnafu {
                message: format!("{} {} volume {} overflows BIGINT", r.symbol, r.date, r.volume),
            }
            .build()
        })?;

        Ok(Self {
            symbol: &r.symbol,
            date: r.date,
            open: price("open", r.open)?,
            high: price("high", r.high)?,
            low: price("low", r.low)?,
            close: price("close", r.close)?,
            adj_close: price("adj_close", r.adj_close)?,
            volume,
            source: &r.source,
            ingestion_timestamp: r.ingestion_timestamp,
        })
    }
}
