//! Needs a reachable PostgreSQL configured through `POSTGRES_*`:
//! `cargo test -p bronze_store -- --ignored`.

mod common;

use bronze_store::{db::connection, schema::stock_prices, sink::PgSink};
use diesel::{ExpressionMethods, QueryDsl};
use price_ingestor::{
    Loader,
    io::sink::{DataSink, SinkError, WriteMode},
};
use serial_test::serial;

async fn clear(pool: &connection::PgPool, symbol: &str) {
    use diesel_async::RunQueryDsl;
    let mut conn = pool.get().await.unwrap();
    diesel::delete(stock_prices::table.filter(stock_prices::symbol.eq(symbol)))
        .execute(&mut conn)
        .await
        .unwrap();
}

async fn count(pool: &connection::PgPool, symbol: &str) -> i64 {
    use diesel_async::RunQueryDsl;
    let mut conn = pool.get().await.unwrap();
    stock_prices::table
        .filter(stock_prices::symbol.eq(symbol))
        .count()
        .get_result(&mut conn)
        .await
        .unwrap()
}

#[tokio::test]
#[serial]
#[ignore]
async fn table_exists_after_setup() {
    let Some(pool) = common::live_pool().await else {
        return;
    };
    connection::ensure_bronze_table(&pool).await.unwrap();
    assert!(connection::server_version(&pool).await.unwrap().starts_with("PostgreSQL"));
}

#[tokio::test]
#[serial]
#[ignore]
async fn upsert_skips_existing_rows() {
    let Some(pool) = common::live_pool().await else {
        return;
    };
    clear(&pool, "TSTUP").await;
    let sink = PgSink::new(pool.clone(), WriteMode::Upsert);

    assert_eq!(sink.write(&common::batch("TSTUP", 2..=4)).await.unwrap(), 3);
    assert_eq!(sink.write(&common::batch("TSTUP", 3..=6)).await.unwrap(), 2);
    assert_eq!(count(&pool, "TSTUP").await, 5);

    clear(&pool, "TSTUP").await;
}

#[tokio::test]
#[serial]
#[ignore]
async fn append_rejects_the_whole_batch_on_a_duplicate() {
    let Some(pool) = common::live_pool().await else {
        return;
    };
    clear(&pool, "TSTAP").await;
    let sink = PgSink::new(pool.clone(), WriteMode::Append);

    sink.write(&common::batch("TSTAP", 2..=3)).await.unwrap();
    let err = sink.write(&common::batch("TSTAP", 3..=9)).await.unwrap_err();

    assert!(matches!(err, SinkError::Write { .. }));
    assert_eq!(count(&pool, "TSTAP").await, 2, "nothing from the failed batch");

    let loader = Loader::new(PgSink::new(pool.clone(), WriteMode::Append));
    assert_eq!(loader.load(&common::batch("TSTAP", 2..=2)).await, 0);

    clear(&pool, "TSTAP").await;
}

#[tokio::test]
#[serial]
#[ignore]
async fn large_batches_are_chunked() {
    let Some(pool) = common::live_pool().await else {
        return;
    };
    clear(&pool, "TSTBIG").await;

    let base = common::batch("TSTBIG", 1..=1);
    let template = base.records()[0].clone();
    let records: Vec<_> = template
        .date
        .iter_days()
        .take(bronze_store::sink::MAX_ROWS_PER_STATEMENT + 7)
        .map(|date| price_ingestor::models::price_record::PriceRecord {
            date,
            ..template.clone()
        })
        .collect();
    let batch = price_ingestor::models::symbol_batch::SymbolBatch::new("TSTBIG", records);

    let sink = PgSink::new(pool.clone(), WriteMode::Upsert);
    assert_eq!(sink.write(&batch).await.unwrap(), batch.len());
    assert_eq!(count(&pool, "TSTBIG").await, batch.len() as i64);

    clear(&pool, "TSTBIG").await;
}
