//! Pooled PostgreSQL connections.

use anyhow::{Context, bail};
use diesel::{
    QueryableByName, sql_query,
    sql_types::{Nullable, Text},
};
use diesel_async::{
    AsyncPgConnection, RunQueryDsl,
    pooled_connection::{AsyncDieselConnectionManager, deadpool::Pool},
};
use secrecy::ExposeSecret;
use tracing::debug;

use crate::db::config::DbConfig;

pub type PgPool = Pool<AsyncPgConnection>;

/// Fully qualified name of the raw price table.
pub const BRONZE_TABLE: &str = "bronze.stock_prices";

#[derive(QueryableByName)]
struct ServerVersion {
    #[diesel(sql_type = Text)]
    version: String,
}

#[derive(QueryableByName)]
struct RegClass {
    #[diesel(sql_type = Nullable<Text>)]
    relation: Option<String>,
}

/// Builds a pool of at most `cfg.pool_size` connections. Connections are
/// opened lazily, so an unreachable server only surfaces on first use.
pub fn build_pool(cfg: &DbConfig) -> anyhow::Result<PgPool> {
    let manager =
        AsyncDieselConnectionManager::<AsyncPgConnection>::new(cfg.database_url().expose_secret());
    let pool = Pool::builder(manager)
        .max_size(cfg.pool_size)
        .build()
        .context("build PostgreSQL connection pool")?;
    debug!(target = %cfg.display_target(), max_size = cfg.pool_size, "connection pool ready");
    Ok(pool)
}

/// `SELECT version()`; doubles as the connectivity check.
pub async fn server_version(pool: &PgPool) -> anyhow::Result<String> {
    let mut conn = pool.get().await.context("acquire connection")?;
    let row: ServerVersion = sql_query("SELECT version() AS version")
        .get_result(&mut conn)
        .await
        .context("query server version")?;
    Ok(row.version)
}

/// Fails unless `bronze.stock_prices` exists, i.e. provisioning has run.
pub async fn ensure_bronze_table(pool: &PgPool) -> anyhow::Result<()> {
    let mut conn = pool.get().await.context("acquire connection")?;
    let row: RegClass = sql_query(format!("SELECT to_regclass('{BRONZE_TABLE}')::text AS relation"))
        .get_result(&mut conn)
        .await
        .context("look up bronze table")?;

    if row.relation.is_none() {
        bail!("table {BRONZE_TABLE} does not exist; run `bronze-ingest setup` first");
    }
    Ok(())
}
