//! set up migrations

use anyhow::anyhow;
use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Embedded Diesel migrations bundled with this crate.
///
/// They create the `bronze`, `silver` and `gold` schemas and the
/// `bronze.stock_prices` table with its uniqueness key and indexes.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Runs pending Diesel migrations on a PostgreSQL database at the given URL.
///
/// Returns how many migrations were applied; 0 means the schema was already current.
pub fn run_postgres(url: &str) -> anyhow::Result<usize> {
    let mut conn = PgConnection::establish(url)?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!(e))?;
    for version in &applied {
        info!(%version, "applied migration");
    }

    Ok(applied.len())
}
