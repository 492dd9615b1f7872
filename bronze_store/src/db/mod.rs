//! Database utilities for the bronze PostgreSQL store.
//!
//! This module provides:
//! - Connection settings read from `POSTGRES_*` variables: [`config::DbConfig`].
//! - A pooled async connection factory plus connectivity and readiness checks:
//!   [`connection::build_pool`], [`connection::server_version`],
//!   [`connection::ensure_bronze_table`].
//! - Embedded Diesel migrations that provision the `bronze`/`silver`/`gold`
//!   schemas and `bronze.stock_prices`: [`migrate::run_postgres`].
//!
//! Example:
//! ```no_run
//! use bronze_store::db::{config::DbConfig, connection, migrate};
//! use secrecy::ExposeSecret;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let cfg = DbConfig::from_env()?;
//! migrate::run_postgres(cfg.database_url().expose_secret())?;
//!
//! let pool = connection::build_pool(&cfg)?;
//! println!("{}", connection::server_version(&pool).await?);
//! # Ok(())
//! # }
//! ```
//!
//! Note: Building requires the system libpq (e.g., libpq-dev on Debian/Ubuntu).

pub mod config;
pub mod connection;
pub mod migrate;
