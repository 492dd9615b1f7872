use std::path::PathBuf;

use anyhow::{Context, Result};
use bronze_store::{
    db::{config::DbConfig, connection, migrate},
    sink::PgSink,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use price_ingestor::{
    Fetcher, Loader, Orchestrator, config::RunConfig, io::sink::WriteMode,
    providers::yahoo::YahooProvider,
};
use secrecy::ExposeSecret;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Daily stock price ingestion into the bronze layer")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Create the bronze/silver/gold schemas and the bronze.stock_prices table.
    Setup,
    /// Connect and print the server version.
    CheckDb,
    /// Fetch every configured symbol and load it into bronze.stock_prices.
    Run(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// TOML run configuration; flags below override it.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    #[arg(long, value_delimiter = ',')]
    symbols: Option<Vec<String>>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    start: Option<NaiveDate>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    end: Option<NaiveDate>,
    #[arg(long)]
    max_retries: Option<u32>,
    #[arg(long, value_name = "MS")]
    base_delay_ms: Option<u64>,
    #[arg(long)]
    concurrency: Option<usize>,
    /// Plain INSERT; rows that already exist fail the whole symbol.
    #[arg(long)]
    append_only: bool,
}

impl RunArgs {
    fn into_config(self) -> Result<RunConfig> {
        let mut cfg = match &self.config {
            Some(path) => RunConfig::load_path(path)?,
            None => RunConfig::default(),
        };
        if let Some(symbols) = self.symbols {
            cfg.symbols = symbols;
        }
        if let Some(start) = self.start {
            cfg.start = start;
        }
        if let Some(end) = self.end {
            cfg.end = end;
        }
        if let Some(n) = self.max_retries {
            cfg.retry.max_retries = n;
        }
        if let Some(ms) = self.base_delay_ms {
            cfg.retry.base_delay_ms = ms;
        }
        if let Some(n) = self.concurrency {
            cfg.concurrency = n;
        }
        if self.append_only {
            cfg.write_mode = WriteMode::Append;
        }
        cfg.validate().context("invalid run configuration")?;
        Ok(cfg)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let db = DbConfig::from_env().context("database configuration")?;

    match cli.cmd {
        Cmd::Setup => {
            let url = db.database_url();
            let applied =
                tokio::task::spawn_blocking(move || migrate::run_postgres(url.expose_secret()))
                    .await
                    .context("migration task panicked")??;
            info!(target = %db.display_target(), applied, "bronze schema is up to date");
        }
        Cmd::CheckDb => {
            let pool = connection::build_pool(&db)?;
            let version = connection::server_version(&pool).await?;
            println!("{version}");
        }
        Cmd::Run(args) => {
            let cfg = args.into_config()?;
            let range = cfg.range()?;

            let pool = connection::build_pool(&db)?;
            connection::ensure_bronze_table(&pool).await?;

            let provider = YahooProvider::new(cfg.rate()?)?;
            let orchestrator = Orchestrator::new(
                Fetcher::new(provider).with_retry(cfg.retry),
                Loader::new(PgSink::new(pool, cfg.write_mode)).with_retry(cfg.retry),
            )
            .with_concurrency(cfg.concurrency()?);

            let summary = orchestrator
                .run(cfg.symbols.as_slice(), range.start(), range.end())
                .await;
            println!("{summary}");
        }
    }

    Ok(())
}
