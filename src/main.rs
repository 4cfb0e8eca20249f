use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use music_catalog_server::config::{AppConfig, CliConfig, FileConfig};
use music_catalog_server::render::HtmlRenderer;
use music_catalog_server::server::run_server;
use music_catalog_server::{RequestsLoggingLevel, SqliteCatalogStore};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite catalog database file (created if missing).
    pub catalog_db: Option<PathBuf>,

    /// Path to a TOML config file; its values override the CLI arguments.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 8080)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Directory of static assets to serve under /public.
    #[clap(long)]
    pub static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        db_path: cli_args.catalog_db,
        port: cli_args.port,
        logging_level: cli_args.logging_level,
        static_dir: cli_args.static_dir,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Opening SQLite catalog database at {:?}...", config.db_path);
    let store = Arc::new(SqliteCatalogStore::new(&config.db_path)?);

    info!("Ready to serve at port {}!", config.port);
    run_server(
        store,
        Arc::new(HtmlRenderer),
        config.logging_level,
        config.port,
        config.static_dir,
    )
    .await
}
