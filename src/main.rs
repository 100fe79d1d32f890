use anyhow::Context;
use clap::Parser;

use mythdex::commands::{self, Cli};
use mythdex::config::AppConfig;
use mythdex::storage;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("mythdex", log::LevelFilter::Info)
        .filter_module("sqlx", log::LevelFilter::Error)
        .filter_module("sea_orm", log::LevelFilter::Error)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    // Load .env; without one the process environment is used as is.
    if let Err(e) = dotenv::dotenv() {
        log::debug!("no .env loaded: {}", e);
    }
    let config = AppConfig::from_env().with_overrides(cli.database_url, cli.media_root);

    let db = storage::establish_connection(&config.database_url)
        .await
        .with_context(|| format!("cannot open database {}", config.database_url))?;

    commands::run(cli.command, &db, &config).await
}
