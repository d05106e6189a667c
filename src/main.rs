//! Reporty main entry point

use anyhow::Context;
use clap::Parser;
use log::{error, info};
use reporty_api::start_server;
use reporty_config::Config;
use reporty_core::Database;
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "reporty")]
#[command(author = "Reporty Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A small login-gated web reporting service", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = match Config::load(args.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.to_details());
            anyhow::bail!("failed to load configuration from {}", args.config.display());
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level)).init();
    info!("Config loaded: database={}, users={}", config.database.url, config.auth.users.len());

    let rt = Runtime::new()?;

    rt.block_on(async {
        let db = Database::connect(&config.database)
            .await
            .with_context(|| format!("failed to open database {}", config.database.url))?;

        start_server(config, db).await.map_err(|e| {
            error!("Server error: {}", e);
            anyhow::Error::from(e)
        })
    })
}
