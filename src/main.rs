//! zammad-bridge - Zammad helpdesk data for Grafana and Prometheus

use std::sync::Arc;

use clap::Parser;
use log::{debug, info};

mod cli;
mod client;
mod config;
mod error;
mod output;
mod server;
mod service;

use cli::{Cli, Commands};
use client::ZammadClient;
use config::Config;
use error::Result;
use service::ZammadService;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let (file_config, config_path) = Config::discover(cli.config.as_deref())?;
    let settings = file_config.resolve(cli.overrides(), config_path)?;

    init_logging(settings.debug);
    debug!("Resolved settings for {}", settings.api_url);

    match cli.resolved_command() {
        Commands::Status => cli::status::run(&settings),
        Commands::Serve => {
            let client =
                ZammadClient::new(&settings.api_url, &settings.api_token, settings.timeout)?;
            let service = ZammadService::new(Arc::new(client));
            info!("Starting zammad-bridge {}", env!("CARGO_PKG_VERSION"));
            server::serve(&settings, service).await
        }
    }
}

/// `info` by default, `debug` with `--debug`; `RUST_LOG` wins over both.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
