//! CLI command definitions

use clap::{Parser, Subcommand};

use crate::config::Overrides;

pub mod status;

/// zammad-bridge - Zammad ticket data for Grafana and Prometheus
#[derive(Parser, Debug)]
#[command(name = "zammad-bridge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Zammad base URL, e.g. https://support.example.com
    #[arg(long, global = true, env = "ZAMMAD_API_URL")]
    pub api_url: Option<String>,

    /// Zammad API token
    #[arg(long, global = true, env = "ZAMMAD_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Address to bind [default: 0.0.0.0]
    #[arg(long, global = true, env = "BACKEND_HOST")]
    pub host: Option<String>,

    /// Port to bind [default: 8000]
    #[arg(long, global = true, env = "BACKEND_PORT")]
    pub port: Option<u16>,

    /// Enable debug logging
    #[arg(long, global = true, env = "BACKEND_DEBUG")]
    pub debug: bool,

    /// Comma-separated list of allowed CORS origins
    #[arg(long, global = true, env = "CORS_ORIGINS")]
    pub cors_origins: Option<String>,

    /// Upstream request timeout in seconds [default: 30]
    #[arg(long, global = true, env = "ZAMMAD_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Override config file location (defaults to ~/.zammad-bridge/config.yaml)
    #[arg(long, global = true, env = "ZAMMAD_BRIDGE_CONFIG", hide_env = true)]
    pub config: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server
    Serve,

    /// Show the resolved configuration
    Status,
}

impl Cli {
    /// Command to run; a bare invocation serves.
    pub fn resolved_command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }

    /// Flag and environment values for config resolution.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_url: self.api_url.clone(),
            api_token: self.api_token.clone(),
            host: self.host.clone(),
            port: self.port,
            debug: self.debug,
            cors_origins: self.cors_origins.clone(),
            timeout_secs: self.timeout,
        }
    }
}
