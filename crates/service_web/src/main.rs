//! Optira web calculator
//!
//! HTTP front end serving the Monte Carlo option calculator form.

use clap::Parser;
use service_web::config::{build_config, CliArgs as ConfigCliArgs};
use service_web::server::Server;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Optira web calculator - HTML front end for Monte Carlo option pricing
#[derive(Parser, Debug)]
#[command(name = "optira_web")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "OPTIRA_WEB_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "OPTIRA_WEB_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "OPTIRA_LOG_LEVEL")]
    log_level: Option<String>,
}

impl From<Args> for ConfigCliArgs {
    fn from(args: Args) -> Self {
        ConfigCliArgs {
            config_file: args.config,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let cli_args: ConfigCliArgs = args.into();
    let config = build_config(&cli_args)?;

    init_tracing(config.log_level.as_filter_str());

    tracing::info!("Optira web calculator v{}", service_web::VERSION);
    tracing::info!(
        host = %config.host,
        port = %config.port,
        log_level = %config.log_level,
        "Server configuration loaded"
    );

    let server = Server::new(config);
    tracing::info!(address = %server.socket_addr(), "Starting server");

    server.run().await?;

    Ok(())
}
