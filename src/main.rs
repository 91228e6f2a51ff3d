//! Vanity import path server.
//!
//! Serves `go-import` / `go-source` meta tags for import paths under a custom
//! domain, restricting selected paths to allowlisted client addresses.
//!
//! ```text
//!     go get example.com/pkg/foo
//!            │
//!            ▼
//!     ┌─────────────┐    ┌──────────────┐    ┌───────────────┐    ┌──────────┐
//!     │ http server │───▶│ path table   │───▶│ client ip +   │───▶│ render   │──▶ 200 meta tags
//!     └─────────────┘    └──────┬───────┘    │ allowlist     │    └──────────┘
//!                               │            └──────┬────────┘
//!                               ▼                   ▼
//!                              404            302 fallback URL
//! ```

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tokio::net::TcpListener;

use vanity_imports::config::validation::ValidationError;
use vanity_imports::config::ConfigError;
use vanity_imports::lifecycle::signals::wait_for_signal;
use vanity_imports::lifecycle::startup::{prepare_config, Overrides};
use vanity_imports::observability::{logging, metrics};
use vanity_imports::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "vanity-imports")]
#[command(about = "Custom domain import path service", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "vanity.toml")]
    config: PathBuf,

    /// Custom domain name, e.g. example.com (overrides server.host).
    #[arg(long)]
    host: Option<String>,

    /// Listen address (overrides server.bind_address).
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = Overrides {
        host: cli.host,
        bind_address: cli.bind,
    };
    let config = match prepare_config(&cli.config, overrides) {
        Ok(config) => config,
        Err(ConfigError::Validation(errors)) if errors.contains(&ValidationError::MissingHost) => {
            Cli::command().print_help()?;
            return Err(ConfigError::Validation(errors).into());
        }
        Err(e) => return Err(e.into()),
    };

    logging::init_logging(&config.observability.log_level)?;

    tracing::info!(
        host = %config.server.host,
        bind_address = %config.server.bind_address,
        paths = config.paths.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
