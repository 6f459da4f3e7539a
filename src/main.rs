//! suburbweb main entry point

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use suburbweb_api::start_server;
use suburbweb_client::HttpSuburbApi;
use suburbweb_config::{Config, ConfigError};
use suburbweb_core::Dashboard;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "suburbweb")]
#[command(version = "0.1.0")]
#[command(about = "Suburb real-estate insights dashboard", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "suburbweb.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

/// Startup error carrying the field and suggestions for the operator
fn config_failure(err: ConfigError) -> anyhow::Error {
    anyhow::anyhow!("{}: {}", err.severity(), err.to_details())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let mut config = Config::load_or_default(&args.config)
        .map_err(config_failure)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    config
        .apply_env_overrides()
        .map_err(config_failure)
        .context("Invalid environment override")?;

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level)).init();

    config
        .validate()
        .map_err(config_failure)
        .context("Invalid configuration")?;
    log::info!(
        "Config loaded: upstream={}, timeout={}s, raw endpoints={}",
        config.api.base_url,
        config.api.timeout_secs,
        config.api.raw_endpoints.len()
    );

    let api = HttpSuburbApi::from_config(&config.api).context("Failed to build HTTP client")?;
    let dashboard = Dashboard::new(&config, Arc::new(api)).context("Failed to set up dashboard")?;

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, Arc::new(dashboard)))
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_failure_shows_suggestions() {
        let err = config_failure(ConfigError::InvalidValue {
            field: "api.timeout_secs".to_string(),
            reason: "Timeout must be between 1 and 120 seconds".to_string(),
        });
        let text = format!("{:#}", err.context("Invalid configuration"));

        assert!(text.starts_with("Invalid configuration: error: [INVALID_VALUE]"));
        assert!(text.contains("Field: api.timeout_secs"));
        assert!(text.contains("  - Timeout must be between 1 and 120 seconds"));
    }
}
