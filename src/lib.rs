pub mod api;
pub mod cli;
pub mod core;
pub mod providers;
pub mod service;

pub use cli::{AppCommand, OutputFormat};

use anyhow::Result;
use service::ProviderStockService;
use tracing::{debug, info};

/// Loads configuration once, builds the provider-backed service and runs a
/// single command, printing its output. Fails when the reply is not a 200.
pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    info!("Stocks starting...");

    let config = match config_path {
        Some(path) => crate::core::config::AppConfig::load_from_path(path)?,
        None => crate::core::config::AppConfig::load()?,
    }
    .with_env_overrides();
    debug!(
        finnhub = %config.providers.finnhub.base_url,
        iex = %config.providers.iex.base_url,
        "Loaded config"
    );

    let service = ProviderStockService::from_config(&config.providers)?;
    let output = cli::execute(&service, command).await;
    println!("{}", output.render(format)?);

    if !output.reply.is_success() {
        anyhow::bail!("Request failed with status {}", output.reply.status);
    }
    Ok(())
}
