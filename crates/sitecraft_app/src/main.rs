mod cli;
mod commands;
mod config;
mod logging;

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sitecraft_engine::GeminiClient;
use sitecraft_logging::{site_error, site_info, site_warn};

use crate::cli::Cli;
use crate::config::{api_key_from, load_config, API_KEY_VARS, DEFAULT_CONFIG_FILE};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let loaded = load_config(&config_path);
    let config = loaded.config;

    logging::initialize(
        cli.log.unwrap_or(config.log_destination),
        logging::level_for(cli.verbose),
    );
    if let Some(warning) = loaded.warning {
        site_warn!("{}", warning);
    }
    site_info!("sitecraft {} starting", env!("CARGO_PKG_VERSION"));

    let api_key = api_key_from(|name| env::var(name).ok())
        .with_context(|| format!("no API key found; set one of {}", API_KEY_VARS.join(", ")))?;
    let client = GeminiClient::new(config.model_settings(api_key)).context("model settings")?;

    let result = commands::run(cli.command, &client, config.invocation_timeout()).await;
    if let Err(err) = &result {
        site_error!("{:#}", err);
    }
    result
}
