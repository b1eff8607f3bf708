// SPDX-License-Identifier: AGPL-3.0-or-later

mod config;
mod utils;

use std::convert::TryFrom;

use anyhow::{Context, Result};
use explorer::{Configuration, Explorer};
use log::error;

use crate::config::{load_config, print_config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from command line arguments, environment variables and .toml file
    let (config_file_path, config_file) = load_config().context("Could not load configuration")?;

    // Set log verbosity based on config. By default scope it always to the "explorer" module.
    setup_logging(&config_file.log_level);

    // Check if given configuration values are valid
    let config = Configuration::try_from(config_file).context("Invalid configuration")?;

    // Show configuration info to the user
    println!("{}", print_config(config_file_path, &config));

    // Load service registry and start HTTP server in async runtime
    let explorer = match Explorer::start(config).await {
        Ok(explorer) => explorer,
        Err(err) => {
            error!("Could not start explorer: {:#}", err);
            return Err(err);
        }
    };

    // Run this until [CTRL] + [C] got pressed or something went wrong
    tokio::select! {
        _ = tokio::signal::ctrl_c() => (),
        _ = explorer.on_exit() => (),
    }

    // Wait until the HTTP server is gracefully shut down and exit
    explorer.shutdown().await;

    Ok(())
}

fn setup_logging(log_level: &str) {
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
        return;
    }

    let mut builder = env_logger::Builder::new();

    // Use `RUST_LOG` environment variable if set, otherwise scope the level to our crate
    let filter = if log_level.contains('=') {
        log_level.to_string()
    } else {
        format!("explorer={}", log_level)
    };
    builder.parse_filters(&filter);

    builder.init();
}
