//! cachekey CLI Binary
//!
//! Command-line interface for graph and foreign build hashing.

use cachekey::cli::{Cli, RunContext};
use cachekey::config::ConfigLoader;
use cachekey::logging::{init_logging, LoggingConfig};
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(&cli) {
        error!("Command failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let context = RunContext::new(cli.workspace.clone(), cli.config.clone())?;
    info!(workspace = %cli.workspace.display(), "CLI context initialized");
    let output = context.execute(&cli.command)?;
    println!("{}", output);
    Ok(())
}

/// Build logging configuration from CLI args and config file
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    // If --verbose is not set, only errors are logged
    if !cli.verbose {
        return LoggingConfig {
            level: "error".to_string(),
            ..LoggingConfig::default()
        };
    }

    let mut config = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path)
            .map(|c| c.logging)
            .unwrap_or_default(),
        None => ConfigLoader::load(&cli.workspace)
            .map(|c| c.logging)
            .unwrap_or_default(),
    };

    match cli.log_level {
        Some(ref level) => config.level = level.clone(),
        // --verbose shows at least info events
        None if matches!(config.level.as_str(), "warn" | "error" | "off") => {
            config.level = "info".to_string()
        }
        None => {}
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }
    config
}
