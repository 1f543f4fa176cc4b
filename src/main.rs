//! fileicons - per-resource icon resolution
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use fileicons::cli::{Cli, Commands};
use fileicons::config::{Config, ConfigManager};
use fileicons::error::FileIconsResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> FileIconsResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config);
    debug!("Using configuration at {}", config_manager.path().display());

    match cli.command {
        Commands::Resolve(args) => fileicons::cli::commands::resolve(args, &config).await,
        Commands::Icons(args) => fileicons::cli::commands::icons(args, &config).await,
        Commands::Cache(args) => fileicons::cli::commands::cache(args, &config).await,
        Commands::Config(args) => {
            fileicons::cli::commands::config(args, &config, &config_manager).await
        }
    }
}

/// 0 = warn, 1 = info, 2+ = debug; `general.verbose` counts as one `-v`
fn init_logging(verbose: u8, config: &Config) {
    let level = verbose.saturating_add(u8::from(config.general.verbose));
    let filter = match level {
        0 => EnvFilter::new("fileicons=warn"),
        1 => EnvFilter::new("fileicons=info"),
        _ => EnvFilter::new("fileicons=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
