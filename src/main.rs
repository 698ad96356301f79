//! ahp-diagnoser CLI entry point.

use anyhow::Context;
use clap::Parser;

use ahp_diagnoser::cli::{self, AppContext, Cli, Commands};
use ahp_diagnoser::infrastructure::config::ConfigLoader;
use ahp_diagnoser::infrastructure::logging::LoggerImpl;
use ahp_diagnoser::infrastructure::setup::build_text_generator;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
    .context("Failed to load configuration");
    let config = match config {
        Ok(config) => config,
        Err(err) => cli::handle_error(err, cli.json),
    };

    // Dropping the logger flushes file output, so it lives until main returns.
    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => Some(logger),
        Err(err) => {
            eprintln!("Warning: logging disabled: {err:#}");
            None
        }
    };

    let generator = build_text_generator(&config.generator);
    if let Some(reason) = &generator.configuration_error {
        if !matches!(cli.command, Commands::Config) {
            eprintln!(
                "{}",
                cli::display::action_failure(&format!("Generator configuration error: {reason}"))
            );
        }
    }

    let ctx = AppContext { config, generator };

    let result = match cli.command {
        Commands::Session(args) => cli::commands::session::execute(args, &ctx, cli.json).await,
        Commands::Diagnose(args) => cli::commands::diagnose::execute(args, &ctx, cli.json).await,
        Commands::Config => cli::commands::config::execute(&ctx, cli.json).await,
    };

    if let Err(err) = result {
        cli::handle_error(err, cli.json);
    }
}
