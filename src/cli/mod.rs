//! Command-line interface.
//!
//! `main` parses [`Cli`], then hands each command its arguments together with
//! the process-wide [`AppContext`] and the global `--json` flag.

pub mod commands;
pub mod display;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::models::Config;
use crate::infrastructure::setup::GeneratorSetup;

pub use commands::{diagnose::DiagnoseArgs, session::SessionArgs};

#[derive(Parser, Debug)]
#[command(name = "ahp-diagnoser")]
#[command(about = "Build an AHP goal/criteria/sub-item structure and diagnose its logic", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this YAML file instead of .ahp/
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a structure interactively and diagnose it
    Session(SessionArgs),
    /// Diagnose a structure read from a YAML or JSON file
    Diagnose(DiagnoseArgs),
    /// Print the effective configuration (API key redacted)
    Config,
}

/// Read-only state shared by every command.
pub struct AppContext {
    pub config: Config,
    pub generator: GeneratorSetup,
}

/// Report a command failure and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{}", display::action_failure(&format!("Error: {err:#}")));
    }
    std::process::exit(1);
}
