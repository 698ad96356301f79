//! Batch diagnosis of a structure file.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::output::progress::{diagnosis_spinner, ProgressBarExt};
use crate::cli::display::ReportOutput;
use crate::cli::output::output;
use crate::cli::AppContext;
use crate::domain::models::StructureDocument;
use crate::services::{DiagnosisDispatcher, Session};

#[derive(Args, Debug)]
pub struct DiagnoseArgs {
    /// Structure file (YAML or JSON): `goal` plus `criteria: [{name, items}]`
    #[arg(short, long, value_name = "FILE")]
    pub file: PathBuf,
}

/// Read a structure document, choosing the format by extension.
///
/// Anything that is not `.json` is parsed as YAML.
pub fn load_document(path: &Path) -> Result<StructureDocument> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read structure file {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON structure in {}", path.display()))
    } else {
        serde_yaml::from_str(&raw)
            .with_context(|| format!("Invalid YAML structure in {}", path.display()))
    }
}

pub async fn execute(args: DiagnoseArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    let document = load_document(&args.file)?;
    info!(file = %args.file.display(), criteria = document.criteria.len(), "structure loaded");

    let mut session = Session::from_document(&document);
    let dispatcher = DiagnosisDispatcher::new(ctx.generator.generator.clone());

    let spinner = diagnosis_spinner(session.structure().len(), json_mode);
    match session.run_diagnosis(&dispatcher).await {
        Ok(report) => {
            spinner.finish_and_clear();
            output(&ReportOutput::new(report), json_mode);
            Ok(())
        }
        Err(err) => {
            spinner.finish_error(err.to_string());
            Err(err).with_context(|| format!("Cannot diagnose {}", args.file.display()))
        }
    }
}
