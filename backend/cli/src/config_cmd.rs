//! `legalens check-config`: print the validation report and the effective
//! config with secrets masked.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use legalens_config::{redact, LegalensConfig, ValidationReport};

use crate::terminal_output::{note_error, note_success, note_warn};

pub fn run(path: &Path, config: &LegalensConfig, report: &ValidationReport) -> Result<ExitCode> {
    println!("Config file: {}", path.display());
    println!("{}", serde_json::to_string_pretty(&redact(&serde_json::to_value(config)?))?);

    for warning in &report.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    for error in &report.errors {
        note_error(&format!("{}: {}", error.path, error.message));
    }

    if report.is_valid() {
        note_success("Config is valid");
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
