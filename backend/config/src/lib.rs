//! `legalens-config`: runtime configuration for the legalens service.
//!
//! Provides:
//! - Typed config schema (server, extraction, OCR, chat, logging)
//! - YAML loading from the config directory
//! - `${ENV_VAR}` substitution and environment overrides
//! - Config redaction for safe display
//! - Default value application
//! - Validation with errors and warnings

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use schema::{
    ChatConfig, ChatProviderKind, ExtractionConfig, LegalensConfig, LoggingConfig, OcrConfig,
    OcrEngineKind, ServerConfig,
};
pub use io::{config_dir, config_file_path, load_config};
pub use env::{apply_env_overrides_with, resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use redact::redact;
pub use defaults::apply_all_defaults;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Load, apply env substitution and overrides, apply defaults, and log the
/// validation report.
///
/// This is the main entry point for loading a config at runtime.
pub async fn load_and_prepare(path: &Path) -> Result<(LegalensConfig, ValidationReport)> {
    let env: HashMap<String, String> = std::env::vars().collect();
    let raw_config = load_config(path).await?;
    prepare(raw_config, &env)
}

/// The pure part of [`load_and_prepare`], with an explicit environment.
pub fn prepare(
    raw_config: LegalensConfig,
    env: &HashMap<String, String>,
) -> Result<(LegalensConfig, ValidationReport)> {
    let value: Value = serde_json::to_value(&raw_config)
        .context("Failed to serialize config for processing")?;

    // Substitute ${VAR} env vars.
    let value = resolve_env_vars_with(&value, env).context("Failed to resolve env vars in config")?;

    let config: LegalensConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_env_overrides_with(config, env);
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }

    Ok((config, report))
}
