//! Environment variable substitution and overrides for config values.
//!
//! Supports `${VAR_NAME}` syntax in string values, resolved at load time.
//! Only uppercase `[A-Z_][A-Z0-9_]*` variable names are matched.
//! `$${VAR}` escapes to a literal `${VAR}`.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::schema::{ChatConfig, LegalensConfig, OcrConfig, ServerConfig};

/// A reference with an optional leading `$` escape.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

pub const PORT_VAR: &str = "LEGALENS_PORT";
pub const BIND_VAR: &str = "LEGALENS_BIND";
pub const LOG_LEVEL_VAR: &str = "LEGALENS_LOG";
pub const GEMINI_KEY_VAR: &str = "GOOGLE_GENERATIVE_AI_API_KEY";

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references in a config JSON value tree, using the
/// process environment.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    substitute_value(value, &std::env::vars().collect(), "")
}

/// Substitute env vars using a provided map.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => {
            let result: Result<Vec<_>> = arr
                .iter()
                .enumerate()
                .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
                .collect();
            Ok(Value::Array(result?))
        }
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let substituted = ENV_VAR_PATTERN.replace_all(s, |caps: &Captures| {
        let var_name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{var_name}}}");
        }
        match env.get(var_name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: var_name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = missing {
        bail!(err);
    }
    Ok(substituted.into_owned())
}

/// Apply `LEGALENS_*` and API key variables on top of the file config.
///
/// The Gemini key only fills slots the file left empty.
pub fn apply_env_overrides_with(
    mut config: LegalensConfig,
    env: &HashMap<String, String>,
) -> LegalensConfig {
    if let Some(port) = env.get(PORT_VAR).and_then(|p| p.trim().parse::<u16>().ok()) {
        debug!(port, "Port overridden from environment");
        config.server.get_or_insert_with(ServerConfig::default).port = Some(port);
    }
    if let Some(bind) = env.get(BIND_VAR).filter(|b| !b.trim().is_empty()) {
        config.server.get_or_insert_with(ServerConfig::default).bind = Some(bind.trim().to_string());
    }
    if let Some(level) = env.get(LOG_LEVEL_VAR).filter(|l| !l.trim().is_empty()) {
        config.logging.get_or_insert_with(Default::default).level = Some(level.trim().to_string());
    }
    if let Some(key) = env.get(GEMINI_KEY_VAR).filter(|k| !k.is_empty()) {
        let chat = config.chat.get_or_insert_with(ChatConfig::default);
        if chat.api_key.as_deref().map_or(true, str::is_empty) {
            chat.api_key = Some(key.clone());
        }
        let ocr = config.ocr.get_or_insert_with(OcrConfig::default);
        if ocr.api_key.as_deref().map_or(true, str::is_empty) {
            ocr.api_key = Some(key.clone());
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn substitutes_simple_var() {
        let v = json!({"apiKey": "${GEMINI_KEY}"});
        let result = resolve_env_vars_with(&v, &env(&[("GEMINI_KEY", "AIza-abc")])).unwrap();
        assert_eq!(result["apiKey"], "AIza-abc");
    }

    #[test]
    fn error_names_var_and_path() {
        let v = json!({"chat": {"apiKey": "${MISSING_VAR}"}});
        let err = resolve_env_vars_with(&v, &HashMap::new()).unwrap_err().to_string();
        assert!(err.contains("MISSING_VAR"));
        assert!(err.contains("chat.apiKey"));
    }

    #[test]
    fn escaped_reference_is_kept_literally() {
        let v = json!({"note": "$${HOME} and ${USER_NAME}"});
        let result = resolve_env_vars_with(&v, &env(&[("USER_NAME", "ana")])).unwrap();
        assert_eq!(result["note"], "${HOME} and ana");
    }

    #[test]
    fn passthrough_non_var_strings() {
        let v = json!({"key": "plain $ string", "n": 3});
        let result = resolve_env_vars_with(&v, &HashMap::new()).unwrap();
        assert_eq!(result["key"], "plain $ string");
        assert_eq!(result["n"], 3);
    }

    #[test]
    fn overrides_port_and_fills_keys() {
        let config = apply_env_overrides_with(
            LegalensConfig::default(),
            &env(&[(PORT_VAR, "8088"), (GEMINI_KEY_VAR, "AIza-env")]),
        );
        assert_eq!(config.port(), 8088);
        assert_eq!(config.chat_api_key(), Some("AIza-env"));
        assert_eq!(config.ocr_api_key(), Some("AIza-env"));
    }

    #[test]
    fn file_key_wins_over_environment() {
        let mut config = LegalensConfig::default();
        config.chat = Some(ChatConfig {
            api_key: Some("from-file".into()),
            ..Default::default()
        });
        let config = apply_env_overrides_with(config, &env(&[(GEMINI_KEY_VAR, "from-env")]));
        assert_eq!(config.chat_api_key(), Some("from-file"));
    }

    #[test]
    fn unparsable_port_is_ignored() {
        let config = apply_env_overrides_with(LegalensConfig::default(), &env(&[(PORT_VAR, "http")]));
        assert_eq!(config.server.as_ref().and_then(|s| s.port), None);
    }
}
