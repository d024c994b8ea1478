//! Config loading helpers (defaults + file + env).
//!
//! The loader owns deterministic merge order and surfaces user-facing errors
//! as typed `ErrorEnvelope`s.

use crate::env::{LoggerEnv, apply_env_overrides};
use crate::schema::LoggerConfig;
use oplog_shared::{ErrorCode, ErrorEnvelope};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

/// Load the logger config from an optional file path plus env overrides.
///
/// Precedence (highest wins):
/// - env overrides (`LoggerEnv`)
/// - config file content
/// - defaults (`LoggerConfig::default()`)
pub fn load_logger_config(
    config_path: Option<&Path>,
    env: &LoggerEnv,
) -> Result<LoggerConfig, ErrorEnvelope> {
    let config = match config_path {
        None => LoggerConfig::default(),
        Some(path) => {
            let text = read_config_file(path)?;
            let format = detect_config_format(path)?;
            parse_config(&text, format)?
        },
    };
    Ok(apply_env_overrides(config, env))
}

/// Load the logger config from std env and an optional file path.
pub fn load_logger_config_std_env(
    config_path: Option<&Path>,
) -> Result<LoggerConfig, ErrorEnvelope> {
    let env = LoggerEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_logger_config(config_path, &env)
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::config(),
            format!("failed to read config file: {error}"),
        )
        .with_metadata("path", path.display().to_string())
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        _ => Err(ErrorEnvelope::expected(
            ErrorCode::config(),
            "config file must use a .json or .toml extension",
        )
        .with_metadata("path", path.display().to_string())),
    }
}

fn parse_config(text: &str, format: ConfigFormat) -> Result<LoggerConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(text).map_err(|error| {
            ErrorEnvelope::expected(ErrorCode::config(), format!("invalid config JSON: {error}"))
        }),
        ConfigFormat::Toml => toml::from_str(text).map_err(|error| {
            ErrorEnvelope::expected(ErrorCode::config(), format!("invalid config TOML: {error}"))
        }),
    }
}
