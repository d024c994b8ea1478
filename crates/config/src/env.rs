//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict (invalid booleans fail fast) and side-effect free:
//! `LoggerEnv` is a plain value that can be built from any map, which keeps
//! tests away from process-global state.

use crate::schema::LoggerConfig;
use oplog_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Env var: route emissions to the cloud backend.
pub const ENV_USE_CLOUD: &str = "OPLOG_USE_CLOUD";
/// Env var: correlation-id field name.
pub const ENV_CONTEXT_FIELD_NAME: &str = "OPLOG_CONTEXT_FIELD_NAME";
/// Env var: cloud minimum severity.
pub const ENV_CLOUD_SEVERITY: &str = "OPLOG_CLOUD_SEVERITY";
/// Env var: cloud credentials file path (secret).
pub const ENV_CLOUD_CREDENTIALS: &str = "OPLOG_CLOUD_CREDENTIALS";
/// Env var: cloud project id.
pub const ENV_CLOUD_PROJECT_ID: &str = "OPLOG_CLOUD_PROJECT_ID";
/// Env var: cloud write endpoint override.
pub const ENV_CLOUD_ENDPOINT: &str = "OPLOG_CLOUD_ENDPOINT";

/// Typed env-derived overrides for [`LoggerConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerEnv {
    /// Override for `useCloud`.
    pub use_cloud: Option<bool>,
    /// Override for `contextFieldName`.
    pub context_field_name: Option<String>,
    /// Override for `cloud.severityThreshold`.
    pub cloud_severity: Option<String>,
    /// Override for `cloud.credentialsPath`.
    pub cloud_credentials: Option<PathBuf>,
    /// Override for `cloud.projectId`.
    pub cloud_project_id: Option<String>,
    /// Override for `cloud.endpoint`.
    pub cloud_endpoint: Option<String>,
}

impl LoggerEnv {
    /// Parse env overrides from an arbitrary map.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            use_cloud: parse_optional_bool(map, ENV_USE_CLOUD)?,
            context_field_name: parse_optional_string(map, ENV_CONTEXT_FIELD_NAME)?,
            cloud_severity: parse_optional_string(map, ENV_CLOUD_SEVERITY)?,
            cloud_credentials: parse_optional_string(map, ENV_CLOUD_CREDENTIALS)?
                .map(PathBuf::from),
            cloud_project_id: parse_optional_string(map, ENV_CLOUD_PROJECT_ID)?,
            cloud_endpoint: parse_optional_string(map, ENV_CLOUD_ENDPOINT)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in [
            ENV_USE_CLOUD,
            ENV_CONTEXT_FIELD_NAME,
            ENV_CLOUD_SEVERITY,
            ENV_CLOUD_CREDENTIALS,
            ENV_CLOUD_PROJECT_ID,
            ENV_CLOUD_ENDPOINT,
        ] {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }
        Self::from_map(&map)
    }
}

/// Apply env overrides on top of a config value. Env wins over every other
/// source; the result is normalized.
#[must_use]
pub fn apply_env_overrides(mut config: LoggerConfig, env: &LoggerEnv) -> LoggerConfig {
    if let Some(use_cloud) = env.use_cloud {
        config.use_cloud = use_cloud;
    }
    if let Some(ref name) = env.context_field_name {
        config.context_field_name = name.clone();
    }
    if let Some(ref severity) = env.cloud_severity {
        config.cloud.severity_threshold = severity.clone();
    }
    if let Some(ref path) = env.cloud_credentials {
        config.cloud.credentials_path = Some(path.clone());
    }
    if let Some(ref project) = env.cloud_project_id {
        config.cloud.project_id = Some(project.clone());
    }
    if let Some(ref endpoint) = env.cloud_endpoint {
        config.cloud.endpoint = Some(endpoint.clone());
    }
    config.normalized()
}

fn parse_optional_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<String>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    Ok(Some(trimmed.to_string()))
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: raw.clone(),
        }),
    }
}

/// Errors produced while parsing env overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidBool { var, .. } => write!(formatter, "{var} must be a boolean"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let var = match error {
            EnvParseError::EmptyValue { var } | EnvParseError::InvalidBool { var, .. } => var,
        };
        ErrorEnvelope::expected(ErrorCode::config(), error.to_string()).with_metadata("var", var)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ENV_CLOUD_SEVERITY, ENV_CONTEXT_FIELD_NAME, ENV_USE_CLOUD, EnvParseError, LoggerEnv,
        apply_env_overrides,
    };
    use crate::schema::LoggerConfig;
    use std::collections::BTreeMap;

    fn env_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn absent_vars_parse_to_empty_overrides() {
        let env = LoggerEnv::from_map(&BTreeMap::new()).unwrap_or_default();
        assert_eq!(env, LoggerEnv::default());
    }

    #[test]
    fn bool_parsing_is_strict() {
        let env = LoggerEnv::from_map(&env_map(&[(ENV_USE_CLOUD, "true")]));
        assert_eq!(env.map(|env| env.use_cloud), Ok(Some(true)));

        let env = LoggerEnv::from_map(&env_map(&[(ENV_USE_CLOUD, "0")]));
        assert_eq!(env.map(|env| env.use_cloud), Ok(Some(false)));

        let env = LoggerEnv::from_map(&env_map(&[(ENV_USE_CLOUD, "maybe")]));
        assert!(matches!(env, Err(EnvParseError::InvalidBool { .. })));

        let env = LoggerEnv::from_map(&env_map(&[(ENV_USE_CLOUD, "  ")]));
        assert!(matches!(env, Err(EnvParseError::EmptyValue { .. })));
    }

    #[test]
    fn env_overrides_win_and_normalize() {
        let env = LoggerEnv::from_map(&env_map(&[
            (ENV_USE_CLOUD, "yes"),
            (ENV_CONTEXT_FIELD_NAME, " _traceId "),
            (ENV_CLOUD_SEVERITY, "ERROR"),
        ]))
        .unwrap_or_default();

        let config = apply_env_overrides(LoggerConfig::default(), &env);
        assert!(config.use_cloud);
        assert_eq!(config.context_field_name, "_traceId");
        assert_eq!(config.cloud.severity_threshold, "ERROR");
    }
}
