//! Configuration schema types and defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default field name carrying the correlation id in emitted records.
pub const DEFAULT_CONTEXT_FIELD: &str = "_contextId";

/// Default minimum severity for the cloud backend.
pub const DEFAULT_CLOUD_SEVERITY: &str = "INFO";

/// Process-wide logging configuration.
///
/// Constructed explicitly and passed into facade constructors; there is no
/// hidden global. A default value selects the local backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Route emissions to the cloud backend instead of the local one.
    pub use_cloud: bool,
    /// Field name carrying the correlation id in emitted records.
    pub context_field_name: String,
    /// Cloud backend settings (ignored while `use_cloud` is false).
    pub cloud: CloudConfig,
}

impl LoggerConfig {
    /// Normalize user-supplied values, falling back to defaults where the
    /// input is unusable (blank context field name).
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.context_field_name.trim().is_empty() {
            self.context_field_name = DEFAULT_CONTEXT_FIELD.to_string();
        } else {
            self.context_field_name = self.context_field_name.trim().to_string();
        }
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            use_cloud: false,
            context_field_name: DEFAULT_CONTEXT_FIELD.to_string(),
            cloud: CloudConfig::default(),
        }
    }
}

/// Cloud backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloudConfig {
    /// Minimum severity submitted to the remote sink.
    ///
    /// One of TRACE/DEBUG/INFO/WARN/ERROR/FATAL, case-sensitive. Any other
    /// value disables the cloud adapter entirely.
    pub severity_threshold: String,
    /// Path of the credentials file for the remote sink.
    pub credentials_path: Option<PathBuf>,
    /// Project the remote log streams live under.
    pub project_id: Option<String>,
    /// Write endpoint override (self-hosted sinks, tests).
    pub endpoint: Option<String>,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            severity_threshold: DEFAULT_CLOUD_SEVERITY.to_string(),
            credentials_path: None,
            project_id: None,
            endpoint: None,
        }
    }
}
