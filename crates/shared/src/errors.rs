//! Error envelope types and helpers.
//!
//! Logging itself never surfaces errors to callers (delivery failures are the
//! backend's concern); the envelope exists for the fallible edges of the
//! crate: configuration loading and transport construction.

use crate::redaction::redact_if_secret;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fmt, io};

/// Metadata attached to errors for diagnostics.
///
/// Values are redacted on insertion when the key looks secret-bearing, so an
/// envelope can always be printed or logged as-is.
pub type ErrorMetadata = BTreeMap<String, String>;

/// High-level classification of error origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Expected failures (bad configuration, unreadable files, user input).
    Expected,
    /// Unexpected failures (I/O, external dependencies).
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected => formatter.write_str("expected"),
            Self::Unexpected => formatter.write_str("unexpected"),
        }
    }
}

/// Stable error code with namespace and identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode {
    namespace: String,
    code: String,
}

impl ErrorCode {
    /// Create a new error code with a namespace and code.
    pub fn new(namespace: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            code: code.into(),
        }
    }

    /// Invalid input code.
    pub fn invalid_input() -> Self {
        Self::new("core", "invalid_input")
    }

    /// I/O error code.
    pub fn io() -> Self {
        Self::new("core", "io")
    }

    /// Configuration error code.
    pub fn config() -> Self {
        Self::new("config", "invalid")
    }

    /// Credential loading error code.
    pub fn credentials() -> Self {
        Self::new("cloud", "credentials")
    }

    /// Transport construction error code.
    pub fn transport() -> Self {
        Self::new("cloud", "transport")
    }

    /// Returns the namespace portion.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the code identifier.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.namespace, self.code)
    }
}

/// Structured error envelope shared across crates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Error kind describing the origin category.
    pub kind: ErrorKind,
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Additional diagnostic metadata (secret values already redacted).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: ErrorMetadata,
}

impl ErrorEnvelope {
    /// Create an expected error.
    pub fn expected(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Expected,
            code,
            message: message.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Create an unexpected error.
    pub fn unexpected(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Unexpected,
            code,
            message: message.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a single metadata entry.
    ///
    /// The value is redacted when the key names a secret.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = redact_if_secret(&key, &value.into());
        self.metadata.insert(key, value);
        self
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} {}: {}", self.kind, self.code, self.message)
    }
}

impl std::error::Error for ErrorEnvelope {}

impl From<io::Error> for ErrorEnvelope {
    fn from(error: io::Error) -> Self {
        Self::unexpected(ErrorCode::io(), error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorCode, ErrorEnvelope, ErrorKind};

    #[test]
    fn expected_envelope_carries_code_and_message() {
        let error = ErrorEnvelope::expected(ErrorCode::config(), "bad value");
        assert_eq!(error.kind, ErrorKind::Expected);
        assert_eq!(error.code, ErrorCode::config());
        assert_eq!(error.to_string(), "expected config:invalid: bad value");
    }

    #[test]
    fn metadata_redacts_secret_keys_on_insertion() {
        let error = ErrorEnvelope::expected(ErrorCode::credentials(), "unreadable")
            .with_metadata("credentialsPath", "/etc/keys/svc.json")
            .with_metadata("attempt", "1");
        assert_eq!(
            error.metadata.get("credentialsPath").map(String::as_str),
            Some("[REDACTED]")
        );
        assert_eq!(error.metadata.get("attempt").map(String::as_str), Some("1"));
    }

    #[test]
    fn io_errors_convert_to_unexpected() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = ErrorEnvelope::from(io_error);
        assert_eq!(error.kind, ErrorKind::Unexpected);
        assert_eq!(error.code, ErrorCode::io());
    }
}
