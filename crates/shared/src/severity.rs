//! Severity model: a total order over named log levels.
//!
//! The order is TRACE < DEBUG < INFO < WARN < ERROR < FATAL. The same
//! ordering drives two different decisions:
//!
//! - whole-record enablement at the facade/adapter boundary
//!   ("is this level enabled right now"), and
//! - per-field visibility inside an operation log ("is this field urgent
//!   enough to appear at the current level").

use serde::{Deserialize, Serialize};
use std::fmt;

/// Log severity, ordered from most verbose to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Finest-grained diagnostics.
    Trace,
    /// Developer diagnostics.
    Debug,
    /// Normal operational records.
    Info,
    /// Recoverable anomalies.
    Warn,
    /// Operation failures.
    Error,
    /// Unrecoverable failures.
    Fatal,
}

impl Severity {
    /// Configuration vocabulary, uppercase, matching the config surface.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// Parse a severity from the configuration vocabulary.
    ///
    /// The match is case-sensitive; anything other than the exact uppercase
    /// names yields `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "TRACE" => Some(Self::Trace),
            "DEBUG" => Some(Self::Debug),
            "INFO" => Some(Self::Info),
            "WARN" => Some(Self::Warn),
            "ERROR" => Some(Self::Error),
            "FATAL" => Some(Self::Fatal),
            _ => None,
        }
    }

    /// Returns true when `candidate` records are emitted while `self` is the
    /// configured level: a candidate passes iff it is at least as urgent.
    #[must_use]
    pub fn enables(self, candidate: Self) -> bool {
        candidate >= self
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
