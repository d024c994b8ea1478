//! Cloud log sink boundary contract.
//!
//! The remote backend is an external capability: it accepts structured
//! entries at a severity and owns its own batching and delivery. The cloud
//! adapter builds [`CloudEntry`] values and hands them to a
//! [`CloudLogTransport`]; nothing about HTTP, credentials, or retries leaks
//! past this boundary.

use oplog_shared::Severity;
use serde_json::{Map, Value};

/// The remote sink's own severity vocabulary.
///
/// The scale is discrete and has gaps relative to [`Severity`]: the local
/// levels map onto it, ERROR landing on `Alert` and FATAL on `Emergency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudSeverity {
    /// No severity assigned (carries TRACE records).
    Default,
    /// Debug information.
    Debug,
    /// Routine information.
    Info,
    /// Potential problems.
    Warning,
    /// A person must take action immediately.
    Alert,
    /// One or more systems are unusable.
    Emergency,
}

impl CloudSeverity {
    /// Translate a local severity into the remote vocabulary.
    #[must_use]
    pub const fn from_severity(severity: Severity) -> Self {
        match severity {
            Severity::Trace => Self::Default,
            Severity::Debug => Self::Debug,
            Severity::Info => Self::Info,
            Severity::Warn => Self::Warning,
            Severity::Error => Self::Alert,
            Severity::Fatal => Self::Emergency,
        }
    }

    /// Wire name of the severity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Alert => "ALERT",
            Self::Emergency => "EMERGENCY",
        }
    }
}

/// One structured record bound for the remote sink.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudEntry {
    /// Remote severity of the record.
    pub severity: CloudSeverity,
    /// Log stream name (the emitting unit's target).
    pub log_name: Box<str>,
    /// Monitored-resource descriptor the entry is annotated with.
    pub resource_type: Box<str>,
    /// JSON payload of the record.
    pub payload: Map<String, Value>,
}

/// Boundary contract for the remote log sink.
///
/// `write` accepts an entry for delivery; `flush` asks the sink to hand its
/// buffer to the wire. Both are synchronous from the caller's perspective;
/// actual transmission may be batched inside the implementation. Delivery
/// failures are the implementation's concern and never surface here.
pub trait CloudLogTransport: Send + Sync {
    /// Accept one entry for delivery.
    fn write(&self, entry: CloudEntry);

    /// Push buffered entries toward the wire.
    fn flush(&self);
}
