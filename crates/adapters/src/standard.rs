//! Local backend adapter over the `log` crate.
//!
//! This is the default backend: emissions are forwarded to whatever `log`
//! implementation the host application installed. Enablement is fully
//! delegated to that implementation, so per-module filtering (e.g.
//! `RUST_LOG=info,my_service=debug` under `env_logger`) applies without any
//! configuration in this crate.

use log::{Level, Record};
use oplog_ports::{LogFields, LoggerAdapter, attach_error, redact_fields};
use oplog_shared::Severity;
use std::error::Error;
use std::fmt;

/// Adapter forwarding emissions to the installed `log` backend.
///
/// One adapter carries one target (the emitting unit's name), which the
/// backend uses for per-module filtering and record attribution.
pub struct StdLogAdapter {
    target: Box<str>,
}

impl StdLogAdapter {
    /// Create an adapter emitting under the given target.
    #[must_use]
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_owned().into_boxed_str(),
        }
    }

    fn backend_enabled(&self, level: Level) -> bool {
        level <= log::max_level()
            && log::logger().enabled(
                &log::Metadata::builder()
                    .level(level)
                    .target(&self.target)
                    .build(),
            )
    }

    fn forward(&self, level: Level, message: fmt::Arguments<'_>) {
        log::logger().log(
            &Record::builder()
                .args(message)
                .level(level)
                .target(&self.target)
                .build(),
        );
    }
}

/// The backend's native level for a severity. The backend has no FATAL;
/// FATAL records ride its most severe level.
const fn backend_level(severity: Severity) -> Level {
    match severity {
        Severity::Trace => Level::Trace,
        Severity::Debug => Level::Debug,
        Severity::Info => Level::Info,
        Severity::Warn => Level::Warn,
        Severity::Error | Severity::Fatal => Level::Error,
    }
}

impl LoggerAdapter for StdLogAdapter {
    fn enabled(&self, severity: Severity) -> bool {
        self.backend_enabled(backend_level(severity))
    }

    fn log_args(
        &self,
        severity: Severity,
        message: fmt::Arguments<'_>,
        error: Option<&(dyn Error + 'static)>,
    ) {
        if !self.enabled(severity) {
            return;
        }
        let level = backend_level(severity);
        match error {
            None => self.forward(level, message),
            Some(error) => {
                let chain = oplog_ports::render_error_chain(error);
                self.forward(level, format_args!("{message}\n{chain}"));
            },
        }
    }

    fn log_fields(
        &self,
        severity: Severity,
        mut fields: LogFields,
        error: Option<&(dyn Error + 'static)>,
    ) {
        if !self.enabled(severity) {
            return;
        }
        redact_fields(&mut fields);
        if let Some(error) = error {
            attach_error(&mut fields, error);
        }
        let payload = serde_json::to_string(&fields)
            .unwrap_or_else(|_| "{\"_message\":\"log serialization failed\"}".to_string());
        self.forward(backend_level(severity), format_args!("{payload}"));
    }

    fn level(&self) -> Severity {
        // The backend exposes enablement as a per-record query, not a level;
        // the effective level is the most verbose severity it still admits.
        for severity in [
            Severity::Trace,
            Severity::Debug,
            Severity::Info,
            Severity::Warn,
            Severity::Error,
        ] {
            if self.enabled(severity) {
                return severity;
            }
        }
        Severity::Fatal
    }
}
