//! # oplog-facade
//!
//! The logging facade consumers hold: level-gated emission methods over one
//! pluggable backend adapter, plus operation logs bracketing a unit of work.
//!
//! An [`OpLogger`] wraps the enablement check the call sites would otherwise
//! repeat before every record. Instead of
//!
//! ```ignore
//! if logger.enabled(Severity::Debug) {
//!     logger.log_args(Severity::Debug, format_args!("loaded {count} items"), None);
//! }
//! ```
//!
//! callers write
//!
//! ```ignore
//! logger.debug(format_args!("loaded {count} items"));
//! ```
//!
//! The facade is cheap to clone and safe to share: it holds no per-call
//! state beyond the adapter reference. Create one per emitting unit (type or
//! module) and reuse it.

pub mod operation;

pub use operation::OperationLog;

use oplog_adapters::{CloudLogAdapter, StdLogAdapter};
use oplog_config::LoggerConfig;
use oplog_ports::{LogFields, LoggerAdapter};
use oplog_shared::Severity;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Level-gated logging facade over one backend adapter.
///
/// The adapter variant is selected once at construction from the injected
/// [`LoggerConfig`]; call sites never change when the backend does.
#[derive(Clone)]
pub struct OpLogger {
    adapter: Arc<dyn LoggerAdapter>,
    context_field: Arc<str>,
}

impl OpLogger {
    /// Create a facade for the given emitting unit.
    ///
    /// `target` names the unit (typically the module path); the local backend
    /// uses it for per-module filtering, the cloud backend as the log stream
    /// name. `config.use_cloud` picks the backend variant.
    #[must_use]
    pub fn new(target: &str, config: &LoggerConfig) -> Self {
        let adapter: Arc<dyn LoggerAdapter> = if config.use_cloud {
            Arc::new(CloudLogAdapter::new(target, &config.cloud))
        } else {
            Arc::new(StdLogAdapter::new(target))
        };
        Self::with_adapter(adapter, config)
    }

    /// Create a facade over an explicit adapter (custom backends, tests).
    #[must_use]
    pub fn with_adapter(adapter: Arc<dyn LoggerAdapter>, config: &LoggerConfig) -> Self {
        Self {
            adapter,
            context_field: Arc::from(config.context_field_name.as_str()),
        }
    }

    /// Log a formatted message on TRACE, if and only if TRACE is enabled.
    pub fn trace(&self, message: fmt::Arguments<'_>) {
        self.adapter.log_args(Severity::Trace, message, None);
    }

    /// Like [`Self::trace`], additionally appending the given error.
    pub fn trace_err(&self, message: fmt::Arguments<'_>, error: &(dyn Error + 'static)) {
        self.adapter.log_args(Severity::Trace, message, Some(error));
    }

    /// Log a structured field map on TRACE.
    pub fn trace_fields(&self, fields: LogFields) {
        self.adapter.log_fields(Severity::Trace, fields, None);
    }

    /// Log a formatted message on DEBUG, if and only if DEBUG is enabled.
    pub fn debug(&self, message: fmt::Arguments<'_>) {
        self.adapter.log_args(Severity::Debug, message, None);
    }

    /// Like [`Self::debug`], additionally appending the given error.
    pub fn debug_err(&self, message: fmt::Arguments<'_>, error: &(dyn Error + 'static)) {
        self.adapter.log_args(Severity::Debug, message, Some(error));
    }

    /// Log a structured field map on DEBUG.
    pub fn debug_fields(&self, fields: LogFields) {
        self.adapter.log_fields(Severity::Debug, fields, None);
    }

    /// Log a formatted message on INFO, if and only if INFO is enabled.
    pub fn info(&self, message: fmt::Arguments<'_>) {
        self.adapter.log_args(Severity::Info, message, None);
    }

    /// Like [`Self::info`], additionally appending the given error.
    pub fn info_err(&self, message: fmt::Arguments<'_>, error: &(dyn Error + 'static)) {
        self.adapter.log_args(Severity::Info, message, Some(error));
    }

    /// Log a structured field map on INFO.
    pub fn info_fields(&self, fields: LogFields) {
        self.adapter.log_fields(Severity::Info, fields, None);
    }

    /// Log a formatted message on WARN.
    pub fn warn(&self, message: fmt::Arguments<'_>) {
        self.adapter.log_args(Severity::Warn, message, None);
    }

    /// Like [`Self::warn`], additionally appending the given error.
    pub fn warn_err(&self, message: fmt::Arguments<'_>, error: &(dyn Error + 'static)) {
        self.adapter.log_args(Severity::Warn, message, Some(error));
    }

    /// Log a structured field map on WARN.
    pub fn warn_fields(&self, fields: LogFields) {
        self.adapter.log_fields(Severity::Warn, fields, None);
    }

    /// Like [`Self::warn_fields`], additionally attaching the given error.
    pub fn warn_fields_err(&self, fields: LogFields, error: &(dyn Error + 'static)) {
        self.adapter.log_fields(Severity::Warn, fields, Some(error));
    }

    /// Log a formatted message on ERROR.
    pub fn error(&self, message: fmt::Arguments<'_>) {
        self.adapter.log_args(Severity::Error, message, None);
    }

    /// Like [`Self::error`], additionally appending the given error.
    pub fn error_err(&self, message: fmt::Arguments<'_>, error: &(dyn Error + 'static)) {
        self.adapter.log_args(Severity::Error, message, Some(error));
    }

    /// Log a structured field map on ERROR.
    pub fn error_fields(&self, fields: LogFields) {
        self.adapter.log_fields(Severity::Error, fields, None);
    }

    /// Like [`Self::error_fields`], additionally attaching the given error.
    pub fn error_fields_err(&self, fields: LogFields, error: &(dyn Error + 'static)) {
        self.adapter.log_fields(Severity::Error, fields, Some(error));
    }

    /// Log a formatted message on FATAL.
    pub fn fatal(&self, message: fmt::Arguments<'_>) {
        self.adapter.log_args(Severity::Fatal, message, None);
    }

    /// Like [`Self::fatal`], additionally appending the given error.
    pub fn fatal_err(&self, message: fmt::Arguments<'_>, error: &(dyn Error + 'static)) {
        self.adapter.log_args(Severity::Fatal, message, Some(error));
    }

    /// Log a structured field map on FATAL.
    pub fn fatal_fields(&self, fields: LogFields) {
        self.adapter.log_fields(Severity::Fatal, fields, None);
    }

    /// The backend's currently enabled minimum level.
    ///
    /// Operation logs filter their fields against this value, which couples
    /// field visibility to the adapter's enablement rather than a separate
    /// facade setting.
    #[must_use]
    pub fn level(&self) -> Severity {
        self.adapter.level()
    }

    /// Start an operation log with the default INFO exit level.
    ///
    /// The TRACE "started" record is emitted before this returns.
    #[must_use]
    pub fn start_operation(&self, name: &str) -> OperationLog {
        OperationLog::new(name, self.clone(), Severity::Info).log_start()
    }

    /// Start an operation log that exits at the given level on success.
    #[must_use]
    pub fn start_operation_at(&self, name: &str, exit_level: Severity) -> OperationLog {
        OperationLog::new(name, self.clone(), exit_level).log_start()
    }

    /// Start an operation log chained to a previous operation's context id.
    ///
    /// Blank ids are ignored and the freshly generated id is kept.
    #[must_use]
    pub fn start_linked_operation(&self, name: &str, context_id: &str) -> OperationLog {
        OperationLog::new(name, self.clone(), Severity::Info)
            .chain(context_id)
            .log_start()
    }

    /// Start a chained operation log with an explicit exit level.
    #[must_use]
    pub fn start_linked_operation_at(
        &self,
        name: &str,
        context_id: &str,
        exit_level: Severity,
    ) -> OperationLog {
        OperationLog::new(name, self.clone(), exit_level)
            .chain(context_id)
            .log_start()
    }

    /// Field name carrying the correlation id in emitted records.
    pub(crate) fn context_field(&self) -> &str {
        &self.context_field
    }

    /// Severity-parameterized field emission used by operation logs.
    pub(crate) fn emit_fields(
        &self,
        severity: Severity,
        fields: LogFields,
        error: Option<&(dyn Error + 'static)>,
    ) {
        self.adapter.log_fields(severity, fields, error);
    }
}

/// Returns the facade crate version.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
