//! Operation logs: single-use structured records bracketing a unit of work.
//!
//! An operation log is created on the first line of an operation, accumulates
//! named fields while the operation runs (no I/O), and emits exactly one
//! terminal record when the operation ends:
//!
//! ```ignore
//! let logger = OpLogger::new("svc::orders", &config);
//!
//! fn place_order(logger: &OpLogger, order: &Order) {
//!     let mut operation = logger.start_operation("placeOrder");
//!     operation
//!         .add_field("orderId", order.id.as_str())
//!         .add_field_at("itemCount", order.items.len(), Severity::Debug);
//!     match submit(order) {
//!         Ok(()) => operation.succeed(),
//!         Err(error) => operation.fail_err(&error),
//!     }
//! }
//! ```
//!
//! Each field carries a minimum severity; at termination the record is
//! filtered against the facade's currently enabled level, so low-priority
//! diagnostic fields only appear when the application runs verbose.
//!
//! An operation log is bound to one call stack. It is not meant to be shared
//! across threads mid-operation; terminal methods take `&mut self` and are
//! idempotent, so a completed log silently ignores further terminal calls.

use crate::OpLogger;
use chrono::{SecondsFormat, Utc};
use oplog_ports::LogFields;
use oplog_shared::{ContextId, Severity};
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::time::Instant;

const OPERATION_NAME: &str = "_operationName";
const OPERATION_STATUS: &str = "_operationStatus";
const OPERATION_TOOK: &str = "_operationTook";
const OPERATION_STARTED: &str = "_operationStarted";

const STATUS_STARTED: &str = "started";
const STATUS_SUCCEEDED: &str = "succeeded";
const STATUS_FAILED: &str = "failed";

/// A field value tagged with the minimum severity at which it is visible.
#[derive(Debug, Clone)]
struct TaggedValue {
    severity: Severity,
    value: Value,
}

impl TaggedValue {
    fn info(value: Value) -> Self {
        Self {
            severity: Severity::Info,
            value,
        }
    }
}

/// Mutable, single-use record of one bracketed operation.
///
/// Constructed through [`OpLogger::start_operation`] and its variants, which
/// emit the TRACE "started" record before handing the log to the caller.
pub struct OperationLog {
    logger: Option<OpLogger>,
    exit_level: Severity,
    context_field: Box<str>,
    started_at: Option<Instant>,
    fields: BTreeMap<Box<str>, TaggedValue>,
    flushed: bool,
}

impl OperationLog {
    pub(crate) fn new(name: &str, logger: OpLogger, exit_level: Severity) -> Self {
        let context_field: Box<str> = logger.context_field().to_owned().into_boxed_str();
        let mut fields = BTreeMap::new();
        fields.insert(
            OPERATION_NAME.to_owned().into_boxed_str(),
            TaggedValue::info(Value::String(name.to_string())),
        );
        fields.insert(
            context_field.clone(),
            TaggedValue::info(Value::String(ContextId::generate().to_string())),
        );
        fields.insert(
            OPERATION_STATUS.to_owned().into_boxed_str(),
            TaggedValue::info(Value::String(STATUS_STARTED.to_string())),
        );
        Self {
            logger: Some(logger),
            exit_level,
            context_field,
            started_at: None,
            fields,
            flushed: false,
        }
    }

    /// Overwrite the generated context id to link this operation to a
    /// previous one. Blank ids are ignored.
    pub(crate) fn chain(mut self, context_id: &str) -> Self {
        if let Ok(context_id) = ContextId::parse(context_id) {
            self.fields.insert(
                self.context_field.clone(),
                TaggedValue::info(Value::String(context_id.to_string())),
            );
        }
        self
    }

    /// Emit the "started" record and arm the timer.
    ///
    /// The start timestamp field is added after the emission: the started
    /// record carries only the name, context id, and status.
    pub(crate) fn log_start(mut self) -> Self {
        let record = self.filtered_fields(false);
        if let Some(ref logger) = self.logger {
            logger.trace_fields(record);
        }
        self.started_at = Some(Instant::now());
        self.fields.insert(
            OPERATION_STARTED.to_owned().into_boxed_str(),
            TaggedValue::info(Value::String(
                Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            )),
        );
        self
    }

    /// Add a field visible at INFO and above.
    ///
    /// A later call with the same name replaces the earlier value. The
    /// reserved names (operation name, context id, status, elapsed time) are
    /// never overwritten: a colliding caller field is stored under a `_`
    /// prefixed alias instead.
    pub fn add_field(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.add_field_at(name, value, Severity::Info)
    }

    /// Add a field with an explicit minimum severity.
    pub fn add_field_at(
        &mut self,
        name: &str,
        value: impl Into<Value>,
        severity: Severity,
    ) -> &mut Self {
        let key: Box<str> = if self.is_reserved(name) {
            format!("_{name}").into_boxed_str()
        } else {
            name.to_owned().into_boxed_str()
        };
        self.fields.insert(
            key,
            TaggedValue {
                severity,
                value: value.into(),
            },
        );
        self
    }

    fn is_reserved(&self, name: &str) -> bool {
        name == OPERATION_NAME
            || name == OPERATION_STATUS
            || name == OPERATION_TOOK
            || name == self.context_field.as_ref()
    }

    /// Terminate successfully, emitting at the configured exit level.
    pub fn succeed(&mut self) {
        self.finish_success(self.exit_level, false);
    }

    /// Like [`Self::succeed`], emitting every field regardless of level.
    pub fn succeed_verbose(&mut self) {
        self.finish_success(self.exit_level, true);
    }

    /// Terminate successfully at an explicit level, overriding the
    /// configured exit level for this call.
    pub fn succeed_at(&mut self, level: Severity) {
        self.finish_success(level, false);
    }

    /// Like [`Self::succeed_at`], emitting every field regardless of level.
    pub fn succeed_at_verbose(&mut self, level: Severity) {
        self.finish_success(level, true);
    }

    /// Terminate with a WARN record.
    pub fn warn(&mut self) {
        self.finish_failure(Severity::Warn, None, false);
    }

    /// Like [`Self::warn`], emitting every field regardless of level.
    pub fn warn_verbose(&mut self) {
        self.finish_failure(Severity::Warn, None, true);
    }

    /// Terminate with a WARN record carrying the given error.
    pub fn warn_err(&mut self, error: &(dyn Error + 'static)) {
        self.finish_failure(Severity::Warn, Some(error), false);
    }

    /// Like [`Self::warn_err`], emitting every field regardless of level.
    pub fn warn_err_verbose(&mut self, error: &(dyn Error + 'static)) {
        self.finish_failure(Severity::Warn, Some(error), true);
    }

    /// Terminate with an ERROR record.
    pub fn fail(&mut self) {
        self.finish_failure(Severity::Error, None, false);
    }

    /// Like [`Self::fail`], emitting every field regardless of level.
    pub fn fail_verbose(&mut self) {
        self.finish_failure(Severity::Error, None, true);
    }

    /// Terminate with an ERROR record carrying the given error.
    pub fn fail_err(&mut self, error: &(dyn Error + 'static)) {
        self.finish_failure(Severity::Error, Some(error), false);
    }

    /// Like [`Self::fail_err`], emitting every field regardless of level.
    pub fn fail_err_verbose(&mut self, error: &(dyn Error + 'static)) {
        self.finish_failure(Severity::Error, Some(error), true);
    }

    /// Terminate with a FATAL record.
    pub fn fatal(&mut self) {
        self.finish_failure(Severity::Fatal, None, false);
    }

    /// Like [`Self::fatal`], emitting every field regardless of level.
    pub fn fatal_verbose(&mut self) {
        self.finish_failure(Severity::Fatal, None, true);
    }

    /// The context id of this operation, for chaining into follow-up
    /// operations. Empty once the log has flushed.
    #[must_use]
    pub fn context_id(&self) -> String {
        self.fields
            .get(self.context_field.as_ref())
            .map(|tagged| match &tagged.value {
                Value::String(id) => id.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default()
    }

    /// Whether a terminal method has already emitted and cleared this log.
    #[must_use]
    pub fn is_flushed(&self) -> bool {
        self.flushed
    }

    /// The fields that would be emitted right now.
    ///
    /// With `verbose` every field passes; otherwise a field passes iff its
    /// tagged severity is at least as urgent as the facade's currently
    /// enabled level. More urgent fields are always shown; the threshold
    /// hides only less-urgent ones.
    #[must_use]
    pub fn filtered_fields(&self, verbose: bool) -> LogFields {
        let current_level = self
            .logger
            .as_ref()
            .map_or(Severity::Fatal, OpLogger::level);
        self.fields
            .iter()
            .filter(|(_, tagged)| verbose || current_level.enables(tagged.severity))
            .map(|(name, tagged)| (name.clone(), tagged.value.clone()))
            .collect()
    }

    fn finish_success(&mut self, level: Severity, verbose: bool) {
        if self.flushed {
            return;
        }
        self.record_elapsed();
        self.set_status(STATUS_SUCCEEDED);
        let record = self.filtered_fields(verbose);
        // Success exits are capped at INFO: WARN and above are reserved for
        // the failure terminals.
        let resolved = match level {
            Severity::Trace | Severity::Debug | Severity::Info => level,
            _ => Severity::Info,
        };
        if let Some(ref logger) = self.logger {
            logger.emit_fields(resolved, record, None);
        }
        self.flush();
    }

    fn finish_failure(
        &mut self,
        severity: Severity,
        error: Option<&(dyn Error + 'static)>,
        verbose: bool,
    ) {
        if self.flushed {
            return;
        }
        self.record_elapsed();
        self.set_status(STATUS_FAILED);
        let record = self.filtered_fields(verbose);
        if let Some(ref logger) = self.logger {
            logger.emit_fields(severity, record, error);
        }
        self.flush();
    }

    fn record_elapsed(&mut self) {
        let took_ms = self
            .started_at
            .map_or(0, |started_at| started_at.elapsed().as_millis());
        let took_ms = u64::try_from(took_ms).unwrap_or(u64::MAX);
        self.fields.insert(
            OPERATION_TOOK.to_owned().into_boxed_str(),
            TaggedValue::info(Value::from(took_ms)),
        );
    }

    fn set_status(&mut self, status: &str) {
        self.fields.insert(
            OPERATION_STATUS.to_owned().into_boxed_str(),
            TaggedValue::info(Value::String(status.to_string())),
        );
    }

    /// Clear the field map and sever the facade reference. Once flushed, an
    /// operation log cannot emit again.
    fn flush(&mut self) {
        self.fields.clear();
        self.logger = None;
        self.flushed = true;
    }
}
