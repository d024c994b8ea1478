//! Logging backend boundary contract.
//!
//! A [`LoggerAdapter`] translates facade emissions into one concrete sink's
//! wire format and enablement policy. The facade owns exactly one adapter and
//! never learns which variant it holds; new backends are added by
//! implementing this trait, not by modifying the facade.

use oplog_shared::Severity;
use oplog_shared::redaction::{REDACTED, is_secret_key};
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

/// Structured field map attached to an emission.
///
/// Output is a record, not a sequence; the ordered map keeps rendering
/// deterministic but callers must not rely on ordering.
pub type LogFields = BTreeMap<Box<str>, Value>;

/// Reserved key carrying a rendered error chain in field-map emissions.
pub const STACK_TRACE_FIELD: &str = "_stackTrace";

/// Reserved key wrapping plain messages on backends that only accept
/// structured payloads.
pub const MESSAGE_FIELD: &str = "_message";

/// Boundary contract implemented by every logging backend.
///
/// Implementations must check enablement of the requested severity before
/// doing any formatting or network work; a disabled emission is a no-op.
/// Delivery failures are the backend's concern and never surface here.
pub trait LoggerAdapter: Send + Sync {
    /// Returns true when records at `severity` currently reach the sink.
    fn enabled(&self, severity: Severity) -> bool;

    /// Emit a formatted message, optionally annotated with an error.
    fn log_args(
        &self,
        severity: Severity,
        message: fmt::Arguments<'_>,
        error: Option<&(dyn Error + 'static)>,
    );

    /// Emit a structured field map, optionally annotated with an error.
    fn log_fields(
        &self,
        severity: Severity,
        fields: LogFields,
        error: Option<&(dyn Error + 'static)>,
    );

    /// The minimum severity currently enabled on this backend.
    fn level(&self) -> Severity;
}

/// Render an error and its source chain as a multi-line string.
///
/// This is the structured-record analog of a stack trace: the head error
/// first, each source on its own `Caused by:` line.
#[must_use]
pub fn render_error_chain(error: &(dyn Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str("\nCaused by: ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

/// Insert the rendered error chain under [`STACK_TRACE_FIELD`].
pub fn attach_error(fields: &mut LogFields, error: &(dyn Error + 'static)) {
    fields.insert(
        STACK_TRACE_FIELD.to_owned().into_boxed_str(),
        Value::String(render_error_chain(error)),
    );
}

/// Redact secret-bearing keys in a field map, recursing into nested values.
pub fn redact_fields(fields: &mut LogFields) {
    for (key, value) in fields.iter_mut() {
        if is_secret_key(key) {
            *value = Value::String(REDACTED.to_string());
        } else {
            redact_value(value);
        }
    }
}

fn redact_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map.iter_mut() {
                if is_secret_key(key) {
                    *nested = Value::String(REDACTED.to_string());
                } else {
                    redact_value(nested);
                }
            }
        },
        Value::Array(items) => {
            for item in items {
                redact_value(item);
            }
        },
        _ => {},
    }
}

#[cfg(test)]
mod tests {
    use super::{LogFields, STACK_TRACE_FIELD, attach_error, redact_fields, render_error_chain};
    use oplog_shared::REDACTED;
    use serde_json::{Value, json};
    use std::fmt;

    #[derive(Debug)]
    struct Outer;

    impl fmt::Display for Outer {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("outer failed")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&Inner)
        }
    }

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Inner {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("inner cause")
        }
    }

    impl std::error::Error for Inner {}

    #[test]
    fn error_chain_renders_head_and_sources() {
        let rendered = render_error_chain(&Outer);
        assert_eq!(rendered, "outer failed\nCaused by: inner cause");
    }

    #[test]
    fn attach_error_uses_the_reserved_key() {
        let mut fields = LogFields::new();
        attach_error(&mut fields, &Outer);
        let rendered = fields
            .get(STACK_TRACE_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default();
        assert!(rendered.starts_with("outer failed"));
    }

    #[test]
    fn redaction_covers_top_level_and_nested_values() {
        let mut fields = LogFields::new();
        fields.insert("apiKey".into(), Value::String("sk-1".to_string()));
        fields.insert(
            "request".into(),
            json!({ "authToken": "t", "items": [{ "password": "p", "count": 2 }] }),
        );
        fields.insert("status".into(), Value::String("ok".to_string()));
        redact_fields(&mut fields);

        assert_eq!(fields.get("apiKey"), Some(&Value::String(REDACTED.to_string())));
        assert_eq!(fields.get("status"), Some(&Value::String("ok".to_string())));
        let request = fields.get("request").cloned().unwrap_or_default();
        assert_eq!(request["authToken"], Value::String(REDACTED.to_string()));
        assert_eq!(request["items"][0]["password"], Value::String(REDACTED.to_string()));
        assert_eq!(request["items"][0]["count"], Value::from(2));
    }
}
