//! Cloud backend adapter.
//!
//! Emissions are translated into structured entries in the remote sink's own
//! severity vocabulary and handed to a [`CloudLogTransport`], one entry per
//! record, each followed by an explicit flush. Enablement is a statically
//! configured minimum threshold: the remote scale is indexed with gaps, and
//! a threshold string that names no index disables the adapter entirely.

use crate::http_transport::HttpCloudTransport;
use oplog_config::CloudConfig;
use oplog_ports::{
    CloudEntry, CloudLogTransport, CloudSeverity, LogFields, LoggerAdapter, MESSAGE_FIELD,
    attach_error, redact_fields,
};
use oplog_shared::{ErrorEnvelope, Severity};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Monitored-resource descriptor attached to every entry.
const RESOURCE_TYPE_GLOBAL: &str = "global";

/// Minimum-severity threshold on the remote sink's indexed scale.
///
/// The scale leaves gaps (3 between INFO and WARN, 6 and 7 above ERROR);
/// only the named severities map to an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CloudThreshold(Option<u8>);

impl CloudThreshold {
    fn parse(value: &str) -> Self {
        let index = Severity::parse(value).map(|severity| match severity {
            Severity::Trace => 0,
            Severity::Debug => 1,
            Severity::Info => 2,
            Severity::Warn => 4,
            Severity::Error => 5,
            Severity::Fatal => 8,
        });
        Self(index)
    }

    fn admits(self, severity: Severity) -> bool {
        let Some(index) = self.0 else {
            return false;
        };
        match severity {
            Severity::Trace => index == 0,
            Severity::Debug => index < 2,
            Severity::Info => index < 3,
            Severity::Warn => index < 5,
            Severity::Error => index < 6,
            Severity::Fatal => index < 9,
        }
    }
}

/// Adapter submitting every enabled emission to a remote log sink.
pub struct CloudLogAdapter {
    log_name: Box<str>,
    threshold: CloudThreshold,
    transport: Arc<dyn CloudLogTransport>,
}

impl CloudLogAdapter {
    /// Create a cloud adapter with an HTTP transport built from the
    /// configured credentials.
    ///
    /// Credential problems do not prevent construction: the adapter falls
    /// back to the default transport configuration and reports the failure
    /// as a warning through itself.
    #[must_use]
    pub fn new(log_name: &str, config: &CloudConfig) -> Self {
        match HttpCloudTransport::from_credentials(config) {
            Ok(transport) => Self::assemble(log_name, config, Arc::new(transport), None),
            Err(credential_error) => match HttpCloudTransport::with_default_credentials(config) {
                Ok(transport) => {
                    Self::assemble(log_name, config, Arc::new(transport), Some(credential_error))
                },
                Err(build_error) => Self::assemble(
                    log_name,
                    config,
                    Arc::new(DiscardingTransport),
                    Some(build_error),
                ),
            },
        }
    }

    /// Create a cloud adapter over an explicit transport.
    #[must_use]
    pub fn with_transport(
        log_name: &str,
        config: &CloudConfig,
        transport: Arc<dyn CloudLogTransport>,
    ) -> Self {
        Self::assemble(log_name, config, transport, None)
    }

    fn assemble(
        log_name: &str,
        config: &CloudConfig,
        transport: Arc<dyn CloudLogTransport>,
        init_error: Option<ErrorEnvelope>,
    ) -> Self {
        let adapter = Self {
            log_name: log_name.to_owned().into_boxed_str(),
            threshold: CloudThreshold::parse(&config.severity_threshold),
            transport,
        };
        if let Some(error) = init_error {
            adapter.log_args(
                Severity::Warn,
                format_args!(
                    "cloud logging credentials unavailable; continuing with default transport"
                ),
                Some(&error),
            );
        }
        adapter
    }

    fn submit(&self, severity: Severity, mut fields: LogFields) {
        redact_fields(&mut fields);
        let mut payload = Map::new();
        for (key, value) in fields {
            payload.insert(key.into_string(), value);
        }
        self.transport.write(CloudEntry {
            severity: CloudSeverity::from_severity(severity),
            log_name: self.log_name.clone(),
            resource_type: RESOURCE_TYPE_GLOBAL.to_owned().into_boxed_str(),
            payload,
        });
        self.transport.flush();
    }
}

impl LoggerAdapter for CloudLogAdapter {
    fn enabled(&self, severity: Severity) -> bool {
        self.threshold.admits(severity)
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
        let mut fields = LogFields::new();
        fields.insert(
            MESSAGE_FIELD.to_owned().into_boxed_str(),
            Value::String(message.to_string()),
        );
        if let Some(error) = error {
            attach_error(&mut fields, error);
        }
        self.submit(severity, fields);
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
        if let Some(error) = error {
            attach_error(&mut fields, error);
        }
        self.submit(severity, fields);
    }

    /// The remote threshold is static; the sink reports a fixed INFO level
    /// for field-filtering purposes.
    fn level(&self) -> Severity {
        Severity::Info
    }
}

/// Transport of last resort: accepts and drops everything.
struct DiscardingTransport;

impl CloudLogTransport for DiscardingTransport {
    fn write(&self, _entry: CloudEntry) {}

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::{CloudLogAdapter, CloudThreshold};
    use oplog_config::CloudConfig;
    use oplog_ports::{
        CloudEntry, CloudLogTransport, CloudSeverity, LogFields, LoggerAdapter, MESSAGE_FIELD,
        STACK_TRACE_FIELD,
    };
    use oplog_shared::{REDACTED, Severity};
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingTransport {
        entries: Mutex<Vec<CloudEntry>>,
        flushes: AtomicUsize,
    }

    impl RecordingTransport {
        fn take(&self) -> Vec<CloudEntry> {
            let mut guard = self.entries.lock().expect("transport lock");
            std::mem::take(&mut *guard)
        }
    }

    impl CloudLogTransport for RecordingTransport {
        fn write(&self, entry: CloudEntry) {
            let mut guard = self.entries.lock().expect("transport lock");
            guard.push(entry);
        }

        fn flush(&self) {
            self.flushes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn config_with_threshold(threshold: &str) -> CloudConfig {
        CloudConfig {
            severity_threshold: threshold.to_string(),
            ..CloudConfig::default()
        }
    }

    fn adapter_with(threshold: &str) -> (CloudLogAdapter, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let adapter = CloudLogAdapter::with_transport(
            "svc.orders",
            &config_with_threshold(threshold),
            transport.clone(),
        );
        (adapter, transport)
    }

    #[derive(Debug)]
    struct Boom;

    impl std::fmt::Display for Boom {
        fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("boom")
        }
    }

    impl std::error::Error for Boom {}

    #[test]
    fn threshold_indexing_follows_the_gapped_scale() {
        let warn = CloudThreshold::parse("WARN");
        assert!(!warn.admits(Severity::Trace));
        assert!(!warn.admits(Severity::Debug));
        assert!(!warn.admits(Severity::Info));
        assert!(warn.admits(Severity::Warn));
        assert!(warn.admits(Severity::Error));
        assert!(warn.admits(Severity::Fatal));

        let trace = CloudThreshold::parse("TRACE");
        assert!(trace.admits(Severity::Trace));
        assert!(trace.admits(Severity::Fatal));

        let fatal = CloudThreshold::parse("FATAL");
        assert!(!fatal.admits(Severity::Error));
        assert!(fatal.admits(Severity::Fatal));
    }

    #[test]
    fn invalid_threshold_disables_the_adapter() {
        for value in ["", "warn", "Warn", "VERBOSE"] {
            let threshold = CloudThreshold::parse(value);
            for severity in [
                Severity::Trace,
                Severity::Debug,
                Severity::Info,
                Severity::Warn,
                Severity::Error,
                Severity::Fatal,
            ] {
                assert!(!threshold.admits(severity), "{value:?} must disable {severity}");
            }
        }
    }

    #[test]
    fn suppressed_severities_never_reach_the_transport() {
        let (adapter, transport) = adapter_with("WARN");
        adapter.log_args(Severity::Info, format_args!("routine"), None);
        let mut fields = LogFields::new();
        fields.insert("k".into(), Value::from(1));
        adapter.log_fields(Severity::Debug, fields, None);

        assert!(transport.take().is_empty());
        assert_eq!(transport.flushes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn admitted_messages_map_severity_and_flush() {
        let (adapter, transport) = adapter_with("WARN");
        adapter.log_args(Severity::Error, format_args!("order {} rejected", 7), None);

        let entries = transport.take();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].severity, CloudSeverity::Alert);
        assert_eq!(entries[0].log_name.as_ref(), "svc.orders");
        assert_eq!(entries[0].resource_type.as_ref(), "global");
        assert_eq!(
            entries[0].payload.get(MESSAGE_FIELD),
            Some(&Value::String("order 7 rejected".to_string()))
        );
        assert_eq!(transport.flushes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn field_maps_pass_through_with_error_and_redaction() {
        let (adapter, transport) = adapter_with("TRACE");
        let mut fields = LogFields::new();
        fields.insert("user".into(), Value::String("u-1".to_string()));
        fields.insert("sessionToken".into(), Value::String("tok".to_string()));
        adapter.log_fields(Severity::Warn, fields, Some(&Boom));

        let entries = transport.take();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].severity, CloudSeverity::Warning);
        assert_eq!(
            entries[0].payload.get("user"),
            Some(&Value::String("u-1".to_string()))
        );
        assert_eq!(
            entries[0].payload.get("sessionToken"),
            Some(&Value::String(REDACTED.to_string()))
        );
        assert_eq!(
            entries[0].payload.get(STACK_TRACE_FIELD),
            Some(&Value::String("boom".to_string()))
        );
    }

    #[test]
    fn fatal_maps_to_emergency() {
        let (adapter, transport) = adapter_with("TRACE");
        adapter.log_args(Severity::Fatal, format_args!("down"), None);
        let entries = transport.take();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].severity, CloudSeverity::Emergency);
    }

    #[test]
    fn level_is_fixed_at_info() {
        let (adapter, _transport) = adapter_with("ERROR");
        assert_eq!(adapter.level(), Severity::Info);
    }

    #[test]
    fn unreadable_credentials_fall_back_and_stay_usable() {
        // The closed local port keeps the construction-time warning from
        // reaching out; delivery failure is the transport's concern.
        let config = CloudConfig {
            credentials_path: Some("/nonexistent/oplog-creds.json".into()),
            endpoint: Some("http://127.0.0.1:9/v2/entries:write".to_string()),
            ..config_with_threshold("INFO")
        };

        let adapter = CloudLogAdapter::new("svc.fallback", &config);
        assert!(adapter.enabled(Severity::Info));
        assert!(!adapter.enabled(Severity::Debug));
        // Emission after fallback must not panic or surface an error.
        adapter.log_args(Severity::Error, format_args!("still alive"), None);
    }
}
