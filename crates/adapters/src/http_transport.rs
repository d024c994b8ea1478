//! HTTP transport for the cloud log sink.
//!
//! The transport buffers entries and posts them as one batch per flush. The
//! blocking client keeps submission synchronous from the caller's
//! perspective while the client's own connection pool handles transmission.
//! Delivery failures are reported through the local backend and otherwise
//! dropped; the core makes no durability guarantee.

use oplog_config::CloudConfig;
use oplog_ports::{CloudEntry, CloudLogTransport};
use oplog_shared::{ErrorCode, ErrorEnvelope, SecretString};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::sync::Mutex;
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "https://logging.googleapis.com/v2/entries:write";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Pre-issued bearer credentials for the remote sink.
#[derive(Debug, Deserialize)]
struct CloudCredentials {
    token: String,
}

/// Batching HTTP transport posting entries to the cloud write endpoint.
pub struct HttpCloudTransport {
    client: reqwest::blocking::Client,
    endpoint: Box<str>,
    token: Option<SecretString>,
    project_id: Option<Box<str>>,
    buffer: Mutex<Vec<CloudEntry>>,
}

impl HttpCloudTransport {
    /// Build a transport authenticated from the configured credentials file.
    pub fn from_credentials(config: &CloudConfig) -> Result<Self, ErrorEnvelope> {
        let path = config.credentials_path.as_deref().ok_or_else(|| {
            ErrorEnvelope::expected(ErrorCode::credentials(), "no credentials path configured")
        })?;
        let text = std::fs::read_to_string(path).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::credentials(),
                format!("failed to read credentials file: {error}"),
            )
            .with_metadata("path", path.display().to_string())
        })?;
        let credentials: CloudCredentials = serde_json::from_str(&text).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::credentials(),
                format!("invalid credentials file: {error}"),
            )
        })?;
        let token = credentials.token.trim();
        if token.is_empty() {
            return Err(ErrorEnvelope::expected(
                ErrorCode::credentials(),
                "credentials token must be non-empty",
            ));
        }
        Self::build(config, Some(SecretString::new(token)))
    }

    /// Build a transport with the default (ambient) sink configuration:
    /// no explicit credentials, same endpoint and project.
    pub fn with_default_credentials(config: &CloudConfig) -> Result<Self, ErrorEnvelope> {
        Self::build(config, None)
    }

    fn build(config: &CloudConfig, token: Option<SecretString>) -> Result<Self, ErrorEnvelope> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
            .build()
            .map_err(|error| {
                ErrorEnvelope::unexpected(
                    ErrorCode::transport(),
                    format!("failed to build cloud log client: {error}"),
                )
            })?;
        let endpoint = config
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_ENDPOINT)
            .trim_end_matches('/')
            .to_owned()
            .into_boxed_str();
        Ok(Self {
            client,
            endpoint,
            token,
            project_id: config
                .project_id
                .as_deref()
                .map(|project| project.to_owned().into_boxed_str()),
            buffer: Mutex::new(Vec::new()),
        })
    }
}

impl CloudLogTransport for HttpCloudTransport {
    fn write(&self, entry: CloudEntry) {
        if let Ok(mut guard) = self.buffer.lock() {
            guard.push(entry);
        }
    }

    fn flush(&self) {
        let entries = match self.buffer.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(_) => return,
        };
        if entries.is_empty() {
            return;
        }
        let body = write_request_body(self.project_id.as_deref(), &entries);
        let mut request = self.client.post(self.endpoint.as_ref()).json(&body);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token.expose());
        }
        match request.send() {
            Ok(response) if response.status().is_success() => {},
            Ok(response) => {
                log::warn!(
                    target: "oplog::transport",
                    "cloud log sink rejected a batch of {} entries: {}",
                    entries.len(),
                    response.status()
                );
            },
            Err(error) => {
                log::warn!(
                    target: "oplog::transport",
                    "cloud log sink unreachable, dropping {} entries: {error}",
                    entries.len()
                );
            },
        }
    }
}

/// Render a batch of entries as the write-endpoint request body.
fn write_request_body(project_id: Option<&str>, entries: &[CloudEntry]) -> Value {
    let rendered: Vec<Value> = entries
        .iter()
        .map(|entry| {
            let log_name = match project_id {
                Some(project) => format!("projects/{project}/logs/{}", entry.log_name),
                None => entry.log_name.to_string(),
            };
            let mut rendered = Map::new();
            rendered.insert(
                "severity".to_string(),
                Value::String(entry.severity.as_str().to_string()),
            );
            rendered.insert("logName".to_string(), Value::String(log_name));
            rendered.insert("resource".to_string(), json!({ "type": entry.resource_type }));
            rendered.insert(
                "jsonPayload".to_string(),
                Value::Object(entry.payload.clone()),
            );
            Value::Object(rendered)
        })
        .collect();
    json!({ "entries": rendered, "partialSuccess": true })
}
