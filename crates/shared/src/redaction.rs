//! Secret detection and redaction utilities.
//!
//! A logging library is the easiest place to leak a credential; every field
//! map and error metadata entry passes through these helpers before leaving
//! the process.

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Checks if a key/variable name likely refers to a secret.
///
/// Uses case-insensitive pattern matching over common secret-bearing naming
/// conventions.
#[must_use]
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    key.contains("KEY")
        || key.contains("TOKEN")
        || key.contains("SECRET")
        || key.contains("PASSWORD")
        || key.contains("CREDENTIAL")
        || key.contains("AUTH")
}

/// Redacts a value if the key is likely a secret.
#[must_use]
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

/// A secret string wrapper that redacts on Display/Debug.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SecretString(Box<str>);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(value: impl Into<Box<str>>) -> Self {
        Self(value.into())
    }

    /// Borrow the underlying secret.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl std::fmt::Display for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::{REDACTED, SecretString, is_secret_key, redact_if_secret};

    #[test]
    fn secret_key_detection_matches_common_conventions() {
        assert!(is_secret_key("API_KEY"));
        assert!(is_secret_key("password"));
        assert!(is_secret_key("OPLOG_CLOUD_CREDENTIALS"));
        assert!(is_secret_key("authToken"));
        assert!(!is_secret_key("LOG_LEVEL"));
        assert!(!is_secret_key("_operationName"));
    }

    #[test]
    fn redact_if_secret_only_touches_secret_keys() {
        assert_eq!(redact_if_secret("token", "abc"), REDACTED);
        assert_eq!(redact_if_secret("status", "ok"), "ok");
    }

    #[test]
    fn secret_string_never_prints_its_value() {
        let secret = SecretString::new("sk-123");
        assert_eq!(format!("{secret}"), REDACTED);
        assert_eq!(format!("{secret:?}"), REDACTED);
        assert_eq!(secret.expose(), "sk-123");
    }
}
