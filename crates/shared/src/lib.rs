//! # oplog-shared
//!
//! Foundational types for the `oplog` workspace: the severity model, the
//! error envelope, correlation ids, and redaction helpers.
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **No I/O** - Pure types and logic; sinks and transports live in `adapters`
//! 3. **Serde-compatible** - All public types support serialization

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod correlation;
pub mod errors;
pub mod redaction;
pub mod severity;

pub use correlation::ContextId;
pub use errors::{ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use redaction::{REDACTED, SecretString, is_secret_key, redact_if_secret};
pub use severity::Severity;

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
