//! Correlation ids threading related operations together.

use crate::errors::{ErrorCode, ErrorEnvelope};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identifier linking the records of one logical operation, and, when
/// chained, the operations of one logical flow.
///
/// Freshly generated ids are random UUIDs; chained ids carry whatever the
/// upstream operation produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextId(Arc<str>);

impl ContextId {
    /// Generate a fresh random context id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Arc::<str>::from(Uuid::new_v4().to_string()))
    }

    /// Parse a caller-supplied context id for chaining.
    ///
    /// The value is trimmed; empty values are rejected.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ErrorEnvelope> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ErrorEnvelope::expected(
                ErrorCode::invalid_input(),
                "context id must be non-empty",
            ));
        }
        Ok(Self(Arc::<str>::from(trimmed)))
    }

    /// Borrow the identifier as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
