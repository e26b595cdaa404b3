//! Validation results
//!
//! A value is valid when sanitizing it is a no-op: the sanitizer handed back
//! the very same value instead of a rewritten copy.

use std::borrow::Cow;

use serde::Serialize;

use crate::value::Value;

/// Outcome of [`crate::Sanitizer::validate`]
///
/// Serializes as `{"isValid": ..., "sanitized": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult<'a> {
    /// True exactly when sanitizing changed nothing
    pub is_valid: bool,
    /// The sanitized value; borrowed from the input when valid
    pub sanitized: Cow<'a, Value>,
}

impl<'a> ValidationResult<'a> {
    /// Builds the result from the output of a sanitize pass
    pub fn from_sanitized(sanitized: Cow<'a, Value>) -> Self {
        Self {
            is_valid: matches!(sanitized, Cow::Borrowed(_)),
            sanitized,
        }
    }

    /// Detaches the result from the input value
    pub fn into_owned(self) -> ValidationResult<'static> {
        ValidationResult {
            is_valid: self.is_valid,
            sanitized: Cow::Owned(self.sanitized.into_owned()),
        }
    }
}
