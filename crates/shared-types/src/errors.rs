//! # Error Types
//!
//! Identifier validation shared by the verifier and the link store.

use crate::entities::KEY_SEPARATOR;
use thiserror::Error;

/// Errors raised while validating an identifier used inside a persisted key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Identifier is empty or whitespace.
    #[error("{field} cannot be empty or blank")]
    Blank {
        /// Name of the offending field.
        field: &'static str,
    },

    /// Identifier contains the key separator.
    #[error("{field} cannot contain '{separator}': {value}")]
    ContainsSeparator {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// The reserved separator.
        separator: char,
    },
}

/// Check that `value` can be used as a single key segment.
pub fn validate_key_segment(field: &'static str, value: &str) -> Result<(), IdentifierError> {
    if value.trim().is_empty() {
        return Err(IdentifierError::Blank { field });
    }
    if value.contains(KEY_SEPARATOR) {
        return Err(IdentifierError::ContainsSeparator {
            field,
            value: value.to_string(),
            separator: KEY_SEPARATOR,
        });
    }
    Ok(())
}
