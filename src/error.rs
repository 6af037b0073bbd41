//! Error types for payload parsing, validation and response assembly.

use thiserror::Error;

/// Errors raised by this library.
///
/// Every failure is surfaced synchronously at the offending construction,
/// mutation or render call; no partially-built object is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A mandatory field was absent at construction or parse time.
    #[error("missing required field: {field}")]
    RequiredField { field: String },

    /// A field value violated one of its declared constraints.
    #[error("invalid value for `{field}`: {reason}")]
    Validation { field: String, reason: String },

    /// Inbound JSON was structurally unrecognizable.
    #[error("malformed payload at `{path}`: {reason}")]
    Parse { path: String, reason: String },

    /// An outbound assembly violated a platform composition rule.
    #[error("invalid response composition: {0}")]
    Composition(String),
}

impl Error {
    /// Creates a missing-required-field error.
    pub fn required_field(field: impl Into<String>) -> Self {
        Self::RequiredField {
            field: field.into(),
        }
    }

    /// Creates a validation error for the given field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a parse error carrying the offending JSON path.
    pub fn parse(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a composition-rule error.
    pub fn composition(message: impl Into<String>) -> Self {
        Self::Composition(message.into())
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
