//! Error types for campus operations

use crate::entity::EntityKind;
use thiserror::Error;

/// Client-side validation failures.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{message}")]
    RequiredFieldMissing {
        field: &'static str,
        message: String,
    },

    #[error("{message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },

    #[error("{} code already exists", .kind.label())]
    CodeTaken { kind: EntityKind },

    #[error("Please wait for {} code validation", .kind.label().to_lowercase())]
    CodeCheckIncomplete { kind: EntityKind },
}

impl ValidationError {
    pub fn required(field: &'static str, message: impl Into<String>) -> Self {
        Self::RequiredFieldMissing {
            field,
            message: message.into(),
        }
    }

    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }

    /// The form field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::RequiredFieldMissing { field, .. } | Self::InvalidValue { field, .. } => field,
            Self::CodeTaken { .. } | Self::CodeCheckIncomplete { .. } => "code",
        }
    }
}

/// Master error type for campus-core.
#[derive(Debug, Clone, Error)]
pub enum CampusError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for campus operations.
pub type CampusResult<T> = Result<T, CampusError>;
