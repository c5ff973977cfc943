use std::num::ParseFloatError;

use thiserror::Error;

/// Shown on the submission form when submitted values cannot be used.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input values.";

/// Shown on the submission form when the result page cannot be produced.
pub const PRESENTATION_FAILURE_MESSAGE: &str = "Error in generating the result.";

/// Why a single raw value is not a usable quantity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("not a number: {0}")]
    NotANumber(#[from] ParseFloatError),

    #[error("misplaced digit separator")]
    Separator,

    #[error("not a finite number")]
    NotFinite,

    #[error("negative quantity")]
    Negative,

    #[error("sum exceeds the representable range")]
    Overflow,
}

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidInput {
        field: &'static str,
        #[source]
        reason: QuantityError,
    },

    #[error("failed to generate result: {message}")]
    PresentationFailure { message: String },
}

impl DomainError {
    #[must_use]
    pub fn invalid_input(field: &'static str, reason: QuantityError) -> Self {
        Self::InvalidInput { field, reason }
    }

    #[must_use]
    pub fn presentation_failure(message: impl Into<String>) -> Self {
        Self::PresentationFailure {
            message: message.into(),
        }
    }

    /// Fixed user-facing text. Never names the offending field.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => INVALID_INPUT_MESSAGE,
            Self::PresentationFailure { .. } => PRESENTATION_FAILURE_MESSAGE,
        }
    }
}
