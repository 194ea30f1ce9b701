// ABOUTME: Outcome type for a single field resolution
// ABOUTME: Separates per-field error entries from failures that abort the whole request

use crate::database::StoreError;
use crate::errors::{AppError, ErrorCode};
use recipe_core::ids::IdError;

/// Why a field produced `null` instead of a value
#[derive(Debug)]
pub enum FieldFailure {
    /// Reported in the response `errors` list; other fields still run
    Reported {
        /// Stable code
        code: ErrorCode,
        /// Client-facing message
        message: String,
    },
    /// Aborts the document with a transport-level error
    Fatal(AppError),
}

impl FieldFailure {
    /// Per-field failure with the given code
    #[must_use]
    pub fn reported(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Reported {
            code,
            message: message.into(),
        }
    }

    /// Bad or missing argument
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::reported(ErrorCode::InvalidArgument, message)
    }

    /// Unexpected internal failure
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Fatal(AppError::internal(message))
    }
}

impl From<StoreError> for FieldFailure {
    fn from(error: StoreError) -> Self {
        Self::Fatal(AppError::from(error))
    }
}

impl From<IdError> for FieldFailure {
    fn from(error: IdError) -> Self {
        Self::reported(ErrorCode::InvalidId, error.to_string())
    }
}

/// Result of resolving one field
pub type FieldResult<T> = Result<T, FieldFailure>;
