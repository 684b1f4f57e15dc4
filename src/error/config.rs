//! Configuration errors

use super::UberpackError;

/// Creates an invalid artifact pattern error
pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> UberpackError {
    UberpackError::InvalidPattern {
        pattern: pattern.into(),
        reason: reason.into(),
    }
}

/// Creates an error for two transformers owning the same resource path
pub fn conflicting_transformers(
    path: impl Into<String>,
    first: impl Into<String>,
    second: impl Into<String>,
) -> UberpackError {
    UberpackError::ConflictingTransformers {
        path: path.into(),
        first: first.into(),
        second: second.into(),
    }
}

/// Creates a config not found error
pub fn not_found(path: impl Into<String>) -> UberpackError {
    UberpackError::ConfigNotFound { path: path.into() }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> UberpackError {
    UberpackError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> UberpackError {
    UberpackError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> UberpackError {
    UberpackError::ConfigInvalid {
        message: message.into(),
    }
}
