//! File system errors

use super::UberpackError;

/// Creates a file not found error
pub fn not_found(path: impl Into<String>) -> UberpackError {
    UberpackError::FileNotFound { path: path.into() }
}

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> UberpackError {
    UberpackError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> UberpackError {
    UberpackError::IoError {
        message: message.into(),
    }
}
