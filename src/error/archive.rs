//! Archive container errors

use super::UberpackError;

/// Creates an archive open failed error
pub fn open_failed(path: impl Into<String>, reason: impl Into<String>) -> UberpackError {
    UberpackError::ArchiveOpenFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an archive entry read failed error
pub fn read_failed(
    archive: impl Into<String>,
    entry: impl Into<String>,
    reason: impl Into<String>,
) -> UberpackError {
    UberpackError::ArchiveReadFailed {
        archive: archive.into(),
        entry: entry.into(),
        reason: reason.into(),
    }
}

/// Creates an archive write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> UberpackError {
    UberpackError::ArchiveWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
