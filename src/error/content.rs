//! Resource content errors

use super::UberpackError;

/// Creates a content parse error for a claimed entry
pub fn parse_failed(
    archive: impl Into<String>,
    path: impl Into<String>,
    reason: impl Into<String>,
) -> UberpackError {
    UberpackError::ContentParseFailed {
        archive: archive.into(),
        path: path.into(),
        reason: reason.into(),
    }
}
