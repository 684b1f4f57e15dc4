//! Error types and handling for uberpack
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration errors (patterns, transformer registration, uberpack.yaml)
//! - [`content`]: Resource content errors raised while merging
//! - [`fs`]: File system errors
//! - [`archive`]: Archive container errors

pub mod archive;
pub mod config;
pub mod content;
pub mod fs;

pub use archive::{
    open_failed as archive_open_failed, read_failed as archive_read_failed,
    write_failed as archive_write_failed,
};
pub use config::{
    conflicting_transformers, invalid as config_invalid, invalid_pattern,
    not_found as config_not_found, parse_failed as config_parse_failed,
    read_failed as config_read_failed,
};
pub use content::parse_failed as content_parse_failed;
pub use fs::{
    io_error, not_found as file_not_found, read_failed as file_read_failed,
};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for uberpack operations
#[derive(Error, Diagnostic, Debug)]
pub enum UberpackError {
    // Configuration errors
    #[error("Invalid artifact pattern '{pattern}': {reason}")]
    #[diagnostic(
        code(uberpack::config::invalid_pattern),
        help("Patterns have the form groupId[:artifactId[:type][:classifier]]")
    )]
    InvalidPattern { pattern: String, reason: String },

    #[error("Transformers '{first}' and '{second}' both claim resource '{path}'")]
    #[diagnostic(
        code(uberpack::config::conflicting_transformers),
        help("Each synthesized resource path may be owned by one transformer only")
    )]
    ConflictingTransformers {
        path: String,
        first: String,
        second: String,
    },

    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(uberpack::config::not_found),
        help("Pass --config or create uberpack.yaml in the current directory")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(uberpack::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(uberpack::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(uberpack::config::invalid))]
    ConfigInvalid { message: String },

    // Content errors
    #[error("Failed to parse '{path}' from {archive}: {reason}")]
    #[diagnostic(
        code(uberpack::content::parse_failed),
        help("The resource is claimed by a transformer and must be well-formed")
    )]
    ContentParseFailed {
        archive: String,
        path: String,
        reason: String,
    },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(uberpack::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(uberpack::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(uberpack::fs::io_error))]
    IoError { message: String },

    // Archive errors
    #[error("Failed to open archive {path}: {reason}")]
    #[diagnostic(code(uberpack::archive::open_failed))]
    ArchiveOpenFailed { path: String, reason: String },

    #[error("Failed to read entry '{entry}' from {archive}: {reason}")]
    #[diagnostic(code(uberpack::archive::read_failed))]
    ArchiveReadFailed {
        archive: String,
        entry: String,
        reason: String,
    },

    #[error("Failed to write archive {path}: {reason}")]
    #[diagnostic(code(uberpack::archive::write_failed))]
    ArchiveWriteFailed { path: String, reason: String },

    // CLI errors
    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(uberpack::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },

    #[error("Artifact {coordinate} has no file at {path}")]
    #[diagnostic(
        code(uberpack::archive::artifact_missing),
        help("Build the artifact before packaging, or fix its path in uberpack.yaml")
    )]
    ArtifactFileMissing { coordinate: String, path: String },
}

impl From<std::io::Error> for UberpackError {
    fn from(err: std::io::Error) -> Self {
        UberpackError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for UberpackError {
    fn from(err: serde_yaml::Error) -> Self {
        UberpackError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for UberpackError {
    fn from(err: zip::result::ZipError) -> Self {
        UberpackError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, UberpackError>;
