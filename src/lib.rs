//! Uberpack - uber-archive builder
//!
//! Merges a project archive and its dependency archives into one output archive.
//! Same-path resources are combined by pluggable [`transformer`]s, packages can be
//! renamed by [`relocation`] rules, and everything else is copied through.

pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod coordinate;
pub mod driver;
pub mod error;
pub mod format;
pub mod progress;
pub mod relocation;
pub mod transformer;
