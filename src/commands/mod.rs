//! Command implementations for the uberpack CLI

pub mod build;
pub mod completions;
