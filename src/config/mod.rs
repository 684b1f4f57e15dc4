//! Build configuration (uberpack.yaml)
//!
//! This module contains data structures for:
//! - `uberpack.yaml` - artifacts, selection, relocations, transformers
//! - transformer entries, one per resource merge policy

pub mod build;
pub mod transformers;

// Re-export commonly used types
pub use build::{
    ArtifactConfig, ArtifactInput, ArtifactSetConfig, BuildConfig, BuildPlan, RelocationConfig,
};
pub use transformers::TransformerConfig;

/// File looked up in the current directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "uberpack.yaml";
