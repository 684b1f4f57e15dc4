//! Ordered transformer registration
//!
//! Registration order is part of the contract: the first transformer whose
//! `claims` accepts a path receives it, and transformers finalize in the same
//! order. Register specific paths before broader families (for example the
//! extension module descriptor before `services`).

use tracing::debug;

use super::ResourceTransformer;
use crate::error::{Result, conflicting_transformers};

#[derive(Debug, Default)]
pub struct TransformerRegistry {
    transformers: Vec<Box<dyn ResourceTransformer>>,
}

impl TransformerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transformer
    ///
    /// # Errors
    ///
    /// Returns `UberpackError::ConflictingTransformers` if another transformer
    /// already synthesizes the same resource path, or if an earlier transformer
    /// would claim every entry at the path the new one needs to consume.
    pub fn register(&mut self, transformer: Box<dyn ResourceTransformer>) -> Result<()> {
        if let Some(path) = transformer.resource_path() {
            let consumes = transformer.claims(path);
            let existing = self.transformers.iter().find(|t| {
                t.resource_path()
                    .is_some_and(|other| other.eq_ignore_ascii_case(path))
                    || (consumes && t.claims(path))
            });
            if let Some(existing) = existing {
                return Err(conflicting_transformers(
                    path,
                    existing.name(),
                    transformer.name(),
                ));
            }
        }

        debug!(
            kind = transformer.name(),
            path = transformer.resource_path().unwrap_or("-"),
            "Registered transformer"
        );
        self.transformers.push(transformer);
        Ok(())
    }

    /// First transformer claiming `path`
    pub fn find_mut(&mut self, path: &str) -> Option<&mut dyn ResourceTransformer> {
        self.transformers
            .iter_mut()
            .find(|t| t.claims(path))
            .map(|t| &mut **t as &mut dyn ResourceTransformer)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn ResourceTransformer>> {
        self.transformers.iter_mut()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.transformers.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }
}
