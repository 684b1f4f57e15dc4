//! Manifest transformer
//!
//! The first manifest seen wins outright. The primary artifact is scanned
//! first, so it supplies the base; manifests from dependencies are discarded
//! rather than merged header by header. A configured main class and extra
//! headers are applied on top at finalize.

use tracing::{debug, warn};

use super::{ResourceEntry, ResourceTransformer};
use crate::driver::EntrySink;
use crate::error::Result;
use crate::format::manifest::{MAIN_CLASS, Manifest};
use crate::relocation::Relocator;

pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

#[derive(Debug, Default)]
pub struct ManifestTransformer {
    main_class: Option<String>,
    entries: Vec<(String, String)>,
    manifest: Option<Manifest>,
}

impl ManifestTransformer {
    pub fn new(main_class: Option<String>, entries: Vec<(String, String)>) -> Self {
        Self {
            main_class: main_class.filter(|c| !c.trim().is_empty()),
            entries,
            manifest: None,
        }
    }
}

impl ResourceTransformer for ManifestTransformer {
    fn name(&self) -> &'static str {
        "manifest"
    }

    fn resource_path(&self) -> Option<&str> {
        Some(MANIFEST_PATH)
    }

    fn claims(&self, path: &str) -> bool {
        MANIFEST_PATH.eq_ignore_ascii_case(path)
    }

    fn consume(&mut self, entry: &ResourceEntry<'_>, _relocators: &[Relocator]) -> Result<()> {
        if self.manifest.is_some() {
            debug!(archive = entry.archive, "Discarding manifest, first one wins");
            return Ok(());
        }

        match Manifest::parse(entry.contents) {
            Ok(manifest) if manifest.main.is_empty() && manifest.sections.is_empty() => {
                debug!(archive = entry.archive, "Ignoring empty manifest");
            }
            Ok(manifest) => {
                debug!(archive = entry.archive, "Using manifest as base");
                self.manifest = Some(manifest);
            }
            Err(e) => {
                warn!(archive = entry.archive, error = %e, "Ignoring malformed manifest");
            }
        }
        Ok(())
    }

    fn has_content(&self) -> bool {
        self.manifest.is_some() || self.main_class.is_some() || !self.entries.is_empty()
    }

    fn finalize(&mut self, sink: &mut dyn EntrySink) -> Result<()> {
        let mut manifest = self.manifest.take().unwrap_or_default();

        if let Some(main_class) = &self.main_class {
            manifest.main.insert(MAIN_CLASS, main_class.clone());
        }
        for (key, value) in &self.entries {
            manifest.main.insert(key.clone(), value.clone());
        }

        sink.write_entry(MANIFEST_PATH, &manifest.to_bytes())
    }
}
