//! Transformers that claim resources only to drop them

use tracing::debug;

use super::{ResourceEntry, ResourceTransformer};
use crate::driver::EntrySink;
use crate::error::Result;
use crate::relocation::Relocator;

/// Drops every entry whose path ends with one of the suffixes
#[derive(Debug, Default)]
pub struct DontIncludeTransformer {
    suffixes: Vec<String>,
}

impl DontIncludeTransformer {
    pub fn new(suffixes: Vec<String>) -> Self {
        Self {
            suffixes: suffixes.into_iter().filter(|s| !s.is_empty()).collect(),
        }
    }
}

impl ResourceTransformer for DontIncludeTransformer {
    fn name(&self) -> &'static str {
        "dont-include"
    }

    fn claims(&self, path: &str) -> bool {
        self.suffixes.iter().any(|s| path.ends_with(s.as_str()))
    }

    fn consume(&mut self, entry: &ResourceEntry<'_>, _relocators: &[Relocator]) -> Result<()> {
        debug!(archive = entry.archive, path = entry.path, "Dropping resource");
        Ok(())
    }

    fn has_content(&self) -> bool {
        false
    }

    fn finalize(&mut self, _sink: &mut dyn EntrySink) -> Result<()> {
        Ok(())
    }
}

const LICENSE_PATH: &str = "META-INF/LICENSE";
const LICENSE_TXT_PATH: &str = "META-INF/LICENSE.txt";

/// Drops the Apache license files every dependency ships
#[derive(Debug, Default)]
pub struct ApacheLicenseTransformer;

impl ResourceTransformer for ApacheLicenseTransformer {
    fn name(&self) -> &'static str {
        "apache-license"
    }

    fn claims(&self, path: &str) -> bool {
        LICENSE_PATH.eq_ignore_ascii_case(path) || LICENSE_TXT_PATH.eq_ignore_ascii_case(path)
    }

    fn consume(&mut self, entry: &ResourceEntry<'_>, _relocators: &[Relocator]) -> Result<()> {
        debug!(archive = entry.archive, path = entry.path, "Dropping license file");
        Ok(())
    }

    fn has_content(&self) -> bool {
        false
    }

    fn finalize(&mut self, _sink: &mut dyn EntrySink) -> Result<()> {
        Ok(())
    }
}
