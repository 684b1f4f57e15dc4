//! Adds a fixed resource to the output

use super::{ResourceEntry, ResourceTransformer};
use crate::driver::EntrySink;
use crate::error::Result;
use crate::relocation::Relocator;

/// Emits configured bytes at a configured path; claims nothing
#[derive(Debug)]
pub struct IncludeTransformer {
    resource: String,
    contents: Vec<u8>,
}

impl IncludeTransformer {
    pub fn new(resource: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            resource: resource.into(),
            contents,
        }
    }
}

impl ResourceTransformer for IncludeTransformer {
    fn name(&self) -> &'static str {
        "include"
    }

    fn resource_path(&self) -> Option<&str> {
        Some(&self.resource)
    }

    fn claims(&self, _path: &str) -> bool {
        false
    }

    fn consume(&mut self, _entry: &ResourceEntry<'_>, _relocators: &[Relocator]) -> Result<()> {
        Ok(())
    }

    fn has_content(&self) -> bool {
        true
    }

    fn finalize(&mut self, sink: &mut dyn EntrySink) -> Result<()> {
        sink.write_entry(&self.resource, &self.contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MemorySink;

    #[test]
    fn test_include_emits_configured_bytes() {
        let mut t = IncludeTransformer::new("META-INF/NOTICE", b"notice".to_vec());
        assert!(!t.claims("META-INF/NOTICE"));
        assert!(t.has_content());

        let mut sink = MemorySink::default();
        t.finalize(&mut sink).unwrap();
        assert_eq!(sink.get("META-INF/NOTICE"), Some(&b"notice"[..]));
    }
}
