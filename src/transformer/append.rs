//! Concatenating transformer for plain-text resources

use tracing::debug;

use super::{ResourceEntry, ResourceTransformer};
use crate::driver::EntrySink;
use crate::error::Result;
use crate::relocation::Relocator;

/// Appends every copy of a resource, each followed by a newline
#[derive(Debug)]
pub struct AppendingTransformer {
    resource: String,
    data: Vec<u8>,
}

impl AppendingTransformer {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            data: Vec::new(),
        }
    }
}

impl ResourceTransformer for AppendingTransformer {
    fn name(&self) -> &'static str {
        "append"
    }

    fn resource_path(&self) -> Option<&str> {
        Some(&self.resource)
    }

    fn claims(&self, path: &str) -> bool {
        self.resource.eq_ignore_ascii_case(path)
    }

    fn consume(&mut self, entry: &ResourceEntry<'_>, _relocators: &[Relocator]) -> Result<()> {
        debug!(archive = entry.archive, path = entry.path, "Appending resource");
        self.data.extend_from_slice(entry.contents);
        self.data.push(b'\n');
        Ok(())
    }

    fn has_content(&self) -> bool {
        !self.data.is_empty()
    }

    fn finalize(&mut self, sink: &mut dyn EntrySink) -> Result<()> {
        let data = std::mem::take(&mut self.data);
        sink.write_entry(&self.resource, &data)
    }
}
