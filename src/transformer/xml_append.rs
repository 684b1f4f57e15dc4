//! XML fragment transformer
//!
//! The first document becomes the base. For every later document, root
//! attributes missing from the base root are added (earliest value wins) and
//! all root children are appended in encounter order without deduplication.

use tracing::debug;

use super::{ResourceEntry, ResourceTransformer, parse_xml, write_xml};
use crate::driver::EntrySink;
use crate::error::Result;
use crate::format::xml::Element;
use crate::relocation::Relocator;

#[derive(Debug)]
pub struct XmlAppendingTransformer {
    resource: String,
    document: Option<Element>,
}

impl XmlAppendingTransformer {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            document: None,
        }
    }
}

impl ResourceTransformer for XmlAppendingTransformer {
    fn name(&self) -> &'static str {
        "xml-append"
    }

    fn resource_path(&self) -> Option<&str> {
        Some(&self.resource)
    }

    fn claims(&self, path: &str) -> bool {
        self.resource.eq_ignore_ascii_case(path)
    }

    fn consume(&mut self, entry: &ResourceEntry<'_>, _relocators: &[Relocator]) -> Result<()> {
        let root = parse_xml(entry)?;

        let Some(base) = self.document.as_mut() else {
            debug!(archive = entry.archive, path = entry.path, "Using XML document as base");
            self.document = Some(root);
            return Ok(());
        };

        for (name, value) in root.attributes {
            if !base.has_attribute(&name) {
                base.attributes.push((name, value));
            }
        }
        base.children.extend(root.children);
        Ok(())
    }

    fn has_content(&self) -> bool {
        self.document.is_some()
    }

    fn finalize(&mut self, sink: &mut dyn EntrySink) -> Result<()> {
        let Some(document) = self.document.take() else {
            return Ok(());
        };
        sink.write_entry(&self.resource, &write_xml(&self.resource, &document)?)
    }
}
