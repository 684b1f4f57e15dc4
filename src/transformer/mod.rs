//! Resource transformers
//!
//! A resource transformer owns one specially handled resource path (or a family
//! of paths) and merges every copy of it found across the input archives into a
//! single synthesized entry.
//!
//! ## Lifecycle
//!
//! ```text
//! claims(path)   probed for every entry, side-effect free
//! consume(entry) once per claimed entry, in archive encounter order
//! has_content()  checked once after the scan
//! finalize(sink) writes the merged entry and resets to a fresh state
//! ```
//!
//! ## Variants
//!
//! | Kind                 | Resource                                           | Merge policy                          |
//! |----------------------|----------------------------------------------------|---------------------------------------|
//! | `append`             | configured path                                    | concatenate, newline after each       |
//! | `manifest`           | `META-INF/MANIFEST.MF`                             | first wins, then overrides            |
//! | `plugin-descriptor`  | `META-INF/maven/plugin.xml`                        | collect mojos, relocate type fields   |
//! | `components-xml`     | `META-INF/plexus/components.xml`                   | collect components keyed by role      |
//! | `xml-append`         | configured path                                    | first document is base, append roots  |
//! | `extension-module`   | `META-INF/services/...ExtensionModule`             | collect class lists                   |
//! | `services`           | `META-INF/services/*`                              | dedup provider lines per service      |
//! | `dont-include`       | configured suffixes                                | drop                                  |
//! | `apache-license`     | `META-INF/LICENSE`, `META-INF/LICENSE.txt`         | drop                                  |
//! | `include`            | none                                               | emit configured bytes                 |
//!
//! Every instance belongs to exactly one merge run. Build a fresh set per run.

pub mod append;
pub mod components_xml;
pub mod exclude;
pub mod extension_module;
pub mod include;
pub mod manifest;
pub mod plugin_xml;
pub mod registry;
pub mod services;
pub mod xml_append;

pub use append::AppendingTransformer;
pub use components_xml::ComponentsXmlTransformer;
pub use exclude::{ApacheLicenseTransformer, DontIncludeTransformer};
pub use extension_module::ExtensionModuleTransformer;
pub use include::IncludeTransformer;
pub use manifest::ManifestTransformer;
pub use plugin_xml::PluginDescriptorTransformer;
pub use registry::TransformerRegistry;
pub use services::ServicesTransformer;
pub use xml_append::XmlAppendingTransformer;

use crate::driver::EntrySink;
use crate::error::{Result, content_parse_failed, io_error};
use crate::format::xml::{self, Element};
use crate::relocation::Relocator;

/// One claimed archive entry handed to a transformer
#[derive(Debug, Clone, Copy)]
pub struct ResourceEntry<'a> {
    /// Identity of the archive the entry came from
    pub archive: &'a str,
    pub path: &'a str,
    pub contents: &'a [u8],
}

pub trait ResourceTransformer: Send + std::fmt::Debug {
    /// Short kind name used in logs and conflict errors
    fn name(&self) -> &'static str;

    /// The single fixed path this transformer synthesizes, if any
    ///
    /// Two registered transformers may not share a resource path.
    fn resource_path(&self) -> Option<&str> {
        None
    }

    fn claims(&self, path: &str) -> bool;

    fn consume(&mut self, entry: &ResourceEntry<'_>, relocators: &[Relocator]) -> Result<()>;

    fn has_content(&self) -> bool;

    /// Write the merged entry and reset accumulated state
    fn finalize(&mut self, sink: &mut dyn EntrySink) -> Result<()>;

    /// Drop partial state that never amounted to content
    ///
    /// Called at finalize time instead of [`finalize`](Self::finalize) when
    /// `has_content` is false.
    fn reset(&mut self) {}
}

/// Parse a claimed XML entry, failing the run on malformed content
pub(crate) fn parse_xml(entry: &ResourceEntry<'_>) -> Result<Element> {
    xml::parse(entry.contents)
        .map_err(|e| content_parse_failed(entry.archive, entry.path, e.to_string()))
}

/// Serialize a synthesized XML document
pub(crate) fn write_xml(path: &str, root: &Element) -> Result<Vec<u8>> {
    xml::write(root).map_err(|e| io_error(format!("{path}: {e}")))
}

/// Relocate the text of `element`'s child `name`, if the child exists
pub(crate) fn relocate_child_text(element: &mut Element, name: &str, relocators: &[Relocator]) {
    if let Some(child) = element.child_mut(name) {
        let value = child.text().unwrap_or_default();
        child.set_text(crate::relocation::relocate_class(relocators, value.trim()));
    }
}
