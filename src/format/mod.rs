//! Content codecs used by the resource transformers
//!
//! - [`manifest`]: JAR manifests (strict parse, canonical write)
//! - [`properties`]: `key=value` files (permissive parse)
//! - [`xml`]: small element tree over `quick-xml`

pub mod manifest;
pub mod properties;
pub mod xml;

pub use manifest::{Attributes, Manifest, ManifestError};
pub use properties::Properties;
pub use xml::{Element, Node, XmlError};
