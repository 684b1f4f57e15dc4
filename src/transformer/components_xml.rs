//! Plexus components descriptor transformer
//!
//! Components are keyed by `role:role-hint` after relocation. A component whose
//! key was already seen replaces the earlier one at the earlier position and
//! inherits its `configuration` block.

use super::{ResourceEntry, ResourceTransformer, parse_xml, relocate_child_text, write_xml};
use crate::driver::EntrySink;
use crate::error::Result;
use crate::format::xml::{Element, Node};
use crate::relocation::Relocator;

pub const COMPONENTS_XML_PATH: &str = "META-INF/plexus/components.xml";

#[derive(Debug, Default)]
pub struct ComponentsXmlTransformer {
    components: Vec<(String, Element)>,
}

impl ComponentsXmlTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, key: String, mut component: Element) {
        match self.components.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => {
                if let Some(configuration) = existing.child("configuration") {
                    component.push_element(configuration.clone());
                }
                *existing = component;
            }
            None => self.components.push((key, component)),
        }
    }
}

fn child_text(element: &Element, name: &str) -> String {
    element
        .child(name)
        .and_then(Element::text)
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}

impl ResourceTransformer for ComponentsXmlTransformer {
    fn name(&self) -> &'static str {
        "components-xml"
    }

    fn resource_path(&self) -> Option<&str> {
        Some(COMPONENTS_XML_PATH)
    }

    fn claims(&self, path: &str) -> bool {
        path == COMPONENTS_XML_PATH
    }

    fn consume(&mut self, entry: &ResourceEntry<'_>, relocators: &[Relocator]) -> Result<()> {
        let root = parse_xml(entry)?;
        let Some(components) = root.child("components") else {
            return Ok(());
        };

        for component in components.children_named("component") {
            let mut component = component.clone();
            relocate_child_text(&mut component, "role", relocators);
            relocate_child_text(&mut component, "implementation", relocators);

            if let Some(requirements) = component.child_mut("requirements") {
                for requirement in requirements.elements_mut() {
                    relocate_child_text(requirement, "role", relocators);
                }
            }

            let key = format!(
                "{}:{}",
                child_text(&component, "role"),
                child_text(&component, "role-hint")
            );
            self.insert(key, component);
        }
        Ok(())
    }

    fn has_content(&self) -> bool {
        !self.components.is_empty()
    }

    fn finalize(&mut self, sink: &mut dyn EntrySink) -> Result<()> {
        let mut components = Element::new("components");
        components.children = std::mem::take(&mut self.components)
            .into_iter()
            .map(|(_, c)| Node::Element(c))
            .collect();
        let mut root = Element::new("component-set");
        root.push_element(components);

        sink.write_entry(COMPONENTS_XML_PATH, &write_xml(COMPONENTS_XML_PATH, &root)?)
    }
}
