//! Plugin descriptor transformer
//!
//! Collects every `mojo` under `plugin/mojos` from all copies of
//! `META-INF/maven/plugin.xml` into one descriptor. Type-bearing fields are
//! relocated; free-text fields are left alone:
//!
//! - `mojo/implementation`
//! - `mojo/parameters/*/type`
//! - `mojo/configuration/*/@implementation`
//! - `mojo/requirements/requirement/role`
//!
//! Mojos are kept in encounter order and never deduplicated.

use tracing::debug;

use super::{ResourceEntry, ResourceTransformer, parse_xml, relocate_child_text, write_xml};
use crate::driver::EntrySink;
use crate::error::Result;
use crate::format::xml::Element;
use crate::relocation::{Relocator, relocate_class};

pub const PLUGIN_XML_PATH: &str = "META-INF/maven/plugin.xml";

#[derive(Debug, Default)]
pub struct PluginDescriptorTransformer {
    mojos: Vec<Element>,
}

impl PluginDescriptorTransformer {
    pub fn new() -> Self {
        Self::default()
    }
}

fn relocate_mojo(mojo: &mut Element, relocators: &[Relocator]) {
    relocate_child_text(mojo, "implementation", relocators);

    if let Some(parameters) = mojo.child_mut("parameters") {
        for parameter in parameters.elements_mut() {
            relocate_child_text(parameter, "type", relocators);
        }
    }

    if let Some(configuration) = mojo.child_mut("configuration") {
        for setting in configuration.elements_mut() {
            if let Some(implementation) = setting.attribute("implementation") {
                let relocated = relocate_class(relocators, implementation);
                setting.set_attribute("implementation", relocated);
            }
        }
    }

    if let Some(requirements) = mojo.child_mut("requirements") {
        for requirement in requirements.elements_mut() {
            if requirement.name == "requirement" {
                relocate_child_text(requirement, "role", relocators);
            }
        }
    }
}

impl ResourceTransformer for PluginDescriptorTransformer {
    fn name(&self) -> &'static str {
        "plugin-descriptor"
    }

    fn resource_path(&self) -> Option<&str> {
        Some(PLUGIN_XML_PATH)
    }

    fn claims(&self, path: &str) -> bool {
        path == PLUGIN_XML_PATH
    }

    fn consume(&mut self, entry: &ResourceEntry<'_>, relocators: &[Relocator]) -> Result<()> {
        let root = parse_xml(entry)?;
        let Some(mojos) = root.child("mojos") else {
            debug!(archive = entry.archive, "Plugin descriptor has no mojos");
            return Ok(());
        };

        for mojo in mojos.children_named("mojo") {
            let mut mojo = mojo.clone();
            relocate_mojo(&mut mojo, relocators);
            self.mojos.push(mojo);
        }
        Ok(())
    }

    fn has_content(&self) -> bool {
        !self.mojos.is_empty()
    }

    fn finalize(&mut self, sink: &mut dyn EntrySink) -> Result<()> {
        let mut mojos = Element::new("mojos");
        for mojo in std::mem::take(&mut self.mojos) {
            mojos.push_element(mojo);
        }
        let mut plugin = Element::new("plugin");
        plugin.push_element(mojos);

        sink.write_entry(PLUGIN_XML_PATH, &write_xml(PLUGIN_XML_PATH, &plugin)?)
    }
}
