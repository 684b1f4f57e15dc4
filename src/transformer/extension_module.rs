//! Groovy extension module descriptor transformer
//!
//! Harvests `extensionClasses` and `staticExtensionClasses` from every copy of
//! the descriptor, relocating each class name. Values are kept in encounter
//! order, duplicates included. Nothing is written unless both lists were
//! populated, even when module metadata is configured.

use super::{ResourceEntry, ResourceTransformer};
use crate::driver::EntrySink;
use crate::error::Result;
use crate::format::properties::Properties;
use crate::relocation::{Relocator, relocate_class};

pub const EXTENSION_MODULE_PATH: &str =
    "META-INF/services/org.codehaus.groovy.runtime.ExtensionModule";

const MODULE_NAME: &str = "moduleName";
const MODULE_VERSION: &str = "moduleVersion";
const EXTENSION_CLASSES: &str = "extensionClasses";
const STATIC_EXTENSION_CLASSES: &str = "staticExtensionClasses";

#[derive(Debug)]
pub struct ExtensionModuleTransformer {
    module_name: String,
    module_version: String,
    extension_classes: Vec<String>,
    static_extension_classes: Vec<String>,
}

impl Default for ExtensionModuleTransformer {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl ExtensionModuleTransformer {
    pub fn new(module_name: Option<String>, module_version: Option<String>) -> Self {
        Self {
            module_name: module_name.unwrap_or_else(|| "no-module-name".to_string()),
            module_version: module_version.unwrap_or_else(|| "1.0".to_string()),
            extension_classes: Vec::new(),
            static_extension_classes: Vec::new(),
        }
    }
}

fn harvest(target: &mut Vec<String>, value: Option<&str>, relocators: &[Relocator]) {
    let Some(value) = value else {
        return;
    };
    target.extend(
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| relocate_class(relocators, s)),
    );
}

impl ResourceTransformer for ExtensionModuleTransformer {
    fn name(&self) -> &'static str {
        "extension-module"
    }

    fn resource_path(&self) -> Option<&str> {
        Some(EXTENSION_MODULE_PATH)
    }

    fn claims(&self, path: &str) -> bool {
        path == EXTENSION_MODULE_PATH
    }

    fn consume(&mut self, entry: &ResourceEntry<'_>, relocators: &[Relocator]) -> Result<()> {
        let props = Properties::parse(&String::from_utf8_lossy(entry.contents));
        harvest(
            &mut self.extension_classes,
            props.get(EXTENSION_CLASSES),
            relocators,
        );
        harvest(
            &mut self.static_extension_classes,
            props.get(STATIC_EXTENSION_CLASSES),
            relocators,
        );
        Ok(())
    }

    fn has_content(&self) -> bool {
        !self.extension_classes.is_empty() && !self.static_extension_classes.is_empty()
    }

    fn finalize(&mut self, sink: &mut dyn EntrySink) -> Result<()> {
        let extension_classes = std::mem::take(&mut self.extension_classes);
        let static_extension_classes = std::mem::take(&mut self.static_extension_classes);
        if extension_classes.is_empty() || static_extension_classes.is_empty() {
            return Ok(());
        }

        let mut props = Properties::default();
        props.set(MODULE_NAME, self.module_name.as_str());
        props.set(MODULE_VERSION, self.module_version.as_str());
        props.set(EXTENSION_CLASSES, extension_classes.join(","));
        props.set(STATIC_EXTENSION_CLASSES, static_extension_classes.join(","));

        sink.write_entry(EXTENSION_MODULE_PATH, &props.to_bytes())
    }

    fn reset(&mut self) {
        self.extension_classes.clear();
        self.static_extension_classes.clear();
    }
}
