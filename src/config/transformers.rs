//! Transformer entries of uberpack.yaml
//!
//! ```yaml
//! transformers:
//!   - kind: manifest
//!     main_class: com.example.Main
//!     entries:
//!       Built-By: uberpack
//!   - kind: extension-module
//!   - kind: services
//!   - kind: append
//!     resource: META-INF/spring.handlers
//!   - kind: dont-include
//!     suffixes: [".md"]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, config_invalid, file_not_found, file_read_failed};
use crate::transformer::{
    AppendingTransformer, ApacheLicenseTransformer, ComponentsXmlTransformer,
    DontIncludeTransformer, ExtensionModuleTransformer, IncludeTransformer, ManifestTransformer,
    PluginDescriptorTransformer, ResourceTransformer, ServicesTransformer,
    XmlAppendingTransformer,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TransformerConfig {
    Manifest {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        main_class: Option<String>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        entries: BTreeMap<String, String>,
    },
    Append {
        resource: String,
    },
    XmlAppend {
        resource: String,
    },
    PluginDescriptor,
    ComponentsXml,
    ExtensionModule {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        module_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        module_version: Option<String>,
    },
    Services,
    DontInclude {
        suffixes: Vec<String>,
    },
    ApacheLicense,
    Include {
        resource: String,
        file: PathBuf,
    },
}

fn require_resource<'a>(kind: &str, resource: &'a str) -> Result<&'a str> {
    let resource = resource.trim();
    if resource.is_empty() {
        return Err(config_invalid(format!("{kind} transformer needs a resource path")));
    }
    Ok(resource)
}

impl TransformerConfig {
    /// Build a fresh transformer; relative files resolve against `base_dir`
    pub fn build(&self, base_dir: &Path) -> Result<Box<dyn ResourceTransformer>> {
        let transformer: Box<dyn ResourceTransformer> = match self {
            Self::Manifest {
                main_class,
                entries,
            } => Box::new(ManifestTransformer::new(
                main_class.clone(),
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            )),
            Self::Append { resource } => {
                Box::new(AppendingTransformer::new(require_resource("append", resource)?))
            }
            Self::XmlAppend { resource } => Box::new(XmlAppendingTransformer::new(
                require_resource("xml-append", resource)?,
            )),
            Self::PluginDescriptor => Box::new(PluginDescriptorTransformer::new()),
            Self::ComponentsXml => Box::new(ComponentsXmlTransformer::new()),
            Self::ExtensionModule {
                module_name,
                module_version,
            } => Box::new(ExtensionModuleTransformer::new(
                module_name.clone(),
                module_version.clone(),
            )),
            Self::Services => Box::new(ServicesTransformer::new()),
            Self::DontInclude { suffixes } => {
                if suffixes.iter().all(|s| s.is_empty()) {
                    return Err(config_invalid(
                        "dont-include transformer needs at least one suffix",
                    ));
                }
                Box::new(DontIncludeTransformer::new(suffixes.clone()))
            }
            Self::ApacheLicense => Box::new(ApacheLicenseTransformer),
            Self::Include { resource, file } => {
                let resource = require_resource("include", resource)?;
                let path = base_dir.join(file);
                if !path.is_file() {
                    return Err(file_not_found(path.display().to_string()));
                }
                let contents = std::fs::read(&path)
                    .map_err(|e| file_read_failed(path.display().to_string(), e.to_string()))?;
                Box::new(IncludeTransformer::new(resource, contents))
            }
        };
        Ok(transformer)
    }
}
