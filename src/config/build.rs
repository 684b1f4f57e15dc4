//! Build configuration (uberpack.yaml) data structures

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::TransformerConfig;
use crate::coordinate::{Coordinate, CoordinateSelector};
use crate::error::{
    Result, config_invalid, config_not_found, config_parse_failed, config_read_failed,
};
use crate::relocation::Relocator;
use crate::transformer::TransformerRegistry;

/// Root of uberpack.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// The artifact being packaged; it is scanned first
    pub project: ArtifactConfig,

    /// Dependency archives, scanned in this order after the project
    #[serde(default)]
    pub artifacts: Vec<ArtifactConfig>,

    #[serde(default)]
    pub artifact_set: ArtifactSetConfig,

    /// Only artifacts whose group starts with this prefix are included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_filter: Option<String>,

    #[serde(default)]
    pub relocations: Vec<RelocationConfig>,

    #[serde(default)]
    pub transformers: Vec<TransformerConfig>,

    /// Output archive path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Rewrite package names inside `.java` sources as well
    #[serde(default)]
    pub shade_sources_content: bool,

    /// Directory relative paths resolve against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// `group:name[:type[:classifier]]`
    pub coordinate: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactSetConfig {
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelocationConfig {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shaded_pattern: Option<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
}

/// An input archive with its resolved location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactInput {
    pub coordinate: Coordinate,
    pub path: PathBuf,
}

/// Everything a build needs, resolved and validated
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub project: ArtifactInput,
    pub artifacts: Vec<ArtifactInput>,
    pub selector: CoordinateSelector,
    pub relocators: Vec<Relocator>,
    pub output: Option<PathBuf>,
    pub shade_sources: bool,
}

impl BuildConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str, base_dir: &Path) -> Result<Self> {
        let mut config: Self = serde_yaml::from_str(yaml)?;
        config.base_dir = base_dir.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(config_not_found(path.display().to_string()));
        }
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| config_read_failed(path.display().to_string(), e.to_string()))?;
        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut config: Self = serde_yaml::from_str(&yaml)
            .map_err(|e| config_parse_failed(path.display().to_string(), e.to_string()))?;
        config.base_dir = base_dir.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    /// Build every pattern, relocator and transformer so errors surface now
    pub fn validate(&self) -> Result<()> {
        self.plan()?;
        self.registry()?;
        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    fn input(&self, artifact: &ArtifactConfig) -> Result<ArtifactInput> {
        Ok(ArtifactInput {
            coordinate: Coordinate::parse(artifact.coordinate.trim())?,
            path: self.resolve(&artifact.path),
        })
    }

    pub fn relocators(&self) -> Result<Vec<Relocator>> {
        self.relocations
            .iter()
            .map(|r| {
                Relocator::new(
                    &r.pattern,
                    r.shaded_pattern.as_deref(),
                    &r.includes,
                    &r.excludes,
                )
            })
            .collect()
    }

    /// Fresh transformer set for one merge run
    pub fn registry(&self) -> Result<TransformerRegistry> {
        let mut registry = TransformerRegistry::new();
        for transformer in &self.transformers {
            registry.register(transformer.build(&self.base_dir)?)?;
        }
        Ok(registry)
    }

    pub fn plan(&self) -> Result<BuildPlan> {
        let project = self.input(&self.project)?;
        let artifacts = self
            .artifacts
            .iter()
            .map(|a| self.input(a))
            .collect::<Result<Vec<_>>>()?;

        let group_prefix = self
            .group_filter
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string);
        let selector = CoordinateSelector::from_patterns(
            &self.artifact_set.includes,
            &self.artifact_set.excludes,
            group_prefix,
        )?
        .with_project(&project.coordinate);

        if let Some(output) = &self.output {
            if output.as_os_str().is_empty() {
                return Err(config_invalid("output path must not be empty"));
            }
        }

        Ok(BuildPlan {
            project,
            artifacts,
            selector,
            relocators: self.relocators()?,
            output: self.output.as_ref().map(|o| self.resolve(o)),
            shade_sources: self.shade_sources_content,
        })
    }
}

fn is_pom(coordinate: &Coordinate) -> bool {
    coordinate.artifact_type == "pom"
}

impl BuildPlan {
    /// Archives to merge, project first, in configured order
    pub fn inputs(&self) -> Vec<&ArtifactInput> {
        let mut inputs = Vec::new();

        if self.selector.is_selected(&self.project.coordinate) && !is_pom(&self.project.coordinate)
        {
            inputs.push(&self.project);
        }

        for artifact in &self.artifacts {
            if !self.selector.is_selected(&artifact.coordinate) {
                info!("Excluding {} from the uber-archive", artifact.coordinate);
                continue;
            }
            if is_pom(&artifact.coordinate) {
                info!("Skipping pom dependency {}", artifact.coordinate);
                continue;
            }
            info!("Including {} in the uber-archive", artifact.coordinate);
            inputs.push(artifact);
        }

        inputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UberpackError;
    use tempfile::TempDir;

    const CONFIG: &str = r"
project:
  coordinate: com.example:app
  path: target/app.jar
artifacts:
  - coordinate: org.lib:core
    path: libs/core.jar
  - coordinate: org.lib:bom:pom
    path: libs/bom.pom
  - coordinate: org.other:util
    path: /abs/util.jar
artifact_set:
  includes: ['org.lib']
relocations:
  - pattern: org.lib
    shaded_pattern: com.example.shaded.lib
    excludes: ['org.lib.api.*']
transformers:
  - kind: manifest
    main_class: com.example.Main
  - kind: services
output: target/app-uber.jar
";

    #[test]
    fn test_parse_full_config() {
        let config = BuildConfig::from_yaml(CONFIG, Path::new("/work")).unwrap();
        assert_eq!(config.artifacts.len(), 3);
        assert_eq!(config.transformers.len(), 2);
        assert!(!config.shade_sources_content);

        let plan = config.plan().unwrap();
        assert_eq!(plan.project.path, PathBuf::from("/work/target/app.jar"));
        assert_eq!(plan.artifacts[2].path, PathBuf::from("/abs/util.jar"));
        assert_eq!(plan.output, Some(PathBuf::from("/work/target/app-uber.jar")));
        assert_eq!(plan.relocators.len(), 1);
        assert_eq!(config.registry().unwrap().names(), vec!["manifest", "services"]);
    }

    #[test]
    fn test_inputs_select_project_and_skip_pom() {
        let config = BuildConfig::from_yaml(CONFIG, Path::new("/work")).unwrap();
        let plan = config.plan().unwrap();
        let names: Vec<String> = plan
            .inputs()
            .iter()
            .map(|i| i.coordinate.name.clone())
            .collect();
        assert_eq!(names, vec!["app", "core"]);
    }

    #[test]
    fn test_group_filter() {
        let yaml = r"
project: { coordinate: 'org.a:app', path: app.jar }
artifacts:
  - { coordinate: 'org.a:one', path: one.jar }
  - { coordinate: 'com.b:two', path: two.jar }
group_filter: org.
";
        let config = BuildConfig::from_yaml(yaml, Path::new(".")).unwrap();
        let plan = config.plan().unwrap();
        let names: Vec<String> = plan
            .inputs()
            .iter()
            .map(|i| i.coordinate.name.clone())
            .collect();
        assert_eq!(names, vec!["app", "one"]);
    }

    #[test]
    fn test_invalid_pattern_fails_at_load() {
        let yaml = r"
project: { coordinate: 'org.a:app', path: app.jar }
artifact_set:
  excludes: ['a:b:c:d:e']
";
        let err = BuildConfig::from_yaml(yaml, Path::new(".")).unwrap_err();
        assert!(matches!(err, UberpackError::InvalidPattern { .. }));
    }

    #[test]
    fn test_conflicting_transformers_fail_at_load() {
        let yaml = r"
project: { coordinate: 'org.a:app', path: app.jar }
transformers:
  - kind: append
    resource: META-INF/MANIFEST.MF
  - kind: manifest
";
        let err = BuildConfig::from_yaml(yaml, Path::new(".")).unwrap_err();
        assert!(matches!(err, UberpackError::ConflictingTransformers { .. }));
    }

    #[test]
    fn test_broad_transformer_before_fixed_path_fails_at_load() {
        let yaml = r"
project: { coordinate: 'org.a:app', path: app.jar }
transformers:
  - kind: services
  - kind: extension-module
";
        let err = BuildConfig::from_yaml(yaml, Path::new(".")).unwrap_err();
        assert!(matches!(err, UberpackError::ConflictingTransformers { .. }));

        let reordered = r"
project: { coordinate: 'org.a:app', path: app.jar }
transformers:
  - kind: extension-module
  - kind: services
";
        assert!(BuildConfig::from_yaml(reordered, Path::new(".")).is_ok());
    }

    #[test]
    fn test_load_resolves_relative_to_config_dir() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("uberpack.yaml");
        std::fs::write(&path, CONFIG).unwrap();

        let config = BuildConfig::load(&path).unwrap();
        assert_eq!(config.base_dir, temp.path());
        let plan = config.plan().unwrap();
        assert_eq!(plan.project.path, temp.path().join("target/app.jar"));
    }

    #[test]
    fn test_load_errors() {
        let temp = TempDir::new().unwrap();
        let missing = BuildConfig::load(&temp.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(missing, UberpackError::ConfigNotFound { .. }));

        let bad = temp.path().join("bad.yaml");
        std::fs::write(&bad, "project: [unclosed").unwrap();
        let err = BuildConfig::load(&bad).unwrap_err();
        assert!(matches!(err, UberpackError::ConfigParseFailed { .. }));
    }
}
