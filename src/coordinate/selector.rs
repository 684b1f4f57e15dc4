//! Include/exclude selection over artifact coordinates

use tracing::debug;

use super::{Coordinate, CoordinatePattern};
use crate::error::Result;

/// Decides which input archives take part in a merge
///
/// A coordinate is selected when it matches some include (or there are no
/// includes), matches no exclude, and its group starts with the group prefix
/// if one is set.
#[derive(Debug, Clone, Default)]
pub struct CoordinateSelector {
    includes: Vec<CoordinatePattern>,
    excludes: Vec<CoordinatePattern>,
    group_prefix: Option<String>,
}

impl CoordinateSelector {
    pub fn new(
        includes: Vec<CoordinatePattern>,
        excludes: Vec<CoordinatePattern>,
        group_prefix: Option<String>,
    ) -> Self {
        Self {
            includes,
            excludes,
            group_prefix,
        }
    }

    /// Build a selector from pattern strings
    pub fn from_patterns<S: AsRef<str>>(
        includes: &[S],
        excludes: &[S],
        group_prefix: Option<String>,
    ) -> Result<Self> {
        let includes = includes
            .iter()
            .map(|p| CoordinatePattern::parse(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let excludes = excludes
            .iter()
            .map(|p| CoordinatePattern::parse(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(includes, excludes, group_prefix))
    }

    /// Make sure the project's own artifact survives a non-empty include list
    #[must_use]
    pub fn with_project(mut self, project: &Coordinate) -> Self {
        if !self.includes.is_empty() {
            self.includes.push(CoordinatePattern {
                group: project.group.clone(),
                name: project.name.clone(),
                artifact_type: project.artifact_type.clone(),
                classifier: project.classifier.clone(),
            });
        }
        self
    }

    pub fn is_selected(&self, coordinate: &Coordinate) -> bool {
        let included =
            self.includes.is_empty() || self.includes.iter().any(|p| p.matches(coordinate));
        let excluded = self.excludes.iter().any(|p| p.matches(coordinate));
        let in_group = self
            .group_prefix
            .as_deref()
            .is_none_or(|prefix| coordinate.group.starts_with(prefix));

        let selected = included && !excluded && in_group;
        debug!(
            %coordinate,
            included, excluded, in_group, selected, "Evaluated coordinate"
        );
        selected
    }
}
