//! Artifact coordinates and coordinate patterns
//!
//! A [`Coordinate`] is the concrete `group:name:type:classifier` identity of an
//! input archive. A [`CoordinatePattern`] is the glob form used to include or
//! exclude archives:
//!
//! ```text
//! gid                 group=gid  name=*    type=*     classifier=*
//! gid:aid             group=gid  name=aid  type=*     classifier=*
//! gid:aid:cls         group=gid  name=aid  type=*     classifier=cls
//! gid:aid:type:cls    group=gid  name=aid  type=type  classifier=cls
//! ```
//!
//! The three-segment form is classifier shorthand. An explicit but empty segment
//! means "exactly empty", which is different from `*`.

pub mod selector;
pub mod wildcard;

pub use selector::CoordinateSelector;

use std::fmt;

use crate::error::{Result, invalid_pattern};

const ANY: &str = "*";

/// Concrete identity of an input archive
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub group: String,
    pub name: String,
    pub artifact_type: String,
    pub classifier: String,
}

impl Coordinate {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        artifact_type: impl Into<String>,
        classifier: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            artifact_type: artifact_type.into(),
            classifier: classifier.into(),
        }
    }

    /// Parse `group:name[:type[:classifier]]`
    ///
    /// Type defaults to `jar` and classifier to empty.
    pub fn parse(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split(':').collect();
        if parts.len() < 2 || parts.len() > 4 {
            return Err(invalid_pattern(
                text,
                "expected group:name[:type[:classifier]]",
            ));
        }
        if parts[0].is_empty() || parts[1].is_empty() {
            return Err(invalid_pattern(text, "group and name must not be empty"));
        }

        let artifact_type = parts.get(2).filter(|t| !t.is_empty()).unwrap_or(&"jar");
        let classifier = parts.get(3).copied().unwrap_or("");

        Ok(Self::new(parts[0], parts[1], *artifact_type, classifier))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.artifact_type)?;
        if !self.classifier.is_empty() {
            write!(f, ":{}", self.classifier)?;
        }
        Ok(())
    }
}

/// Glob pattern over the four coordinate fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatePattern {
    pub group: String,
    pub name: String,
    pub artifact_type: String,
    pub classifier: String,
}

impl Default for CoordinatePattern {
    /// The pattern produced by absent text: empty group, everything else open
    fn default() -> Self {
        Self {
            group: String::new(),
            name: ANY.to_string(),
            artifact_type: ANY.to_string(),
            classifier: ANY.to_string(),
        }
    }
}

impl CoordinatePattern {
    /// Parse a pattern of up to four `:`-separated segments
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Ok(Self::default());
        }

        let tokens: Vec<&str> = text.split(':').collect();
        if tokens.len() > 4 {
            return Err(invalid_pattern(
                text,
                format!("{} segments, at most 4 allowed", tokens.len()),
            ));
        }

        let group = tokens[0].to_string();
        let name = tokens.get(1).map_or(ANY, |s| *s).to_string();
        let (artifact_type, classifier) = match tokens.len() {
            4 => (tokens[2], tokens[3]),
            3 => (ANY, tokens[2]),
            _ => (ANY, ANY),
        };

        Ok(Self {
            group,
            name,
            artifact_type: artifact_type.to_string(),
            classifier: classifier.to_string(),
        })
    }

    /// Parse an absent pattern the same way as an empty one
    pub fn parse_optional(text: Option<&str>) -> Result<Self> {
        text.map_or_else(|| Ok(Self::default()), Self::parse)
    }

    /// All four fields must match
    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        wildcard::matches(&self.group, &coordinate.group)
            && wildcard::matches(&self.name, &coordinate.name)
            && wildcard::matches(&self.artifact_type, &coordinate.artifact_type)
            && wildcard::matches(&self.classifier, &coordinate.classifier)
    }
}

impl fmt::Display for CoordinatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group, self.name, self.artifact_type, self.classifier
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(g: &str, a: &str) -> Coordinate {
        Coordinate::new(g, a, "jar", "")
    }

    #[test]
    fn test_parse_one_segment() {
        let p = CoordinatePattern::parse("gid").unwrap();
        assert_eq!(p.group, "gid");
        assert_eq!(p.name, "*");
        assert_eq!(p.artifact_type, "*");
        assert_eq!(p.classifier, "*");
    }

    #[test]
    fn test_parse_two_segments() {
        let p = CoordinatePattern::parse("gid:aid").unwrap();
        assert_eq!(p.group, "gid");
        assert_eq!(p.name, "aid");
        assert_eq!(p.artifact_type, "*");
        assert_eq!(p.classifier, "*");
    }

    #[test]
    fn test_parse_three_segments_is_classifier_shorthand() {
        let p = CoordinatePattern::parse("gid:aid:cls").unwrap();
        assert_eq!(p.artifact_type, "*");
        assert_eq!(p.classifier, "cls");
    }

    #[test]
    fn test_parse_four_segments() {
        let p = CoordinatePattern::parse("gid:aid:type:cls").unwrap();
        assert_eq!(p.group, "gid");
        assert_eq!(p.name, "aid");
        assert_eq!(p.artifact_type, "type");
        assert_eq!(p.classifier, "cls");
    }

    #[test]
    fn test_parse_too_many_segments() {
        let err = CoordinatePattern::parse("a:b:c:d:e").unwrap_err();
        assert!(matches!(err, crate::error::UberpackError::InvalidPattern { .. }));
    }

    #[test]
    fn test_parse_absent_text() {
        let p = CoordinatePattern::parse_optional(None).unwrap();
        assert_eq!(p, CoordinatePattern::default());
        assert_eq!(p.group, "");
        assert!(p.matches(&coord("", "anything")));
        assert!(!p.matches(&coord("gid", "anything")));
    }

    #[test]
    fn test_explicit_empty_segment_matches_only_empty() {
        let p = CoordinatePattern::parse("gid:aid::").unwrap();
        assert_eq!(p.artifact_type, "");
        assert_eq!(p.classifier, "");
        assert!(!p.matches(&coord("gid", "aid")));
        assert!(p.matches(&Coordinate::new("gid", "aid", "", "")));
    }

    #[test]
    fn test_wildcard_matching() {
        let star = CoordinatePattern::parse("gid:a*d").unwrap();
        assert!(star.matches(&coord("gid", "aid")));

        let question = CoordinatePattern::parse("gid:a?d").unwrap();
        assert!(!question.matches(&coord("gid", "ad")));
        assert!(question.matches(&coord("gid", "aid")));
    }

    #[test]
    fn test_classifier_shorthand_matching() {
        let p = CoordinatePattern::parse("gid:aid:tests").unwrap();
        assert!(p.matches(&Coordinate::new("gid", "aid", "test-jar", "tests")));
        assert!(!p.matches(&Coordinate::new("gid", "aid", "tests", "")));
    }

    #[test]
    fn test_coordinate_parse() {
        let c = Coordinate::parse("org.example:lib").unwrap();
        assert_eq!(c.artifact_type, "jar");
        assert_eq!(c.classifier, "");
        assert_eq!(c.to_string(), "org.example:lib:jar");

        let c = Coordinate::parse("org.example:lib:test-jar:tests").unwrap();
        assert_eq!(c.to_string(), "org.example:lib:test-jar:tests");
    }

    #[test]
    fn test_coordinate_parse_rejects_malformed() {
        assert!(Coordinate::parse("org.example").is_err());
        assert!(Coordinate::parse(":lib").is_err());
        assert!(Coordinate::parse("a:b:c:d:e").is_err());
    }
}
