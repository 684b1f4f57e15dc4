//! Package relocation rules
//!
//! A [`Relocator`] renames everything under one package prefix into another,
//! e.g. `org.apache.commons` to `shaded.org.apache.commons`. The rule is held in
//! both dotted (class name) and slashed (archive path) form.
//!
//! Include and exclude sub-patterns are globs in path form:
//!
//! ```text
//! org.apache.commons.io.*     excludes org/apache/commons/io and everything under it
//! org.apache.commons.Foo      excludes only that exact class
//! ```
//!
//! When several relocators are active, the first one that accepts a name is
//! the only one applied to it.

pub mod remapper;

pub use remapper::PathRemapper;

use wax::{CandidatePath, Glob, Pattern};

use crate::error::{Result, config_invalid};

const CLASS_SUFFIX: &str = ".class";

/// A single rename rule with optional include/exclude sub-patterns
#[derive(Debug, Clone)]
pub struct Relocator {
    pattern: String,
    path_pattern: String,
    shaded_pattern: String,
    shaded_path_pattern: String,
    includes: Vec<Glob<'static>>,
    excludes: Vec<Glob<'static>>,
}

impl Relocator {
    /// Create a relocator
    ///
    /// `shaded_pattern` defaults to `hidden.` + `pattern`. Include and
    /// exclude sub-patterns are compiled here; an invalid glob is a
    /// configuration error.
    pub fn new(
        pattern: &str,
        shaded_pattern: Option<&str>,
        includes: &[String],
        excludes: &[String],
    ) -> Result<Self> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(config_invalid("relocation pattern must not be empty"));
        }

        let dotted = pattern.replace('/', ".");
        let shaded = match shaded_pattern.map(str::trim) {
            Some(s) if !s.is_empty() => s.replace('/', "."),
            _ => format!("hidden.{dotted}"),
        };

        Ok(Self {
            path_pattern: dotted.replace('.', "/"),
            shaded_path_pattern: shaded.replace('.', "/"),
            pattern: dotted,
            shaded_pattern: shaded,
            includes: compile_patterns(includes)?,
            excludes: compile_patterns(excludes)?,
        })
    }

    /// Source prefix in dotted form
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Target prefix in dotted form
    pub fn shaded_pattern(&self) -> &str {
        &self.shaded_pattern
    }

    /// Whether an archive path (slash form) falls under this rule
    pub fn can_relocate_path(&self, path: &str) -> bool {
        let path = path.strip_suffix(CLASS_SUFFIX).unwrap_or(path);

        if !self.is_included(path) || self.is_excluded(path) {
            return false;
        }

        path.starts_with(&self.path_pattern)
            || path
                .strip_prefix('/')
                .is_some_and(|p| p.starts_with(&self.path_pattern))
    }

    /// Whether a dotted class name falls under this rule
    pub fn can_relocate_class(&self, class_name: &str) -> bool {
        !class_name.contains('/') && self.can_relocate_path(&class_name.replace('.', "/"))
    }

    /// Replace the first occurrence of the path prefix
    pub fn relocate_path(&self, path: &str) -> String {
        path.replacen(&self.path_pattern, &self.shaded_path_pattern, 1)
    }

    /// Replace the dotted prefix of a class name
    pub fn relocate_class(&self, class_name: &str) -> String {
        match class_name.strip_prefix(&self.pattern) {
            Some(rest) => format!("{}{rest}", self.shaded_pattern),
            None => class_name.replacen(&self.pattern, &self.shaded_pattern, 1),
        }
    }

    /// Rewrite every occurrence of the dotted prefix that starts a word
    pub fn apply_to_source_content(&self, content: &str) -> String {
        let mut out = String::with_capacity(content.len());
        let mut rest = content;
        let mut prev: Option<char> = None;

        while let Some(idx) = rest.find(&self.pattern) {
            let before = rest[..idx].chars().next_back().or(prev);
            out.push_str(&rest[..idx]);
            if before.is_some_and(is_word_char) {
                out.push_str(&self.pattern);
            } else {
                out.push_str(&self.shaded_pattern);
            }
            prev = self.pattern.chars().next_back();
            rest = &rest[idx + self.pattern.len()..];
        }
        out.push_str(rest);
        out
    }

    fn is_included(&self, path: &str) -> bool {
        self.includes.is_empty() || self.includes.iter().any(|g| glob_matches(g, path))
    }

    fn is_excluded(&self, path: &str) -> bool {
        self.excludes.iter().any(|g| glob_matches(g, path))
    }
}

/// Relocate a dotted class name with the first relocator that accepts it
pub fn relocate_class(relocators: &[Relocator], class_name: &str) -> String {
    if class_name.is_empty() {
        return String::new();
    }
    relocators
        .iter()
        .find(|r| r.can_relocate_class(class_name))
        .map_or_else(|| class_name.to_string(), |r| r.relocate_class(class_name))
}

/// Relocate an archive path with the first relocator that accepts it
pub fn relocate_path(relocators: &[Relocator], path: &str) -> String {
    relocators
        .iter()
        .find(|r| r.can_relocate_path(path))
        .map_or_else(|| path.to_string(), |r| r.relocate_path(path))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Convert dotted sub-patterns to path globs
///
/// A trailing wildcard also covers the package itself and its whole subtree.
fn normalize_patterns(patterns: &[String]) -> Vec<String> {
    let mut normalized = Vec::new();
    for pattern in patterns {
        let path = pattern.trim().replace('.', "/");
        if path.is_empty() {
            continue;
        }
        let package = path
            .strip_suffix("/**")
            .or_else(|| path.strip_suffix("/*"))
            .map(str::to_string);
        normalized.push(path);
        if let Some(package) = package {
            normalized.push(format!("{package}/**"));
            normalized.push(package);
        }
    }
    normalized.dedup();
    normalized
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Glob<'static>>> {
    normalize_patterns(patterns)
        .iter()
        .map(|pattern| {
            Glob::new(pattern).map(Glob::into_owned).map_err(|e| {
                config_invalid(format!("invalid relocation sub-pattern '{pattern}': {e}"))
            })
        })
        .collect()
}

fn glob_matches(glob: &Glob<'_>, path: &str) -> bool {
    let path = path.strip_prefix('/').unwrap_or(path);
    glob.matched(&CandidatePath::from(path)).is_some()
}
