//! Path and source remapping for pass-through entries

use super::Relocator;

/// Applies a relocator list to archive paths and Java sources
#[derive(Debug, Clone, Copy)]
pub struct PathRemapper<'a> {
    relocators: &'a [Relocator],
}

impl<'a> PathRemapper<'a> {
    pub fn new(relocators: &'a [Relocator]) -> Self {
        Self { relocators }
    }

    pub fn has_relocators(&self) -> bool {
        !self.relocators.is_empty()
    }

    /// Map a path or a `[*L<name>;` type descriptor
    ///
    /// Only the first relocator that accepts the name is applied.
    pub fn map_path(&self, name: &str) -> String {
        let (prefix, inner, suffix) = split_descriptor(name);

        self.relocators
            .iter()
            .find(|r| r.can_relocate_path(inner))
            .map_or_else(
                || name.to_string(),
                |r| format!("{prefix}{}{suffix}", r.relocate_path(inner)),
            )
    }

    /// Rewrite Java source text with every relocator in order
    pub fn relocate_source(&self, content: &str) -> String {
        self.relocators
            .iter()
            .fold(content.to_string(), |acc, r| r.apply_to_source_content(&acc))
    }
}

/// Split `[[Lorg/foo/Bar;` into (`[[L`, `org/foo/Bar`, `;`)
fn split_descriptor(name: &str) -> (&str, &str, &str) {
    let arrays = name.len() - name.trim_start_matches('[').len();
    let rest = &name[arrays..];
    match rest.strip_prefix('L').and_then(|r| r.strip_suffix(';')) {
        Some(inner) if !inner.is_empty() => (&name[..=arrays], inner, ";"),
        _ => ("", name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relocators() -> Vec<Relocator> {
        vec![
            Relocator::new("org.foo", Some("shaded.foo"), &[], &[]).unwrap(),
            Relocator::new("shaded", Some("twice"), &[], &[]).unwrap(),
        ]
    }

    #[test]
    fn test_map_plain_path() {
        let relocators = relocators();
        let remapper = PathRemapper::new(&relocators);
        assert_eq!(
            remapper.map_path("org/foo/res/data.properties"),
            "shaded/foo/res/data.properties"
        );
        assert_eq!(remapper.map_path("META-INF/LICENSE"), "META-INF/LICENSE");
    }

    #[test]
    fn test_map_descriptor() {
        let relocators = relocators();
        let remapper = PathRemapper::new(&relocators);
        assert_eq!(remapper.map_path("Lorg/foo/Bar;"), "Lshaded/foo/Bar;");
        assert_eq!(remapper.map_path("[[Lorg/foo/Bar;"), "[[Lshaded/foo/Bar;");
        assert_eq!(remapper.map_path("[I"), "[I");
    }

    #[test]
    fn test_relocate_source_applies_all_in_order() {
        let relocators = relocators();
        let remapper = PathRemapper::new(&relocators);
        assert_eq!(
            remapper.relocate_source("import org.foo.Bar;"),
            "import twice.foo.Bar;"
        );
    }

    #[test]
    fn test_no_relocators() {
        let remapper = PathRemapper::new(&[]);
        assert!(!remapper.has_relocators());
        assert_eq!(remapper.map_path("org/foo/Bar"), "org/foo/Bar");
    }
}
