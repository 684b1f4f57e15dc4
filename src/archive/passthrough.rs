//! Default handling for entries no transformer claims
//!
//! - `META-INF/INDEX.LIST` is dropped; a stale index breaks class loading.
//! - Resource paths are remapped through the relocators.
//! - `.java` sources are rewritten when source shading is on.
//! - `.class` entries are copied as is and tracked so classes defined by more
//!   than one archive can be reported.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::ZipEntryWriter;
use crate::driver::EntrySink;
use crate::error::Result;
use crate::relocation::{PathRemapper, Relocator};

const INDEX_LIST: &str = "META-INF/INDEX.LIST";
const MAX_LISTED_CLASSES: usize = 10;

/// A group of archives defining the same classes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub archives: Vec<String>,
    pub classes: Vec<String>,
}

pub struct PassthroughWriter<'a> {
    output: &'a mut ZipEntryWriter,
    remapper: PathRemapper<'a>,
    shade_sources: bool,
    current_archive: String,
    /// Class path to the archives that contain it
    classes: BTreeMap<String, Vec<String>>,
}

impl<'a> PassthroughWriter<'a> {
    pub fn new(
        output: &'a mut ZipEntryWriter,
        relocators: &'a [Relocator],
        shade_sources: bool,
    ) -> Self {
        Self {
            output,
            remapper: PathRemapper::new(relocators),
            shade_sources,
            current_archive: String::new(),
            classes: BTreeMap::new(),
        }
    }

    /// Set the archive that following entries come from
    pub fn begin_archive(&mut self, identity: &str) {
        self.current_archive = identity.to_string();
    }

    /// Classes found in more than one archive, grouped by archive set
    pub fn overlaps(&self) -> Vec<Overlap> {
        let mut groups: BTreeMap<Vec<String>, Vec<String>> = BTreeMap::new();
        for (class, archives) in &self.classes {
            if archives.len() > 1 {
                let name = class
                    .strip_suffix(".class")
                    .unwrap_or(class)
                    .replace('/', ".");
                groups.entry(archives.clone()).or_default().push(name);
            }
        }
        groups
            .into_iter()
            .map(|(archives, classes)| Overlap { archives, classes })
            .collect()
    }

    /// Log overlapping classes; returns the number of archive groups reported
    pub fn report_overlaps(&self) -> usize {
        let overlaps = self.overlaps();
        for overlap in &overlaps {
            warn!(
                "{} define {} overlapping classes:",
                overlap.archives.join(", "),
                overlap.classes.len()
            );
            for class in overlap.classes.iter().take(MAX_LISTED_CLASSES) {
                warn!("  - {class}");
            }
            if overlap.classes.len() > MAX_LISTED_CLASSES {
                warn!("  - {} more...", overlap.classes.len() - MAX_LISTED_CLASSES);
            }
        }
        if !overlaps.is_empty() {
            warn!("Some classes are present in two or more archives; only the first copy is kept");
        }
        overlaps.len()
    }

    fn track_class(&mut self, path: &str) {
        let archives = self.classes.entry(path.to_string()).or_default();
        if !archives.contains(&self.current_archive) {
            archives.push(self.current_archive.clone());
        }
    }
}

impl EntrySink for PassthroughWriter<'_> {
    fn write_entry(&mut self, path: &str, contents: &[u8]) -> Result<()> {
        if path == INDEX_LIST {
            debug!(archive = %self.current_archive, "Dropping jar index");
            return Ok(());
        }

        if path.ends_with(".class") {
            self.track_class(path);
            return self.output.write_entry(path, contents);
        }

        let mapped = self.remapper.map_path(path);

        if self.shade_sources && path.ends_with(".java") {
            if self.output.contains(&mapped) {
                return Ok(());
            }
            let source = String::from_utf8_lossy(contents);
            let shaded = self.remapper.relocate_source(&source);
            return self.output.write_entry(&mapped, shaded.as_bytes());
        }

        if self.output.contains(&mapped) {
            debug!(archive = %self.current_archive, path = %mapped, "Skipping duplicate resource");
            return Ok(());
        }
        self.output.write_entry(&mapped, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn read(path: &std::path::Path, name: &str) -> Option<String> {
        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut file = archive.by_name(name).ok()?;
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        Some(out)
    }

    #[test]
    fn test_remaps_resources_and_drops_index() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("uber.jar");
        let relocators = vec![Relocator::new("org.foo", Some("x.foo"), &[], &[]).unwrap()];

        let mut writer = ZipEntryWriter::create(&out).unwrap();
        {
            let mut pass = PassthroughWriter::new(&mut writer, &relocators, true);
            pass.begin_archive("a.jar");
            pass.write_entry("META-INF/INDEX.LIST", b"index").unwrap();
            pass.write_entry("org/foo/messages.properties", b"k=v").unwrap();
            pass.write_entry("org/foo/Api.java", b"package org.foo;").unwrap();
            pass.write_entry("org/foo/Api.class", b"class").unwrap();
        }
        writer.finish().unwrap();

        assert_eq!(read(&out, "META-INF/INDEX.LIST"), None);
        assert_eq!(read(&out, "x/foo/messages.properties").as_deref(), Some("k=v"));
        assert_eq!(read(&out, "x/foo/Api.java").as_deref(), Some("package x.foo;"));
        assert_eq!(read(&out, "org/foo/Api.class").as_deref(), Some("class"));
    }

    #[test]
    fn test_overlapping_classes_reported() {
        let temp = TempDir::new().unwrap();
        let mut writer = ZipEntryWriter::create(&temp.path().join("uber.jar")).unwrap();
        let mut pass = PassthroughWriter::new(&mut writer, &[], false);

        pass.begin_archive("a.jar");
        pass.write_entry("p/Shared.class", b"a").unwrap();
        pass.write_entry("p/OnlyA.class", b"a").unwrap();
        pass.begin_archive("b.jar");
        pass.write_entry("p/Shared.class", b"b").unwrap();

        let overlaps = pass.overlaps();
        assert_eq!(
            overlaps,
            vec![Overlap {
                archives: vec!["a.jar".to_string(), "b.jar".to_string()],
                classes: vec!["p.Shared".to_string()],
            }]
        );
        assert_eq!(pass.report_overlaps(), 1);
    }
}
