//! Merge driver
//!
//! Runs one merge in two phases:
//!
//! 1. **Scanning**: every entry of every archive, in order, is offered to the
//!    registered transformers. The first claimer consumes it; unclaimed entries
//!    go to the pass-through sink unchanged.
//! 2. **Finalizing**: every transformer with content writes its synthesized
//!    entry to the output sink, in registration order.
//!
//! Archive reading and writing happen behind the [`ArchiveSource`] and
//! [`EntrySink`] traits, so the driver itself only ever sees bytes.

pub mod memory;

pub use memory::{MemoryArchive, MemorySink};

use tracing::{debug, info};

use crate::error::Result;
use crate::relocation::Relocator;
use crate::transformer::{ResourceEntry, TransformerRegistry};

/// Output side: accepts one entry at a time
pub trait EntrySink {
    fn write_entry(&mut self, path: &str, contents: &[u8]) -> Result<()>;
}

/// A file entry read from an input archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub contents: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Input side: yields file entries in container order
pub trait ArchiveSource {
    /// Name used in logs and error messages
    fn identity(&self) -> &str;

    fn next_entry(&mut self) -> Result<Option<ArchiveEntry>>;
}

/// Counters for one merge run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub archives: usize,
    pub claimed: usize,
    pub passed_through: usize,
    pub synthesized: usize,
}

#[derive(Debug)]
pub struct MergeDriver {
    registry: TransformerRegistry,
    relocators: Vec<Relocator>,
    stats: MergeStats,
}

impl MergeDriver {
    pub fn new(registry: TransformerRegistry, relocators: Vec<Relocator>) -> Self {
        Self {
            registry,
            relocators,
            stats: MergeStats::default(),
        }
    }

    pub fn stats(&self) -> MergeStats {
        self.stats
    }

    /// Route one entry; returns true when a transformer claimed it
    pub fn scan_entry(
        &mut self,
        archive: &str,
        entry: &ArchiveEntry,
        passthrough: &mut dyn EntrySink,
    ) -> Result<bool> {
        if let Some(transformer) = self.registry.find_mut(&entry.path) {
            debug!(archive, path = %entry.path, kind = transformer.name(), "Claimed entry");
            let resource = ResourceEntry {
                archive,
                path: &entry.path,
                contents: &entry.contents,
            };
            transformer.consume(&resource, &self.relocators)?;
            self.stats.claimed += 1;
            return Ok(true);
        }

        passthrough.write_entry(&entry.path, &entry.contents)?;
        self.stats.passed_through += 1;
        Ok(false)
    }

    /// Scan every entry of one archive
    pub fn scan(
        &mut self,
        source: &mut dyn ArchiveSource,
        passthrough: &mut dyn EntrySink,
    ) -> Result<()> {
        let identity = source.identity().to_string();
        debug!(archive = %identity, "Scanning archive");

        while let Some(entry) = source.next_entry()? {
            self.scan_entry(&identity, &entry, passthrough)?;
        }
        self.stats.archives += 1;
        Ok(())
    }

    /// Let every transformer with content write its merged entry
    pub fn finalize(&mut self, output: &mut dyn EntrySink) -> Result<usize> {
        let mut counting = CountingSink {
            inner: output,
            written: 0,
        };

        for transformer in self.registry.iter_mut() {
            if transformer.has_content() {
                debug!(kind = transformer.name(), "Finalizing transformer");
                transformer.finalize(&mut counting)?;
            } else {
                transformer.reset();
            }
        }

        self.stats.synthesized += counting.written;
        info!(
            archives = self.stats.archives,
            claimed = self.stats.claimed,
            passed_through = self.stats.passed_through,
            synthesized = self.stats.synthesized,
            "Merge finished"
        );
        Ok(counting.written)
    }

    /// Scan all archives into one sink, then finalize into it
    pub fn run<A: ArchiveSource>(
        &mut self,
        sources: &mut [A],
        output: &mut dyn EntrySink,
    ) -> Result<MergeStats> {
        for source in sources.iter_mut() {
            self.scan(source, output)?;
        }
        self.finalize(output)?;
        Ok(self.stats)
    }
}

struct CountingSink<'a> {
    inner: &'a mut dyn EntrySink,
    written: usize,
}

impl EntrySink for CountingSink<'_> {
    fn write_entry(&mut self, path: &str, contents: &[u8]) -> Result<()> {
        self.inner.write_entry(path, contents)?;
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UberpackError;
    use crate::transformer::{
        AppendingTransformer, ComponentsXmlTransformer, ExtensionModuleTransformer,
        ManifestTransformer,
    };

    const EXTENSION_MODULE: &str = "META-INF/services/org.codehaus.groovy.runtime.ExtensionModule";

    fn registry() -> TransformerRegistry {
        let mut registry = TransformerRegistry::new();
        registry
            .register(Box::new(ManifestTransformer::default()))
            .unwrap();
        registry
            .register(Box::new(AppendingTransformer::new("notes.txt")))
            .unwrap();
        registry
            .register(Box::new(ComponentsXmlTransformer::new()))
            .unwrap();
        registry
    }

    #[test]
    fn test_claimed_entries_are_not_passed_through() {
        let mut driver = MergeDriver::new(registry(), vec![]);
        let mut archives = vec![
            MemoryArchive::new("a.jar")
                .with_entry("notes.txt", "A")
                .with_entry("a/A.class", "classA"),
            MemoryArchive::new("b.jar")
                .with_entry("notes.txt", "B")
                .with_entry("b/B.class", "classB"),
        ];

        let mut sink = MemorySink::default();
        let stats = driver.run(&mut archives, &mut sink).unwrap();

        assert_eq!(sink.paths(), vec!["a/A.class", "b/B.class", "notes.txt"]);
        assert_eq!(sink.get("notes.txt"), Some(&b"A\nB\n"[..]));
        assert_eq!(
            stats,
            MergeStats {
                archives: 2,
                claimed: 2,
                passed_through: 2,
                synthesized: 1,
            }
        );
    }

    #[test]
    fn test_finalize_skips_transformers_without_content() {
        let mut driver = MergeDriver::new(registry(), vec![]);
        let mut sink = MemorySink::default();
        assert_eq!(driver.finalize(&mut sink).unwrap(), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_partial_state_is_reset_between_runs() {
        let mut registry = TransformerRegistry::new();
        registry
            .register(Box::new(ExtensionModuleTransformer::default()))
            .unwrap();
        let mut driver = MergeDriver::new(registry, vec![]);

        let mut first = vec![
            MemoryArchive::new("a.jar").with_entry(EXTENSION_MODULE, "extensionClasses=a.B\n"),
        ];
        let mut sink = MemorySink::default();
        driver.run(&mut first, &mut sink).unwrap();
        assert!(sink.is_empty());

        let mut second = vec![
            MemoryArchive::new("b.jar")
                .with_entry(EXTENSION_MODULE, "staticExtensionClasses=s.S\n"),
        ];
        let mut sink = MemorySink::default();
        driver.run(&mut second, &mut sink).unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_content_error_aborts_run() {
        let mut driver = MergeDriver::new(registry(), vec![]);
        let mut archives = vec![
            MemoryArchive::new("broken.jar")
                .with_entry("META-INF/plexus/components.xml", "<component-set>"),
        ];
        let err = driver
            .run(&mut archives, &mut MemorySink::default())
            .unwrap_err();
        assert!(matches!(err, UberpackError::ContentParseFailed { .. }));
    }

    #[test]
    fn test_scan_entry_reports_claim() {
        let mut driver = MergeDriver::new(registry(), vec![]);
        let mut sink = MemorySink::default();
        let claimed = driver
            .scan_entry("a.jar", &ArchiveEntry::new("notes.txt", "x"), &mut sink)
            .unwrap();
        assert!(claimed);
        let claimed = driver
            .scan_entry("a.jar", &ArchiveEntry::new("other.txt", "x"), &mut sink)
            .unwrap();
        assert!(!claimed);
        assert_eq!(sink.paths(), vec!["other.txt"]);
    }
}
