//! In-memory archive source and entry sink

use std::collections::VecDeque;

use super::{ArchiveEntry, ArchiveSource, EntrySink};
use crate::error::Result;

/// Archive held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    identity: String,
    entries: VecDeque<ArchiveEntry>,
}

impl MemoryArchive {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            entries: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn with_entry(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.entries.push_back(ArchiveEntry::new(path, contents));
        self
    }
}

impl ArchiveSource for MemoryArchive {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn next_entry(&mut self) -> Result<Option<ArchiveEntry>> {
        Ok(self.entries.pop_front())
    }
}

/// Collects written entries in order
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Vec<ArchiveEntry>,
}

impl MemorySink {
    pub fn paths(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.path.as_str()).collect()
    }

    /// Contents of the first entry written at `path`
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.contents.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EntrySink for MemorySink {
    fn write_entry(&mut self, path: &str, contents: &[u8]) -> Result<()> {
        self.entries.push(ArchiveEntry::new(path, contents));
        Ok(())
    }
}
