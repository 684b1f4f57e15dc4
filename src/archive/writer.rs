//! Zip output archive

use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::driver::EntrySink;
use crate::error::{Result, archive_write_failed};

/// Writes the uber-archive
///
/// Parent directory entries are created on demand. The first entry written
/// at a path wins; later writes to the same path are skipped.
pub struct ZipEntryWriter {
    path: PathBuf,
    zip: ZipWriter<File>,
    options: SimpleFileOptions,
    written: HashSet<String>,
    directories: HashSet<String>,
}

impl std::fmt::Debug for ZipEntryWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipEntryWriter")
            .field("path", &self.path)
            .field("entries", &self.written.len())
            .finish_non_exhaustive()
    }
}

impl ZipEntryWriter {
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| archive_write_failed(path.display().to_string(), e.to_string()))?;
        }
        let file = File::create(path)
            .map_err(|e| archive_write_failed(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            path: path.to_path_buf(),
            zip: ZipWriter::new(file),
            options: SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated),
            written: HashSet::new(),
            directories: HashSet::new(),
        })
    }

    /// Whether an entry was already written at `path`
    pub fn contains(&self, path: &str) -> bool {
        self.written.contains(path)
    }

    pub fn entry_count(&self) -> usize {
        self.written.len()
    }

    fn fail(&self, reason: impl std::fmt::Display) -> crate::error::UberpackError {
        archive_write_failed(self.path.display().to_string(), reason.to_string())
    }

    fn ensure_parents(&mut self, entry: &str) -> Result<()> {
        let mut end = 0;
        while let Some(idx) = entry[end..].find('/') {
            end += idx + 1;
            let dir = &entry[..end];
            if self.directories.insert(dir.to_string()) {
                self.zip
                    .add_directory(dir, self.options)
                    .map_err(|e| self.fail(e))?;
            }
        }
        Ok(())
    }

    /// Write the central directory and close the file
    pub fn finish(self) -> Result<()> {
        let path = self.path.display().to_string();
        let count = self.written.len();
        self.zip
            .finish()
            .map_err(|e| archive_write_failed(&path, e.to_string()))?;
        debug!(path = %path, entries = count, "Wrote archive");
        Ok(())
    }
}

impl EntrySink for ZipEntryWriter {
    fn write_entry(&mut self, path: &str, contents: &[u8]) -> Result<()> {
        if self.written.contains(path) {
            debug!(path, "Skipping duplicate entry");
            return Ok(());
        }

        self.ensure_parents(path)?;
        self.zip
            .start_file(path, self.options)
            .map_err(|e| self.fail(e))?;
        self.zip.write_all(contents).map_err(|e| self.fail(e))?;
        self.written.insert(path.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    #[test]
    fn test_writes_entries_with_parent_directories() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("target/uber.jar");

        let mut writer = ZipEntryWriter::create(&out).unwrap();
        writer.write_entry("a/b/C.class", b"one").unwrap();
        writer.write_entry("a/D.class", b"two").unwrap();
        writer.write_entry("a/b/C.class", b"ignored").unwrap();
        assert!(writer.contains("a/D.class"));
        assert_eq!(writer.entry_count(), 2);
        writer.finish().unwrap();

        let mut archive = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        let names: Vec<String> = archive.file_names().map(str::to_string).collect();
        assert_eq!(names.len(), 4);
        assert!(names.contains(&"a/".to_string()));
        assert!(names.contains(&"a/b/".to_string()));

        let mut contents = String::new();
        archive
            .by_name("a/b/C.class")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "one");
    }
}
