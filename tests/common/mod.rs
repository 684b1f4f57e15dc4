//! Common test utilities for uberpack integration tests

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// A scratch directory holding input archives and uberpack.yaml
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    pub path: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a zip archive with the given entries, in order
    pub fn write_jar(&self, name: &str, entries: &[(&str, &str)]) -> PathBuf {
        let path = self.path.join(name);
        write_jar(&path, entries);
        path
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn write_config(&self, yaml: &str) -> PathBuf {
        self.write_file("uberpack.yaml", yaml)
    }

    pub fn file_exists(&self, name: &str) -> bool {
        self.path.join(name).exists()
    }
}

pub fn write_jar(path: &Path, entries: &[(&str, &str)]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    let file = File::create(path).expect("Failed to create archive");
    let mut zip = zip::ZipWriter::new(file);
    for (name, contents) in entries {
        zip.start_file(*name, SimpleFileOptions::default())
            .expect("Failed to start entry");
        zip.write_all(contents.as_bytes())
            .expect("Failed to write entry");
    }
    zip.finish().expect("Failed to finish archive");
}

/// Every file entry of an archive, directories skipped
#[allow(dead_code)]
pub fn read_jar(path: &Path) -> BTreeMap<String, String> {
    let file = File::open(path).expect("Failed to open archive");
    let mut zip = zip::ZipArchive::new(file).expect("Failed to read archive");
    let mut entries = BTreeMap::new();
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).expect("Failed to read entry");
        if entry.is_dir() {
            continue;
        }
        let mut contents = String::new();
        entry
            .read_to_string(&mut contents)
            .expect("Failed to read entry contents");
        entries.insert(entry.name().to_string(), contents);
    }
    entries
}
