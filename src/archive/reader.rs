//! Zip input archives

use std::fs::File;
use std::io::Read;
use std::path::Path;

use zip::ZipArchive;

use crate::driver::{ArchiveEntry, ArchiveSource};
use crate::error::{Result, archive_open_failed, archive_read_failed, file_not_found};

/// Reads file entries of a zip (jar) archive in central directory order
#[derive(Debug)]
pub struct ZipArchiveSource {
    identity: String,
    archive: ZipArchive<File>,
    next: usize,
}

impl ZipArchiveSource {
    pub fn open(path: &Path) -> Result<Self> {
        let identity = path.display().to_string();
        if !path.is_file() {
            return Err(file_not_found(identity));
        }

        let file = File::open(path).map_err(|e| archive_open_failed(&identity, e.to_string()))?;
        let archive =
            ZipArchive::new(file).map_err(|e| archive_open_failed(&identity, e.to_string()))?;

        Ok(Self {
            identity,
            archive,
            next: 0,
        })
    }

    /// Total number of entries, directories included
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }
}

impl ArchiveSource for ZipArchiveSource {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn next_entry(&mut self) -> Result<Option<ArchiveEntry>> {
        while self.next < self.archive.len() {
            let index = self.next;
            self.next += 1;

            let mut file = self
                .archive
                .by_index(index)
                .map_err(|e| archive_read_failed(&self.identity, format!("#{index}"), e.to_string()))?;
            if file.is_dir() {
                continue;
            }

            let path = file.name().to_string();
            let mut contents = Vec::with_capacity(usize::try_from(file.size()).unwrap_or(0));
            file.read_to_end(&mut contents)
                .map_err(|e| archive_read_failed(&self.identity, &path, e.to_string()))?;

            return Ok(Some(ArchiveEntry { path, contents }));
        }
        Ok(None)
    }
}
