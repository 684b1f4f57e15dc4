//! Progress bar display for archive scanning

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for a merge run
pub struct ProgressDisplay {
    /// One tick per scanned archive
    archive_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total archive count
    pub fn new(total_archives: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let archive_pb = ProgressBar::new(total_archives);
        archive_pb.set_style(style);

        Self { archive_pb }
    }

    /// Show the archive currently being scanned
    pub fn start_archive(&self, archive: &str) {
        // Keep the tail of long paths, it carries the file name
        let display = match archive.char_indices().rev().nth(46) {
            Some((idx, _)) => format!("...{}", &archive[idx..]),
            None => archive.to_string(),
        };
        self.archive_pb.set_message(display);
    }

    pub fn inc_archive(&self) {
        self.archive_pb.inc(1);
    }

    pub fn finish(&self) {
        self.archive_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.archive_pb.abandon();
    }
}
