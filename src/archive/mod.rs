//! Zip-backed archive plumbing for the binary
//!
//! - [`reader`]: [`ZipArchiveSource`] feeds file entries to the merge driver
//! - [`writer`]: [`ZipEntryWriter`] writes the uber-archive
//! - [`passthrough`]: [`PassthroughWriter`] handles entries no transformer claims

pub mod passthrough;
pub mod reader;
pub mod writer;

pub use passthrough::PassthroughWriter;
pub use reader::ZipArchiveSource;
pub use writer::ZipEntryWriter;
