//! BUILD phase helpers - transforming sources
//!
//! - **extract_file**: extract archives (tar.gz, tar.bz2, tar, zip)

pub mod extract;

pub use extract::{ArchiveFormat, extract_file};
