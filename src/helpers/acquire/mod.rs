//! ACQUIRE phase helpers - getting sources
//!
//! - **download_file**: fetch a named file from a URL into a cache directory

pub mod download;

pub use download::download_file;
