//! Bootstrap error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running a bootstrap step.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("platform not supported: {0}")]
    UnsupportedPlatform(String),

    #[error("missing config option: [{section}] {key}")]
    MissingOption { section: String, key: String },

    #[error("config option [{section}] {key} is not a positive integer: {value:?}")]
    InvalidInteger {
        section: String,
        key: String,
        value: String,
    },

    #[error("cannot parse config {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("download failed: {url}: {message}")]
    Download { url: String, message: String },

    #[error("archive error: {0}")]
    Archive(String),

    #[error("archive did not produce expected directory: {}", .0.display())]
    MissingExtractRoot(PathBuf),

    #[error("command failed to start: {cmd}")]
    CommandSpawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command failed with exit code: {code:?}\n  command: {cmd}\n  in: {}", .dir.display())]
    CommandFailed {
        cmd: String,
        dir: PathBuf,
        code: Option<i32>,
    },

    #[error("bootstrap is already running on this tree (lock held on '{}')", .0.display())]
    Locked(PathBuf),
}

pub type Result<T> = std::result::Result<T, BootstrapError>;

/// Build a `map_err` adapter that wraps an `io::Error` with context.
///
/// ```ignore
/// std::fs::copy(&src, &dest).map_err(io_err(format!("copy failed: {}", src.display())))?;
/// ```
pub fn io_err(context: impl Into<String>) -> impl FnOnce(std::io::Error) -> BootstrapError {
    let context = context.into();
    move |source| BootstrapError::Io { context, source }
}
