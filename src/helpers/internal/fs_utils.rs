//! Common filesystem utilities
//!
//! Shared filesystem operations used by the acquire and build helpers and by
//! the contrib steps.

use crate::core::error::{Result, io_err};
use std::path::Path;

/// Ensure a file's parent directory exists.
///
/// Creates the parent directory (and all ancestors) if it doesn't exist.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)
            .map_err(io_err(format!("cannot create directory {}", parent.display())))?;
    }
    Ok(())
}

/// Recursively delete a directory if it exists.
///
/// Returns whether anything was removed. A missing directory is not an error.
pub fn check_delete_directory(dir: &Path) -> Result<bool> {
    match std::fs::symlink_metadata(dir) {
        Ok(md) if md.is_dir() => {
            std::fs::remove_dir_all(dir)
                .map_err(io_err(format!("cannot remove directory {}", dir.display())))?;
            Ok(true)
        }
        // Not a real directory (file or symlink): remove the entry itself.
        Ok(_) => {
            std::fs::remove_file(dir)
                .map_err(io_err(format!("cannot remove {}", dir.display())))?;
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_err(format!("cannot stat {}", dir.display()))(e)),
    }
}

/// Copy a file, creating parent directories as needed.
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64> {
    ensure_parent_dir(dest)?;
    std::fs::copy(src, dest).map_err(io_err(format!(
        "copy failed: {} -> {}",
        src.display(),
        dest.display()
    )))
}

/// Rename a file or directory, creating parent directories as needed.
pub fn move_path(src: &Path, dest: &Path) -> Result<()> {
    ensure_parent_dir(dest)?;
    std::fs::rename(src, dest).map_err(io_err(format!(
        "move failed: {} -> {}",
        src.display(),
        dest.display()
    )))
}
