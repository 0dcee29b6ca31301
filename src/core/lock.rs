//! Bootstrap lock management
//!
//! Provides exclusive locking so two bootstrap runs never operate on the
//! same contrib tree at once. The lock file itself is permanent; only the
//! advisory lock on it comes and goes.

use super::error::{BootstrapError, Result, io_err};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

const LOCK_FILE_NAME: &str = ".bootstrap.lock";

/// Acquire an exclusive lock on a contrib directory.
/// Returns a guard that releases the lock when dropped.
pub fn acquire_contrib_lock(contrib_dir: &Path) -> Result<ContribLock> {
    std::fs::create_dir_all(contrib_dir)
        .map_err(io_err(format!("cannot create directory {}", contrib_dir.display())))?;

    let lock_path = contrib_dir.join(LOCK_FILE_NAME);
    // Every run must lock the same inode: never truncate or remove the file.
    let lock_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(io_err(format!("cannot open lock file {}", lock_path.display())))?;

    if lock_file.try_lock_exclusive().is_err() {
        return Err(BootstrapError::Locked(lock_path));
    }

    Ok(ContribLock {
        _file: lock_file,
        path: lock_path,
    })
}

/// RAII guard for the contrib lock - the lock is released when the file closes
#[derive(Debug)]
pub struct ContribLock {
    _file: File,
    path: PathBuf,
}

impl ContribLock {
    pub fn path(&self) -> &Path {
        &self.path
    }
}
