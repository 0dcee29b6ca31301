//! Third-party dependencies built from source under `<root>/contrib`
//!
//! Every dependency module exposes the same lifecycle as free functions:
//! `download → prepare → configure → build → install`. Each takes the
//! source root and the shared [`Config`](crate::core::Config).

pub mod boost;

use std::path::{Path, PathBuf};

/// Fixed directory layout below the source root
#[derive(Debug, Clone)]
pub struct ContribLayout {
    root: PathBuf,
}

impl ContribLayout {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/contrib`, where archives are extracted
    pub fn contrib_dir(&self) -> PathBuf {
        self.root.join("contrib")
    }

    /// `<root>/contrib/files`, the download cache
    pub fn files_dir(&self) -> PathBuf {
        self.contrib_dir().join("files")
    }

    /// `<root>/contrib/build_scripts/posix`, packaged build scripts
    pub fn posix_scripts_dir(&self) -> PathBuf {
        self.contrib_dir().join("build_scripts").join("posix")
    }
}
