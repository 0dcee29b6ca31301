//! Archive extraction
//!
//! Native extraction (no external `tar`/`unzip` needed). The format is
//! detected from the file name. Entries that would land outside the
//! destination (absolute paths, `..` components, links pointing out, writes
//! through existing symlinks) are rejected.

use crate::core::error::{BootstrapError, Result, io_err};
use crate::core::output;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Component, Path, PathBuf};

use super::super::internal::progress::{self, ProgressGuard};

/// Archive formats understood by [`extract_file`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    TarGz,
    TarBz2,
    Tar,
    Zip,
}

impl ArchiveFormat {
    /// Detect archive format from filename extension
    pub fn detect(archive: &Path) -> Option<Self> {
        let name = archive.file_name()?.to_string_lossy().to_lowercase();
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Self::TarGz)
        } else if name.ends_with(".tar.bz2") || name.ends_with(".tbz2") {
            Some(Self::TarBz2)
        } else if name.ends_with(".tar") {
            Some(Self::Tar)
        } else if name.ends_with(".zip") {
            Some(Self::Zip)
        } else {
            None
        }
    }
}

/// Extract an archive into `dest`, creating `dest` if needed.
///
/// Contents land directly under `dest`; the archive's own top-level
/// directory is preserved.
pub fn extract_file(archive: &Path, dest: &Path) -> Result<()> {
    let format = ArchiveFormat::detect(archive).ok_or_else(|| {
        BootstrapError::Archive(format!("cannot detect archive format: {}", archive.display()))
    })?;

    std::fs::create_dir_all(dest)
        .map_err(io_err(format!("cannot create directory {}", dest.display())))?;

    let filename = archive
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "archive".to_string());

    {
        let pb = progress::create_spinner(&format!("extracting {}", filename));
        let _guard = ProgressGuard::new(&pb);

        match format {
            ArchiveFormat::TarGz => {
                extract_tar(flate2::read::GzDecoder::new(open(archive)?), dest)?
            }
            ArchiveFormat::TarBz2 => {
                extract_tar(bzip2::read::BzDecoder::new(open(archive)?), dest)?
            }
            ArchiveFormat::Tar => extract_tar(open(archive)?, dest)?,
            ArchiveFormat::Zip => extract_zip(archive, dest)?,
        }
    }

    output::detail(&format!("extracted {} to {}", filename, dest.display()));
    Ok(())
}

fn open(archive: &Path) -> Result<BufReader<File>> {
    let file =
        File::open(archive).map_err(io_err(format!("cannot open {}", archive.display())))?;
    Ok(BufReader::new(file))
}

fn archive_err(message: String) -> BootstrapError {
    BootstrapError::Archive(message)
}

// ============================================================================
// Path safety
// ============================================================================

/// Lexically normalize a path (no filesystem access), used to validate link
/// targets without following symlinks.
fn normalize_lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut has_root = false;

    for c in path.components() {
        match c {
            Component::Prefix(p) => {
                out.clear();
                out.push(p.as_os_str());
                has_root = true;
            }
            Component::RootDir => {
                out.push(Component::RootDir.as_os_str());
                has_root = true;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = out
                    .components()
                    .next_back()
                    .is_some_and(|last| matches!(last, Component::Normal(_)));
                if popped {
                    out.pop();
                } else if !has_root {
                    out.push("..");
                }
            }
            Component::Normal(seg) => out.push(seg),
        }
    }

    out
}

fn is_unsafe_entry_path(path: &Path) -> bool {
    path.is_absolute()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_) | Component::RootDir))
}

/// Reject writes through an existing symlink anywhere below `dest`.
fn ensure_no_symlink_components(dest: &Path, full_path: &Path) -> Result<()> {
    let rel = full_path.strip_prefix(dest).map_err(|_| {
        archive_err(format!(
            "archive contains path outside destination: {}",
            full_path.display()
        ))
    })?;

    let mut cur = dest.to_path_buf();
    for comp in rel.components() {
        cur.push(comp);
        if let Ok(md) = std::fs::symlink_metadata(&cur)
            && md.file_type().is_symlink()
        {
            return Err(archive_err(format!(
                "extraction blocked: symlink in path component: {}",
                cur.display()
            )));
        }
    }

    Ok(())
}

fn ensure_link_target_within_dest(dest: &Path, link_parent: &Path, link_name: &Path) -> Result<()> {
    if link_name.is_absolute()
        || link_name
            .components()
            .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
    {
        return Err(archive_err(format!(
            "archive contains unsafe link target (absolute): {}",
            link_name.display()
        )));
    }

    let candidate = normalize_lexical(&link_parent.join(link_name));
    if candidate.strip_prefix(normalize_lexical(dest)).is_err() {
        return Err(archive_err(format!(
            "archive contains unsafe link target (escapes dest): {} -> {}",
            link_parent.display(),
            link_name.display()
        )));
    }

    Ok(())
}

// ============================================================================
// Tar
// ============================================================================

fn extract_tar<R: Read>(reader: R, dest: &Path) -> Result<()> {
    let mut archive = tar::Archive::new(reader);
    archive.set_preserve_permissions(true);

    let entries = archive
        .entries()
        .map_err(|e| archive_err(format!("tar read error: {}", e)))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| archive_err(format!("tar entry error: {}", e)))?;

        let path = entry
            .path()
            .map_err(|e| archive_err(format!("tar path error: {}", e)))?
            .into_owned();

        if is_unsafe_entry_path(&path) {
            return Err(archive_err(format!("tar contains unsafe path: {}", path.display())));
        }

        // Some archives contain a "." entry; treat it as a no-op.
        if path.as_os_str().is_empty() || path == Path::new(".") {
            continue;
        }

        let full_path = dest.join(&path);
        ensure_no_symlink_components(dest, &full_path)?;

        let entry_type = entry.header().entry_type();
        let mut hardlink_target = None;
        if entry_type == tar::EntryType::Symlink || entry_type == tar::EntryType::Link {
            let link_name = entry
                .link_name()
                .map_err(|e| archive_err(format!("tar link_name error: {}", e)))?
                .ok_or_else(|| {
                    archive_err(format!("tar contains link without target: {}", path.display()))
                })?
                .into_owned();
            let link_parent = full_path.parent().unwrap_or(dest);
            ensure_link_target_within_dest(dest, link_parent, &link_name)?;
            if entry_type == tar::EntryType::Link {
                // Hard link targets are relative to the archive root.
                if is_unsafe_entry_path(&link_name) {
                    return Err(archive_err(format!(
                        "archive contains unsafe link target: {}",
                        link_name.display()
                    )));
                }
                hardlink_target = Some(dest.join(link_name));
            }
        }

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(io_err(format!("cannot create directory {}", parent.display())))?;
        }

        if let Some(target) = hardlink_target {
            std::fs::hard_link(&target, &full_path).map_err(io_err(format!(
                "cannot link {} -> {}",
                full_path.display(),
                target.display()
            )))?;
            continue;
        }

        entry
            .unpack(&full_path)
            .map_err(|e| archive_err(format!("unpack error for {}: {}", path.display(), e)))?;
    }

    Ok(())
}

// ============================================================================
// Zip
// ============================================================================

fn extract_zip(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive_path)
        .map_err(io_err(format!("cannot open {}", archive_path.display())))?;

    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| archive_err(format!("zip read error: {}", e)))?;

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| archive_err(format!("zip entry error: {}", e)))?;

        let Some(rel) = file.enclosed_name() else {
            return Err(archive_err(format!("zip contains unsafe path: {}", file.name())));
        };
        let outpath = dest.join(rel);
        ensure_no_symlink_components(dest, &outpath)?;

        if file.is_dir() {
            std::fs::create_dir_all(&outpath)
                .map_err(io_err(format!("cannot create directory {}", outpath.display())))?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            std::fs::create_dir_all(parent)
                .map_err(io_err(format!("cannot create directory {}", parent.display())))?;
        }

        let mut outfile = File::create(&outpath)
            .map_err(io_err(format!("cannot create {}", outpath.display())))?;
        std::io::copy(&mut file, &mut outfile)
            .map_err(io_err(format!("write error for {}", outpath.display())))?;

        #[cfg(unix)]
        if let Some(mode) = file.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))
                .map_err(io_err(format!("chmod failed for {}", outpath.display())))?;
        }
    }

    Ok(())
}
