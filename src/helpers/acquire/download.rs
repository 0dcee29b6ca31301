//! Download helpers for acquiring files
//!
//! Downloads are cached by file name: if the destination already exists it
//! is reused and nothing is fetched. The body is streamed into a `.part`
//! file that is renamed into place only once the transfer completed, so an
//! interrupted download never looks like a cached archive.

use crate::core::error::{BootstrapError, Result, io_err};
use crate::core::output;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::super::internal::progress::{self, ProgressGuard, upgrade_to_bytes};

/// Connect timeout; the transfer itself is not time limited.
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Download `fname` from `url` into `dir`, skipping if already present.
///
/// Returns the path of the (possibly cached) file.
pub fn download_file(fname: &str, url: &str, dir: &Path) -> Result<PathBuf> {
    let dest = dir.join(fname);
    if dest.is_file() {
        output::skip(&format!("{} already downloaded, skipping", fname));
        return Ok(dest);
    }

    std::fs::create_dir_all(dir)
        .map_err(io_err(format!("cannot create directory {}", dir.display())))?;

    let part = dir.join(format!("{}.part", fname));
    let total_bytes = match download_with_progress(url, &part, fname) {
        Ok(n) => n,
        Err(e) => {
            let _ = std::fs::remove_file(&part);
            return Err(e);
        }
    };

    std::fs::rename(&part, &dest).map_err(io_err(format!(
        "cannot move {} into place",
        part.display()
    )))?;
    output::detail(&format!("downloaded {} ({} bytes)", fname, total_bytes));

    Ok(dest)
}

// ============================================================================
// Internal helpers
// ============================================================================

fn download_with_progress(url: &str, dest: &Path, filename: &str) -> Result<u64> {
    let pb = progress::create_spinner(&format!("downloading {}", filename));
    let _guard = ProgressGuard::new(&pb);

    let agent = ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build();

    let response = agent.get(url).call().map_err(|e| BootstrapError::Download {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    if let Some(len) = response
        .header("content-length")
        .and_then(|s| s.parse().ok())
    {
        upgrade_to_bytes(&pb, len);
    }

    let mut file = std::fs::File::create(dest)
        .map_err(io_err(format!("cannot create file {}", dest.display())))?;

    let mut reader = response.into_reader();
    let mut buffer = [0u8; 8192];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| BootstrapError::Download {
            url: url.to_string(),
            message: format!("read error: {}", e),
        })?;

        if bytes_read == 0 {
            break;
        }

        file.write_all(&buffer[..bytes_read])
            .map_err(io_err(format!("write error for {}", dest.display())))?;

        total_bytes += bytes_read as u64;
        pb.set_position(total_bytes);
    }

    file.sync_all()
        .map_err(io_err(format!("cannot flush {}", dest.display())))?;

    Ok(total_bytes)
}
