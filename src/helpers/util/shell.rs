//! Shell execution helpers
//!
//! Commands always run with an explicit working directory. The bootstrap
//! process never changes its own current directory, so a failing command
//! cannot leave it somewhere unexpected.

use crate::core::error::{BootstrapError, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a shell command in a specific directory.
///
/// Child stdout and stderr are inherited so build output streams to the
/// terminal; stdin is closed. `env` is added to the inherited environment.
/// Fails if the shell cannot start or the command exits non-zero.
///
/// # Example
/// ```ignore
/// shell_in(&build_dir, "make -j4", &[("PREFIX", "/opt/bempp")])?;
/// ```
pub fn shell_in(dir: &Path, cmd: &str, env: &[(&str, &str)]) -> Result<()> {
    let status = Command::new("sh")
        .args(["-c", cmd])
        .current_dir(dir)
        .envs(env.iter().copied())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .stdin(Stdio::null())
        .status()
        .map_err(|source| BootstrapError::CommandSpawn {
            cmd: cmd.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(BootstrapError::CommandFailed {
            cmd: cmd.to_string(),
            dir: dir.to_path_buf(),
            code: status.code(),
        });
    }

    Ok(())
}
