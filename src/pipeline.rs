//! Bootstrap driver
//!
//! Runs the Boost lifecycle phases in order while holding the contrib lock.
//! Phases always run in lifecycle order regardless of how they were
//! requested, and the first failure aborts the run.

use crate::contrib::{ContribLayout, boost};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::lock::acquire_contrib_lock;
use crate::core::output;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// One step of the dependency lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Download,
    Prepare,
    Configure,
    Build,
    Install,
}

impl Phase {
    /// All phases in lifecycle order
    pub const ALL: [Phase; 5] = [
        Phase::Download,
        Phase::Prepare,
        Phase::Configure,
        Phase::Build,
        Phase::Install,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Download => "download",
            Phase::Prepare => "prepare",
            Phase::Configure => "configure",
            Phase::Build => "build",
            Phase::Install => "install",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown phase: {}", s))
    }
}

/// Fill in driver-level defaults without touching values already set.
///
/// `[Main] build_jobs` defaults to the host CPU count. Returns the
/// `(section, key)` pairs that were filled, so a driver can keep host
/// defaults out of the file it saves.
pub fn apply_defaults(config: &mut Config) -> Vec<(&'static str, &'static str)> {
    let mut filled = Vec::new();
    if config.set_default_option("Main", "build_jobs", num_cpus::get().to_string(), false) {
        filled.push(("Main", "build_jobs"));
    }
    filled
}

/// Run `phases` for Boost under `root`, in lifecycle order.
///
/// An empty slice runs nothing. Duplicates run once.
pub fn run_phases(root: &Path, config: &mut Config, phases: &[Phase]) -> Result<()> {
    let mut ordered = phases.to_vec();
    ordered.sort();
    ordered.dedup();

    let layout = ContribLayout::new(root);
    let _lock = acquire_contrib_lock(&layout.contrib_dir())?;

    let total = ordered.len();
    for (i, phase) in ordered.into_iter().enumerate() {
        output::action_numbered(i + 1, total, &format!("boost: {}", phase));
        run_phase(root, config, phase)?;
    }

    Ok(())
}

fn run_phase(root: &Path, config: &mut Config, phase: Phase) -> Result<()> {
    match phase {
        Phase::Download => boost::download(root, config).map(|_| ()),
        Phase::Prepare => boost::prepare(root, config),
        Phase::Configure => boost::configure(root, config),
        Phase::Build => boost::build(root, config),
        Phase::Install => boost::install(root, config),
    }
}
