//! bempp-bootstrap - build third-party dependencies from source
//!
//! Usage:
//!   bempp-bootstrap                         Run every phase
//!   bempp-bootstrap download prepare        Run selected phases
//!   bempp-bootstrap --prefix /opt/bempp -j8 Override config values

use anyhow::{Context, Result};
use bempp_bootstrap::{Config, Phase, apply_defaults, output, run_phases};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bempp-bootstrap")]
#[command(about = "Download, build and install BEM++ dependencies")]
#[command(version)]
struct Cli {
    /// Phases to run (download, prepare, configure, build, install); all if omitted
    phases: Vec<Phase>,

    /// Source root containing contrib/
    #[arg(short, long, default_value = ".", env = "BEMPP_ROOT")]
    root: PathBuf,

    /// Config file (defaults to <root>/bootstrap.toml)
    #[arg(short, long, env = "BEMPP_BOOTSTRAP_CONFIG")]
    config: Option<PathBuf>,

    /// Installation prefix, stored as [Main] prefix
    #[arg(short, long)]
    prefix: Option<PathBuf>,

    /// Parallel build jobs, stored as [Main] build_jobs
    #[arg(short, long)]
    jobs: Option<u32>,
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        output::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = std::path::absolute(&cli.root)
        .with_context(|| format!("Invalid root: {}", cli.root.display()))?;
    let config_path = cli.config.unwrap_or_else(|| root.join("bootstrap.toml"));

    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        Config::new()
    };

    if let Some(prefix) = &cli.prefix {
        let prefix = std::path::absolute(prefix)
            .with_context(|| format!("Invalid prefix: {}", prefix.display()))?;
        config.set("Main", "prefix", prefix.to_string_lossy());
    }
    if let Some(jobs) = cli.jobs {
        anyhow::ensure!(jobs > 0, "--jobs must be at least 1");
        config.set("Main", "build_jobs", jobs.to_string());
    }
    let defaulted = apply_defaults(&mut config);

    let phases = if cli.phases.is_empty() {
        Phase::ALL.to_vec()
    } else {
        cli.phases
    };

    let result = run_phases(&root, &mut config, &phases);

    // Persist whatever the completed phases published, even on failure.
    // Host defaults are recomputed on every run and stay out of the file.
    for (section, key) in defaulted {
        config.remove_option(section, key);
    }
    let saved = config
        .save(&config_path)
        .with_context(|| format!("Failed to save config: {}", config_path.display()));

    if let Err(e) = result {
        if let Err(save_err) = &saved {
            output::error(&format!("{:#}", save_err));
        }
        return Err(e.into());
    }
    saved?;
    output::info(&format!("config saved to {}", config_path.display()));
    output::success("boost bootstrap complete");
    Ok(())
}
