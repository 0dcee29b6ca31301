//! Dependency bootstrap steps for BEM++
//!
//! Builds third-party dependencies from source under `<root>/contrib`. Each
//! dependency follows the same lifecycle, run in order by the driver:
//!
//! ```text
//! download → prepare → configure → build → install
//! ```
//!
//! Steps share a [`Config`] store: they read `[Main] prefix` and
//! `[Main] build_jobs` and publish derived paths (such as
//! `[Boost] include_dir`) for later consumers.
//!
//! # Example
//!
//! ```no_run
//! use bempp_bootstrap::{Config, contrib::boost};
//! use std::path::Path;
//!
//! # fn main() -> bempp_bootstrap::Result<()> {
//! let root = Path::new("/src/bempp");
//! let mut config = Config::new();
//! config.set("Main", "prefix", "/opt/bempp");
//! config.set("Main", "build_jobs", "4");
//!
//! boost::download(root, &config)?;
//! boost::prepare(root, &mut config)?;
//! boost::configure(root, &config)?;
//! boost::build(root, &config)?;
//! boost::install(root, &config)?;
//! # Ok(())
//! # }
//! ```

pub mod contrib;
pub mod core;
pub mod helpers;
pub mod pipeline;

pub use crate::core::config::Config;
pub use crate::core::error::{BootstrapError, Result};
pub use crate::core::output;
pub use crate::core::platform::Platform;
pub use pipeline::{Phase, apply_defaults, run_phases};
