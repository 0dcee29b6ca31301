//! Core infrastructure shared by every bootstrap step
//!
//! Configuration store, error types, host platform detection, terminal
//! output and the contrib tree lock.

pub mod config;
pub mod error;
pub mod lock;
pub mod output;
pub mod platform;

pub use config::Config;
pub use error::{BootstrapError, Result};
pub use platform::Platform;
