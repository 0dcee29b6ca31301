//! Helpers used by the contrib steps
//!
//! Organized by lifecycle phase:
//!
//! - **acquire**: fetch source archives
//! - **build**: unpack archives
//! - **util**: shell execution
//! - **internal**: filesystem and progress plumbing

pub mod acquire;
pub mod build;
pub mod internal;
pub mod util;
