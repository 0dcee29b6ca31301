//! Internal utility modules shared by the phase helpers

pub mod fs_utils;
pub mod progress;
