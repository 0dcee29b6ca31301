//! Common test utilities for bootstrap integration tests.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;
