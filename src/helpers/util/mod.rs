//! Cross-phase utility helpers

pub mod shell;

pub use shell::shell_in;
