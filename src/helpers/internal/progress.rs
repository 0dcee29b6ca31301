//! Unified progress bar helpers
//!
//! Provides consistent progress bar styling across the bootstrap helpers.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Standard spinner characters
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Standard tick interval for spinners
const TICK_INTERVAL_MS: u64 = 80;

const SPINNER_TEMPLATE: &str = "     {spinner:.cyan} {msg}";
const BYTES_TEMPLATE: &str =
    "     {spinner:.cyan} [{bar:30.cyan/dim}] {bytes}/{total_bytes} ({eta})";

/// Create a spinner progress bar with standard styling.
///
/// # Example
/// ```ignore
/// let pb = create_spinner("downloading boost_1_49.tar.gz");
/// // ... do work ...
/// pb.finish_and_clear();
/// ```
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_CHARS);
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(TICK_INTERVAL_MS));
    pb
}

/// Upgrade a spinner to a byte progress bar when content length becomes known.
pub fn upgrade_to_bytes(pb: &ProgressBar, total_bytes: u64) {
    pb.set_length(total_bytes);
    let style = ProgressStyle::with_template(BYTES_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━╸━");
    pb.set_style(style);
}

/// RAII guard that clears a progress bar when dropped.
///
/// Ensures progress bars are cleaned up even on errors.
///
/// # Example
/// ```ignore
/// let pb = create_spinner("working...");
/// let _guard = ProgressGuard::new(&pb);
/// do_fallible_work()?; // pb cleared even if this fails
/// ```
pub struct ProgressGuard<'a>(&'a ProgressBar);

impl<'a> ProgressGuard<'a> {
    pub fn new(pb: &'a ProgressBar) -> Self {
        Self(pb)
    }
}

impl Drop for ProgressGuard<'_> {
    fn drop(&mut self) {
        self.0.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_spinner() {
        let pb = create_spinner("test message");
        assert!(!pb.is_finished());
        pb.finish_and_clear();
        assert!(pb.is_finished());
    }

    #[test]
    fn test_upgrade_to_bytes_sets_length() {
        let pb = create_spinner("downloading");
        upgrade_to_bytes(&pb, 1000);
        pb.set_position(500);
        assert_eq!(pb.length(), Some(1000));
        assert_eq!(pb.position(), 500);
        pb.finish_and_clear();
    }

    #[test]
    fn test_progress_guard_clears_on_drop() {
        let pb = create_spinner("test");
        {
            let _guard = ProgressGuard::new(&pb);
            assert!(!pb.is_finished());
        }
        assert!(pb.is_finished());
    }
}
