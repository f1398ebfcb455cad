//! Spinner for network round trips.
//!
//! indicatif draws on stderr and hides itself when stderr is not a terminal,
//! so answers piped from stdout stay clean.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Create a spinner with a custom message
pub fn create_spinner_with_message(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_CHARS);
    spinner.set_style(style);
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// A spinner only in human mode; JSON output stays machine readable.
pub fn maybe_spinner(message: impl Into<String>, json_mode: bool) -> Option<ProgressBar> {
    (!json_mode).then(|| create_spinner_with_message(message))
}

/// Spinner cleared when dropped, so an early `?` return does not leave it
/// on screen above the error message.
pub struct SpinnerGuard(Option<ProgressBar>);

impl SpinnerGuard {
    /// Starts a spinner unless in JSON mode.
    pub fn start(message: impl Into<String>, json_mode: bool) -> Self {
        Self(maybe_spinner(message, json_mode))
    }

    pub const fn bar(&self) -> Option<&ProgressBar> {
        self.0.as_ref()
    }
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        if let Some(spinner) = self.0.take() {
            spinner.finish_and_clear();
        }
    }
}
