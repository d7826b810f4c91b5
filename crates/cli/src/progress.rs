//! Progress indicators for the CLI.
//!
//! Responsibilities:
//! - Show a spinner while a command waits on the backend.
//! - Ensure ALL progress output is written to STDERR (never stdout), so
//!   json/table output is not contaminated.
//! - Allow global suppression via a caller-provided `enabled` boolean (driven by `--quiet`).
//!
//! Non-responsibilities:
//! - This module does not decide *when* progress should be shown; callers do.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// An indefinite spinner for unknown-duration operations (watch, upload).
///
/// No-op when disabled.
pub(crate) struct Spinner {
    label: String,
    pb: Option<ProgressBar>,
}

impl Spinner {
    /// `enabled` should be `!quiet`.
    pub(crate) fn new(enabled: bool, label: impl Into<String>) -> Self {
        let label = label.into();

        if !enabled {
            return Self { label, pb: None };
        }

        let pb = ProgressBar::new_spinner();
        pb.set_draw_target(ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
            pb.set_style(style);
        }
        pb.set_message(label.clone());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            label,
            pb: Some(pb),
        }
    }

    /// Replace the text after the label, e.g. the latest status.
    pub(crate) fn set_detail(&self, detail: &str) {
        if let Some(pb) = &self.pb {
            pb.set_message(format!("{}: {}", self.label, detail));
        }
    }

    /// Finish with a stable message (on STDERR).
    pub(crate) fn finish(&self, detail: &str) {
        if let Some(pb) = &self.pb {
            pb.finish_with_message(format!("{}: {}", self.label, detail));
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}
