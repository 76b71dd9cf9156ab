//! Error banner lifecycle

use super::App;
use crate::constants::ERROR_VISIBLE_SECS;
use crate::types::TodoError;
use std::time::Instant;
use tracing::debug;

impl App {
    /// Show `error` in the banner and restart the auto-hide timer.
    pub fn show_error(&mut self, error: TodoError) {
        debug!(message = error.message(), "Showing error banner");
        self.error_message = error;
        self.error_visible = true;
        self.error_since = Some(Instant::now());
    }

    pub fn dismiss_error(&mut self) {
        self.error_visible = false;
        self.error_since = None;
    }

    /// Hides the banner once it has been up long enough. Returns true while it is still showing.
    pub fn tick_error(&mut self, now: Instant) -> bool {
        let Some(since) = self.error_since else {
            return false;
        };
        if now.saturating_duration_since(since).as_secs_f32() >= ERROR_VISIBLE_SECS {
            self.dismiss_error();
            false
        } else {
            true
        }
    }
}
