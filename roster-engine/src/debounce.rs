//! Debounce timers for criteria edits.
//!
//! A [`Debounce`] is an owned resource, not a background task: scheduling
//! records a deadline, and the owner awaits [`Debounce::expired`] on its own
//! task when it is ready to commit. A new edit always supersedes the pending
//! deadline, never queues behind it, so at most one deadline is pending per
//! slot at any instant. Cancellation is explicit; nothing is left to garbage
//! collection.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// Default quiet window before edits are committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// A cancel-then-restart debounce timer.
#[derive(Debug)]
pub struct Debounce {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    /// Create a timer with the given quiet window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// The configured quiet window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Start (or restart) the quiet window from now.
    ///
    /// Any pending deadline is superseded.
    pub fn schedule(&mut self) {
        self.deadline = Some(Instant::now() + self.window);
    }

    /// Drop any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Wait until the pending deadline passes, then clear it.
    ///
    /// Returns immediately if nothing is pending. The deadline is re-read
    /// after each sleep so a reschedule that lands between polls extends
    /// the wait instead of firing early.
    pub async fn expired(&mut self) {
        while let Some(deadline) = self.deadline {
            sleep_until(deadline).await;
            if self.deadline == Some(deadline) {
                break;
            }
        }
        self.deadline = None;
    }
}
