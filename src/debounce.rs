//! Term-change debounce control
//!
//! Coalesces per-keystroke term changes so the provider sees at most one
//! session per typing burst. Poll-driven: the host event loop calls
//! [`SearchDebouncer::check_ready`] (via the supervisor) and the pending term
//! fires once the delay has elapsed since the last keystroke. The state
//! machine itself stays synchronous; all timing lives here.

use std::time::{Duration, Instant};

/// Default delay between the last keystroke and the search firing.
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Debounce controller for rate-limiting search sessions while typing.
#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    pending_term: Option<String>,
    last_input_time: Option<Instant>,
}

impl SearchDebouncer {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_DEBOUNCE_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            pending_term: None,
            last_input_time: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a keystroke: replace any pending term and restart the timer.
    /// The final call before the user stops typing always wins.
    pub fn set_pending(&mut self, term: &str) {
        self.pending_term = Some(term.to_string());
        self.last_input_time = Some(Instant::now());
    }

    /// Drop any pending term without firing it.
    pub fn clear(&mut self) {
        self.pending_term = None;
        self.last_input_time = None;
    }

    /// Return the pending term if the delay has elapsed, consuming it.
    pub fn check_ready(&mut self) -> Option<String> {
        let last = self.last_input_time?;
        if self.pending_term.is_some() && last.elapsed() >= self.delay {
            self.last_input_time = None;
            return self.pending_term.take();
        }
        None
    }

    pub fn has_pending(&self) -> bool {
        self.pending_term.is_some()
    }

    /// Remaining time until the pending term fires, if any.
    pub fn time_until_ready(&self) -> Option<Duration> {
        let last = self.last_input_time?;
        Some(self.delay.saturating_sub(last.elapsed()))
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
