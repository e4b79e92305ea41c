//! Ordered result store for the current search session
//!
//! Matches are appended in provider delivery order and never reordered;
//! a search-up session therefore stores matches in reverse document order.
//! The accumulator is owned by the supervisor and reset whenever a new
//! session starts.

use crate::types::Match;

/// Appendable, ordered store of matches with active-match tracking.
#[derive(Debug, Default)]
pub struct ResultAccumulator {
    matches: Vec<Match>,
    active_index: Option<usize>,
    no_result: bool,
}

impl ResultAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all matches and flags for a new session.
    pub fn reset(&mut self) {
        self.matches.clear();
        self.active_index = None;
        self.no_result = false;
        log::debug!("result accumulator reset");
    }

    /// Append a match, preserving delivery order, and return its index.
    pub fn append(&mut self, m: Match) -> usize {
        self.matches.push(m);
        self.matches.len() - 1
    }

    /// Set the active match. Out-of-range indices are ignored so a stale
    /// callback racing a reset cannot point at a match that is gone.
    pub fn set_active(&mut self, index: usize) {
        if index < self.matches.len() {
            self.active_index = Some(index);
        } else {
            log::trace!(
                "ignoring set_active({}) beyond {} stored matches",
                index,
                self.matches.len()
            );
        }
    }

    pub fn set_no_result(&mut self, no_result: bool) {
        self.no_result = no_result;
    }

    pub fn no_result(&self) -> bool {
        self.no_result
    }

    pub fn count(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_match(&self) -> Option<&Match> {
        self.active_index.and_then(|i| self.matches.get(i))
    }
}
