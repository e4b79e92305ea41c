//! Full-collection coordinator
//!
//! Runs one session that streams every match in the document, in order, into
//! the accumulator. The match that was active when the session launched is
//! carried over: the first streamed match logically equal to it becomes the
//! new active match, so a quick single search hands off to the full list
//! with the same visual anchor.

use crate::accumulator::ResultAccumulator;
use crate::mode::encode;
use crate::provider::{SearchProvider, SearchRequest, SessionEvent, SessionHandle};
use crate::types::{Match, SearchOptions};

/// What the supervisor should do after one full-session event.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FullOutcome {
    /// Still streaming; nothing to act on.
    Streaming,
    /// The session completed; notify listeners exactly once.
    Settled,
    /// The provider failed; surface the message.
    Failed(String),
}

/// Coordinator for full search-and-collect sessions.
#[derive(Debug, Default)]
pub struct FullCollectionCoordinator {
    anchor: Option<Match>,
    anchored: bool,
}

impl FullCollectionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset(&mut self) {
        self.anchor = None;
        self.anchored = false;
    }

    /// Begin a session. Captures the carry-over anchor from whatever is
    /// active right now, then resets the accumulator. Search-up is always
    /// excluded from the encoded mode.
    pub(crate) fn start<P: SearchProvider>(
        &mut self,
        term: &str,
        options: &SearchOptions,
        provider: &mut P,
        accumulator: &mut ResultAccumulator,
        session: SessionHandle,
    ) {
        self.anchor = accumulator.active_match().cloned();
        self.anchored = false;
        accumulator.reset();

        let mode = encode(options, true, &provider.mode_flags());

        log::debug!(
            "full search start: term={:?} anchor_page={:?} generation={}",
            term,
            self.anchor.as_ref().map(|m| m.page_number),
            session.generation()
        );
        provider.start_search(
            term,
            mode,
            SearchRequest {
                full_search: true,
                session,
            },
        );
    }

    /// Apply one provider callback for the current session.
    pub(crate) fn on_event<P: SearchProvider>(
        &mut self,
        event: SessionEvent,
        provider: &mut P,
        accumulator: &mut ResultAccumulator,
    ) -> FullOutcome {
        match event {
            SessionEvent::Found(m) => {
                let wins_anchor = !self.anchored && self.matches_anchor(&m);
                let index = accumulator.append(m);
                if wins_anchor {
                    self.anchored = true;
                    accumulator.set_active(index);
                    if let Some(active) = accumulator.active_match() {
                        provider.display_match(active);
                    }
                }
                FullOutcome::Streaming
            }
            SessionEvent::PageEnd => FullOutcome::Streaming,
            SessionEvent::DocumentEnd => {
                accumulator.set_no_result(accumulator.is_empty());
                FullOutcome::Settled
            }
            SessionEvent::Error(message) => FullOutcome::Failed(message),
        }
    }

    /// No anchor means the first streamed match wins.
    fn matches_anchor(&self, m: &Match) -> bool {
        match &self.anchor {
            None => true,
            Some(anchor) => anchor.same_logical_match(m),
        }
    }
}
