//! Single-match coordinator
//!
//! Answers "find the next/previous/initial occurrence of the term from the
//! current position" with a lightweight, non-collecting provider session.
//! Only the current match is surfaced; the full list is the
//! [`full`](crate::full) coordinator's job.

use crate::accumulator::ResultAccumulator;
use crate::mode::encode;
use crate::provider::{SearchProvider, SearchRequest, SessionEvent, SessionHandle};
use crate::types::{Match, NavDirection, SearchOptions};

/// What the supervisor should do after one single-session event.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SingleOutcome {
    /// Nothing to act on (page boundary).
    Pending,
    /// A match was found; notify listeners. `activated` is true when it
    /// became the session's active match (first found of the session).
    Found { activated: bool },
    /// The document is exhausted; `found_any` tells the two apart.
    Exhausted { found_any: bool },
    /// The provider failed; surface the message.
    Failed(String),
}

/// Coordinator for quick navigation searches.
#[derive(Debug, Default)]
pub struct SingleMatchCoordinator {
    current_term: String,
    found_any: bool,
    no_result: bool,
}

impl SingleMatchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scoped "no result for this term" flag, independent from the full
    /// search no-result flag.
    pub fn no_result(&self) -> bool {
        self.no_result
    }

    pub(crate) fn reset(&mut self) {
        self.current_term.clear();
        self.found_any = false;
        self.no_result = false;
    }

    /// Begin a session. A changed term resets the per-term state and clears
    /// provider-side highlights; the accumulator is reset either way.
    ///
    /// "Previous" enables search-up for this one session via a local options
    /// copy, leaving the persisted option untouched.
    pub(crate) fn start<P: SearchProvider>(
        &mut self,
        term: &str,
        direction: NavDirection,
        options: &SearchOptions,
        provider: &mut P,
        accumulator: &mut ResultAccumulator,
        session: SessionHandle,
    ) {
        if self.current_term != term {
            self.current_term = term.to_string();
            self.found_any = false;
            self.no_result = false;
            provider.clear_results();
        }
        accumulator.reset();

        let session_options = SearchOptions {
            search_up: options.search_up || direction == NavDirection::Backward,
            ..*options
        };
        let mode = encode(&session_options, false, &provider.mode_flags());

        log::debug!(
            "single search start: term={:?} direction={:?} generation={}",
            term,
            direction,
            session.generation()
        );
        provider.start_search(
            term,
            mode,
            SearchRequest {
                full_search: false,
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
    ) -> SingleOutcome {
        match event {
            SessionEvent::Found(m) => {
                self.found_any = true;
                let activated = self.store_found(m, provider, accumulator);
                SingleOutcome::Found { activated }
            }
            SessionEvent::PageEnd => SingleOutcome::Pending,
            SessionEvent::DocumentEnd => {
                if !self.found_any {
                    self.no_result = true;
                }
                SingleOutcome::Exhausted {
                    found_any: self.found_any,
                }
            }
            SessionEvent::Error(message) => SingleOutcome::Failed(message),
        }
    }

    /// Append the match; the first found of a session becomes active and the
    /// provider jumps to it.
    fn store_found<P: SearchProvider>(
        &mut self,
        m: Match,
        provider: &mut P,
        accumulator: &mut ResultAccumulator,
    ) -> bool {
        let index = accumulator.append(m);
        if accumulator.active_index().is_none() {
            accumulator.set_active(index);
            if let Some(active) = accumulator.active_match() {
                provider.show_match(active);
            }
            return true;
        }
        false
    }
}
