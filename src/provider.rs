//! Provider contract and session event plumbing
//!
//! The provider (the document engine) performs the actual text search. It is
//! handed a [`SessionHandle`] at `start_search` time and reports progress by
//! sending generation-tagged events back through it. The supervisor drains
//! those events on the host's event loop; no threads are involved on this
//! side of the boundary.

use std::sync::mpsc;

use crate::mode::{SearchMode, SearchModeFlags};
use crate::types::Match;

/// Monotonically increasing session token. A callback whose generation does
/// not match the supervisor's current generation is stale and dropped.
pub type Generation = u64;

/// One callback from the provider for an in-flight session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A match was found.
    Found(Match),
    /// The provider finished scanning one page.
    PageEnd,
    /// The session is complete; no further events will follow.
    DocumentEnd,
    /// The session failed; no further events will follow.
    Error(String),
}

/// A [`SessionEvent`] stamped with the generation of the session it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedEvent {
    pub generation: Generation,
    pub event: SessionEvent,
}

/// The provider's side of one search session.
///
/// Cloneable so the provider can hand it to whatever internally produces the
/// callbacks. Events sent after the session has been superseded are delivered
/// but discarded by the supervisor's generation check; sends after the
/// supervisor is dropped are silently ignored.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    generation: Generation,
    events: mpsc::Sender<TaggedEvent>,
}

impl SessionHandle {
    pub(crate) fn new(generation: Generation, events: mpsc::Sender<TaggedEvent>) -> Self {
        Self { generation, events }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Report a found match.
    pub fn found(&self, m: Match) {
        self.send(SessionEvent::Found(m));
    }

    /// Report the end of a page.
    pub fn page_end(&self) {
        self.send(SessionEvent::PageEnd);
    }

    /// Report session completion. Must be sent exactly once per session
    /// unless [`error`](Self::error) terminates it first.
    pub fn document_end(&self) {
        self.send(SessionEvent::DocumentEnd);
    }

    /// Report a mid-session failure. Terminates the session.
    pub fn error(&self, message: impl Into<String>) {
        self.send(SessionEvent::Error(message.into()));
    }

    /// Report a raw provider result, dispatching on its result code.
    /// Engines that deliver one callback shape for found, page-end and
    /// document-end results can forward it here unchanged.
    pub fn result(&self, m: Match) {
        match m.result_code {
            crate::types::ResultCode::Found => self.found(m),
            crate::types::ResultCode::PageEnd => self.page_end(),
            crate::types::ResultCode::DocumentEnd => self.document_end(),
        }
    }

    fn send(&self, event: SessionEvent) {
        let _ = self.events.send(TaggedEvent {
            generation: self.generation,
            event,
        });
    }
}

/// Per-session parameters passed alongside term and mode.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// True for a full-collection session, false for single-match.
    pub full_search: bool,
    /// Channel the provider reports its callbacks through.
    pub session: SessionHandle,
}

/// Contract the coordinator requires of the document engine.
///
/// `start_search` begins an asynchronous session and must eventually deliver
/// `document_end` exactly once through the handle, unless an `error` ends the
/// session first. `clear_results` synchronously discards provider-side
/// highlight and selection state and is called before any superseding
/// session starts.
#[cfg_attr(test, mockall::automock)]
pub trait SearchProvider {
    /// The provider's search-mode bit vocabulary.
    fn mode_flags(&self) -> SearchModeFlags;

    /// Begin an asynchronous search session.
    fn start_search(&mut self, term: &str, mode: SearchMode, request: SearchRequest);

    /// Discard provider-side highlight/selection state.
    fn clear_results(&mut self);

    /// Jump to and highlight a match (single-match sessions).
    fn show_match(&mut self, m: &Match);

    /// Persistently select a match as the current one (full sessions).
    fn display_match(&mut self, m: &Match);
}
