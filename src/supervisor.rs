//! Search session supervisor
//!
//! Long-lived, single-threaded state machine that owns the accumulator, the
//! generation counter and the listener registry, and decides per user action
//! which coordinator to (re)start. The host event loop drives it by calling
//! [`SearchSupervisor::pump`] to drain provider callbacks and
//! [`SearchSupervisor::poll_debounce`] to fire coalesced term changes.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc;
use std::time::Duration;

use crate::accumulator::ResultAccumulator;
use crate::debounce::{SearchDebouncer, DEFAULT_DEBOUNCE_DELAY};
use crate::error::SearchError;
use crate::full::{FullCollectionCoordinator, FullOutcome};
use crate::provider::{Generation, SearchProvider, SessionHandle, TaggedEvent};
use crate::single::{SingleMatchCoordinator, SingleOutcome};
use crate::types::{Match, NavDirection, SearchKind, SearchOptions};
use crate::ui_state::UiState;

/// Where the supervisor currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Idle,
    SingleSearching,
    SingleFound,
    SingleExhausted,
    FullSearching,
    FullSettled,
}

/// Callback invoked when a session settles: final term, resolved options
/// snapshot, ordered matches.
pub type SearchListener = Box<dyn FnMut(&str, &SearchOptions, &[Match])>;

/// Handle for unregistering a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Tunables for the supervisor.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Delay between the last keystroke and the search firing.
    pub debounce_delay: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_delay: DEFAULT_DEBOUNCE_DELAY,
        }
    }
}

/// Top-level coordinator wiring user input to provider sessions.
pub struct SearchSupervisor<P: SearchProvider, U: UiState> {
    provider: P,
    ui: U,
    accumulator: ResultAccumulator,
    single: SingleMatchCoordinator,
    full: FullCollectionCoordinator,
    debouncer: SearchDebouncer,
    state: SupervisorState,
    term: String,
    generation: Generation,
    session_kind: Option<SearchKind>,
    searching: bool,
    listeners: Vec<(ListenerId, SearchListener)>,
    next_listener_id: u64,
    events_tx: mpsc::Sender<TaggedEvent>,
    events_rx: mpsc::Receiver<TaggedEvent>,
}

impl<P: SearchProvider, U: UiState> SearchSupervisor<P, U> {
    pub fn new(provider: P, ui: U) -> Self {
        Self::with_config(provider, ui, SearchConfig::default())
    }

    pub fn with_config(provider: P, ui: U, config: SearchConfig) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            provider,
            ui,
            accumulator: ResultAccumulator::new(),
            single: SingleMatchCoordinator::new(),
            full: FullCollectionCoordinator::new(),
            debouncer: SearchDebouncer::with_delay(config.debounce_delay),
            state: SupervisorState::Idle,
            term: String::new(),
            generation: 0,
            session_kind: None,
            searching: false,
            listeners: Vec::new(),
            next_listener_id: 0,
            events_tx,
            events_rx,
        }
    }

    // --- user input ---

    /// The user typed: re-arm the debouncer with the new term. A term that is
    /// blank after trimming never reaches the provider; it clears current
    /// results instead.
    pub fn on_term_change(&mut self, term: &str) {
        self.term = term.to_string();
        if term.trim().is_empty() {
            self.debouncer.clear();
            self.clear_and_idle();
        } else {
            self.debouncer.set_pending(term);
        }
    }

    /// Fire the pending term change once the debounce delay has elapsed.
    /// Call regularly from the host event loop.
    pub fn poll_debounce(&mut self) {
        if let Some(term) = self.debouncer.check_ready() {
            self.term = term;
            if self.ui.is_results_panel_open() {
                self.clear_results();
                self.start_full();
            } else {
                self.start_single(NavDirection::Forward);
            }
        }
    }

    /// A search option was toggled: clear current results immediately and
    /// relaunch whichever session kind is currently relevant.
    pub fn on_option_toggle(&mut self) {
        self.clear_results();
        if self.term.trim().is_empty() {
            return;
        }
        if self.ui.is_results_panel_open() {
            self.start_full();
        } else {
            self.start_single(NavDirection::Forward);
        }
    }

    /// Next/previous navigation. When a full session has settled with
    /// results, this only moves the active index (wrapping) and re-selects;
    /// otherwise it delegates to the single-match coordinator.
    pub fn on_navigate(&mut self, direction: NavDirection) {
        if self.state == SupervisorState::FullSettled && !self.accumulator.is_empty() {
            let count = self.accumulator.count();
            let next = match (self.accumulator.active_index(), direction) {
                (Some(i), NavDirection::Forward) => (i + 1) % count,
                (Some(i), NavDirection::Backward) => {
                    if i == 0 {
                        count - 1
                    } else {
                        i - 1
                    }
                }
                (None, NavDirection::Forward) => 0,
                (None, NavDirection::Backward) => count - 1,
            };
            self.accumulator.set_active(next);
            if let Some(active) = self.accumulator.active_match() {
                self.provider.display_match(active);
            }
        } else {
            self.start_single(direction);
        }
    }

    /// The user escalated from the quick search to the full results list.
    /// The active match survives as the carry-over anchor for the new
    /// session; opening the results surface itself is the host's job.
    pub fn on_overflow_request(&mut self) {
        if self.term.trim().is_empty() {
            return;
        }
        self.provider.clear_results();
        self.start_full();
    }

    /// Programmatic single search for `term`, bypassing the debouncer.
    /// A blank term is treated as clearing the search, same as typing one.
    pub fn search_now(&mut self, term: &str) {
        self.term = term.to_string();
        self.debouncer.clear();
        if term.trim().is_empty() {
            self.clear_and_idle();
            return;
        }
        self.clear_results();
        self.start_single(NavDirection::Forward);
    }

    /// Programmatic full search for `term`, bypassing the debouncer.
    /// A blank term is treated as clearing the search, same as typing one.
    pub fn search_all(&mut self, term: &str) {
        self.term = term.to_string();
        self.debouncer.clear();
        if term.trim().is_empty() {
            self.clear_and_idle();
            return;
        }
        self.clear_results();
        self.start_full();
    }

    /// The document was closed: drop all session, result and timing state.
    pub fn reset(&mut self) {
        self.supersede();
        self.session_kind = None;
        self.state = SupervisorState::Idle;
        self.searching = false;
        self.term.clear();
        self.debouncer.clear();
        self.provider.clear_results();
        self.accumulator.reset();
        self.single.reset();
        self.full.reset();
    }

    // --- provider callbacks ---

    /// Drain and apply provider callbacks. Events from superseded sessions
    /// are dropped here; a stale `document_end` in particular must not clear
    /// the searching flag of its successor.
    pub fn pump(&mut self) {
        while let Ok(tagged) = self.events_rx.try_recv() {
            if tagged.generation != self.generation {
                log::trace!(
                    "{}",
                    SearchError::StaleCallback {
                        received: tagged.generation,
                        current: self.generation,
                    }
                );
                continue;
            }
            match self.session_kind {
                Some(SearchKind::Single) => {
                    let outcome = self.single.on_event(
                        tagged.event,
                        &mut self.provider,
                        &mut self.accumulator,
                    );
                    self.apply_single_outcome(outcome);
                }
                Some(SearchKind::Full) => {
                    let outcome = self.full.on_event(
                        tagged.event,
                        &mut self.provider,
                        &mut self.accumulator,
                    );
                    self.apply_full_outcome(outcome);
                }
                None => {
                    log::trace!("dropping event with no session in flight");
                }
            }
        }
    }

    // --- listeners ---

    /// Register a settle listener. Invocation order is registration order.
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&str, &SearchOptions, &[Match]) + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns false if it was already gone.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    // --- exposed state ---

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn matches(&self) -> &[Match] {
        self.accumulator.matches()
    }

    pub fn match_count(&self) -> usize {
        self.accumulator.count()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.accumulator.active_index()
    }

    pub fn active_match(&self) -> Option<&Match> {
        self.accumulator.active_match()
    }

    /// Full-session no-result flag.
    pub fn no_result(&self) -> bool {
        self.accumulator.no_result()
    }

    /// Single-session no-result flag, scoped to the current single term.
    pub fn single_no_result(&self) -> bool {
        self.single.no_result()
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    // --- internals ---

    /// Invalidate every in-flight callback without starting anything new.
    fn supersede(&mut self) {
        self.generation += 1;
    }

    /// Blank-term path shared by `on_term_change`, `search_now` and
    /// `search_all`: kill any in-flight session and return to `Idle` with
    /// both coordinators wiped, so no stale no-result flag survives.
    fn clear_and_idle(&mut self) {
        self.supersede();
        self.session_kind = None;
        self.clear_results();
        self.single.reset();
        self.full.reset();
        self.state = SupervisorState::Idle;
        self.searching = false;
    }

    fn next_session(&mut self, kind: SearchKind) -> SessionHandle {
        self.generation += 1;
        self.session_kind = Some(kind);
        SessionHandle::new(self.generation, self.events_tx.clone())
    }

    fn clear_results(&mut self) {
        self.provider.clear_results();
        self.accumulator.reset();
    }

    fn start_single(&mut self, direction: NavDirection) {
        if self.term.trim().is_empty() {
            return;
        }
        let term = self.term.clone();
        let options = self.ui.options();
        let session = self.next_session(SearchKind::Single);
        self.searching = true;
        self.state = SupervisorState::SingleSearching;
        self.single.start(
            &term,
            direction,
            &options,
            &mut self.provider,
            &mut self.accumulator,
            session,
        );
    }

    fn start_full(&mut self) {
        if self.term.trim().is_empty() {
            return;
        }
        let term = self.term.clone();
        let options = self.ui.options();
        let session = self.next_session(SearchKind::Full);
        self.searching = true;
        self.state = SupervisorState::FullSearching;
        self.full.start(
            &term,
            &options,
            &mut self.provider,
            &mut self.accumulator,
            session,
        );
    }

    fn apply_single_outcome(&mut self, outcome: SingleOutcome) {
        // The single session surfaces at most the current match; every
        // callback also settles the searching flag.
        self.searching = false;
        match outcome {
            SingleOutcome::Pending => {}
            // Every found notifies listeners, anchored or not.
            SingleOutcome::Found { .. } => {
                self.state = SupervisorState::SingleFound;
                self.notify_listeners();
            }
            SingleOutcome::Exhausted { found_any } => {
                self.state = if found_any {
                    SupervisorState::SingleFound
                } else {
                    SupervisorState::SingleExhausted
                };
            }
            SingleOutcome::Failed(message) => self.fail_session(message),
        }
    }

    fn apply_full_outcome(&mut self, outcome: FullOutcome) {
        match outcome {
            FullOutcome::Streaming => {}
            FullOutcome::Settled => {
                self.searching = false;
                self.state = SupervisorState::FullSettled;
                self.notify_listeners();
            }
            FullOutcome::Failed(message) => self.fail_session(message),
        }
    }

    fn fail_session(&mut self, message: String) {
        let error = SearchError::Provider(message);
        log::warn!("{}", error);
        self.searching = false;
        self.session_kind = None;
        self.state = SupervisorState::Idle;
        self.ui.set_search_error(&error.to_string());
    }

    /// Invoke listeners in registration order. A panicking listener is
    /// contained so the rest still run.
    fn notify_listeners(&mut self) {
        let options = self.ui.options();
        let term = self.term.clone();
        let matches = self.accumulator.matches();
        for (id, listener) in &mut self.listeners {
            if catch_unwind(AssertUnwindSafe(|| listener(&term, &options, matches))).is_err() {
                log::warn!("search listener {:?} panicked", id);
            }
        }
    }
}
