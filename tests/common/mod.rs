//! Shared test fixtures: a recording provider whose sessions the test body
//! drives by hand, and a supervisor wired to shared UI state.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use docsearch::{
    BasicUiState, Match, Quad, SearchConfig, SearchMode, SearchModeFlags, SearchProvider,
    SearchRequest, SearchSupervisor, SessionHandle,
};

/// One recorded `start_search` call.
#[derive(Debug, Clone)]
pub struct StartedSearch {
    pub term: String,
    pub mode: SearchMode,
    pub full_search: bool,
    pub session: SessionHandle,
}

/// Everything the fake provider observed.
#[derive(Debug, Default)]
pub struct ProviderLog {
    pub started: Vec<StartedSearch>,
    pub clear_calls: usize,
    pub shown: Vec<Match>,
    pub displayed: Vec<Match>,
}

impl ProviderLog {
    /// Handle of the most recently started session.
    pub fn last_session(&self) -> SessionHandle {
        self.started
            .last()
            .expect("no search was started")
            .session
            .clone()
    }
}

/// Provider double that records calls and lets the test deliver session
/// events itself.
#[derive(Debug, Clone, Default)]
pub struct FakeProvider {
    log: Rc<RefCell<ProviderLog>>,
}

impl FakeProvider {
    pub fn new() -> (Self, Rc<RefCell<ProviderLog>>) {
        let provider = Self::default();
        let log = provider.log.clone();
        (provider, log)
    }
}

impl SearchProvider for FakeProvider {
    fn mode_flags(&self) -> SearchModeFlags {
        SearchModeFlags::default()
    }

    fn start_search(&mut self, term: &str, mode: SearchMode, request: SearchRequest) {
        self.log.borrow_mut().started.push(StartedSearch {
            term: term.to_string(),
            mode,
            full_search: request.full_search,
            session: request.session,
        });
    }

    fn clear_results(&mut self) {
        self.log.borrow_mut().clear_calls += 1;
    }

    fn show_match(&mut self, m: &Match) {
        self.log.borrow_mut().shown.push(m.clone());
    }

    fn display_match(&mut self, m: &Match) {
        self.log.borrow_mut().displayed.push(m.clone());
    }
}

pub type TestSupervisor = SearchSupervisor<FakeProvider, Rc<RefCell<BasicUiState>>>;

/// Supervisor with a short debounce, plus handles on the provider log and
/// the shared UI state.
pub fn supervisor() -> (TestSupervisor, Rc<RefCell<ProviderLog>>, Rc<RefCell<BasicUiState>>) {
    supervisor_with_delay(Duration::from_millis(10))
}

pub fn supervisor_with_delay(
    delay: Duration,
) -> (TestSupervisor, Rc<RefCell<ProviderLog>>, Rc<RefCell<BasicUiState>>) {
    let (provider, log) = FakeProvider::new();
    let ui = Rc::new(RefCell::new(BasicUiState::new()));
    let supervisor = SearchSupervisor::with_config(
        provider,
        ui.clone(),
        SearchConfig {
            debounce_delay: delay,
        },
    );
    (supervisor, log, ui)
}

/// A found match on `page` whose first quad starts at `x`.
pub fn hit(page: u32, x: f64) -> Match {
    Match::found(page, vec![Quad::new(vec![x, 0.0, x + 1.0, 1.0])])
}
