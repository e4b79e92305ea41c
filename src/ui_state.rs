//! UI-state collaborator contract
//!
//! The surrounding viewer owns the search options and the open/closed state
//! of its panels; the supervisor only reads them. Provider failures are
//! surfaced back through the same collaborator as a human-readable string.

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::SearchOptions;

/// What the supervisor needs from the viewer's UI state store.
pub trait UiState {
    /// Snapshot of the current search options.
    fn options(&self) -> SearchOptions;

    /// Whether the full results panel is currently open. Decides single vs.
    /// full session kind; never written by the supervisor.
    fn is_results_panel_open(&self) -> bool;

    /// Surface a provider error message to the user.
    fn set_search_error(&mut self, message: &str);
}

/// Plain in-memory [`UiState`] for hosts without their own store.
#[derive(Debug, Clone, Default)]
pub struct BasicUiState {
    options: SearchOptions,
    results_panel_open: bool,
    last_error: Option<String>,
}

impl BasicUiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_options(&mut self, options: SearchOptions) {
        self.options = options;
    }

    pub fn set_results_panel_open(&mut self, open: bool) {
        self.results_panel_open = open;
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

impl UiState for BasicUiState {
    fn options(&self) -> SearchOptions {
        self.options
    }

    fn is_results_panel_open(&self) -> bool {
        self.results_panel_open
    }

    fn set_search_error(&mut self, message: &str) {
        log::warn!("search error surfaced to UI: {}", message);
        self.last_error = Some(message.to_string());
    }
}

// The UI state is usually shared between the supervisor and the host's view
// layer on the same event loop.
impl<U: UiState> UiState for Rc<RefCell<U>> {
    fn options(&self) -> SearchOptions {
        self.borrow().options()
    }

    fn is_results_panel_open(&self) -> bool {
        self.borrow().is_results_panel_open()
    }

    fn set_search_error(&mut self, message: &str) {
        self.borrow_mut().set_search_error(message);
    }
}
