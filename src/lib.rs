//! Incremental text-search coordination for a document viewer.
//!
//! Turns typed queries, option toggles and navigation commands into
//! cancellable, streamed search sessions against an external document engine
//! (the provider), reconciles the per-match callbacks into ordered result
//! state, and tracks the active match across session handoffs.
//!
//! Everything runs on the host's single-threaded event loop: the provider
//! reports back through a [`provider::SessionHandle`], and the host drives
//! [`supervisor::SearchSupervisor::pump`] / `poll_debounce` each tick.

pub mod accumulator;
pub mod debounce;
pub mod error;
pub mod full;
pub mod mode;
pub mod provider;
pub mod single;
pub mod supervisor;
pub mod types;
pub mod ui_state;

// 公開API
pub use accumulator::ResultAccumulator;
pub use debounce::{SearchDebouncer, DEFAULT_DEBOUNCE_DELAY};
pub use error::SearchError;
pub use full::FullCollectionCoordinator;
pub use mode::{encode, SearchMode, SearchModeFlags};
pub use provider::{
    Generation, SearchProvider, SearchRequest, SessionEvent, SessionHandle, TaggedEvent,
};
pub use single::SingleMatchCoordinator;
pub use supervisor::{
    ListenerId, SearchConfig, SearchListener, SearchSupervisor, SupervisorState,
};
pub use types::{Match, NavDirection, Quad, ResultCode, SearchKind, SearchOptions};
pub use ui_state::{BasicUiState, UiState};
