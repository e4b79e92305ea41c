//! Error taxonomy for the search coordinator.

use thiserror::Error;

use crate::provider::Generation;

/// Failures observed by the supervisor. None of these are fatal: the
/// supervisor always accepts a new search request afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The provider reported a failure mid-session. Surfaced once to the
    /// UI-state collaborator; the user must re-issue the search.
    #[error("search provider error: {0}")]
    Provider(String),

    /// A callback arrived for a superseded session. Internal and silent;
    /// never surfaced to the user.
    #[error("stale callback for generation {received}, current is {current}")]
    StaleCallback {
        received: Generation,
        current: Generation,
    },
}
