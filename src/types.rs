use serde::{Deserialize, Serialize};

/// User-toggled search options, owned by the UI state layer.
///
/// All flags are independent; `search_up` is ignored for full-collection
/// sessions (the encoder forces it off there).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SearchOptions {
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub wildcard: bool,
    pub regex: bool,
    pub search_up: bool,
    pub ambient_string: bool,
}

/// Terminal code attached to a provider callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultCode {
    Found,
    PageEnd,
    DocumentEnd,
}

/// One highlight rectangle (or general quadrilateral) within a page,
/// in the provider's coordinate space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub points: Vec<f64>,
}

impl Quad {
    pub fn new(points: Vec<f64>) -> Self {
        Self { points }
    }
}

/// A single search hit produced by the provider. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub page_number: u32,
    pub quads: Vec<Quad>,
    pub result_code: ResultCode,
}

impl Match {
    pub fn found(page_number: u32, quads: Vec<Quad>) -> Self {
        Self {
            page_number,
            quads,
            result_code: ResultCode::Found,
        }
    }

    /// Terminal marker: the provider finished scanning `page_number`.
    pub fn page_end(page_number: u32) -> Self {
        Self {
            page_number,
            quads: Vec::new(),
            result_code: ResultCode::PageEnd,
        }
    }

    /// Terminal marker: the provider exhausted the document.
    pub fn document_end() -> Self {
        Self {
            page_number: 0,
            quads: Vec::new(),
            result_code: ResultCode::DocumentEnd,
        }
    }

    /// Two matches are the same logical match when they sit on the same page
    /// and their first quads have identical coordinates. Used to re-anchor
    /// the active match when a full session reruns over an already
    /// single-searched term.
    pub fn same_logical_match(&self, other: &Match) -> bool {
        self.page_number == other.page_number && self.quads.first() == other.quads.first()
    }
}

/// Which kind of provider session a coordinator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Lightweight navigation search surfacing one match at a time.
    Single,
    /// Streams and retains every match in the document.
    Full,
}

/// Direction for next/previous navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Forward,
    Backward,
}
