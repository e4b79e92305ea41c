//! Search mode encoding
//!
//! Translates the user's boolean search options into the provider's integer
//! bitmask. The bit values themselves are a fixed vocabulary owned by the
//! provider; nothing outside this module does bit arithmetic on them.

use serde::{Deserialize, Serialize};

use crate::types::SearchOptions;

/// The provider's named search-mode bit constants.
///
/// Obtained from [`SearchProvider::mode_flags`](crate::provider::SearchProvider::mode_flags);
/// the [`Default`] vocabulary assigns one distinct bit per flag and is what
/// in-process providers typically return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchModeFlags {
    pub case_sensitive: u32,
    pub whole_word: u32,
    pub wild_card: u32,
    pub regex: u32,
    pub page_stop: u32,
    pub highlight: u32,
    pub search_up: u32,
    pub ambient_string: u32,
}

impl Default for SearchModeFlags {
    fn default() -> Self {
        Self {
            case_sensitive: 0x01,
            whole_word: 0x02,
            wild_card: 0x04,
            regex: 0x08,
            page_stop: 0x10,
            highlight: 0x20,
            search_up: 0x40,
            ambient_string: 0x80,
        }
    }
}

/// Opaque encoded search mode handed to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMode(u32);

impl SearchMode {
    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, flag: u32) -> bool {
        self.0 & flag == flag
    }
}

/// Encode options into the provider's bitmask.
///
/// Pure and deterministic: page-stop and highlight are always set;
/// case-sensitive, whole-word, wildcard and regex follow their options;
/// search-up is honored only for single sessions; ambient-string is forced
/// on for full sessions.
pub fn encode(options: &SearchOptions, is_full_search: bool, flags: &SearchModeFlags) -> SearchMode {
    let mut mode = flags.page_stop | flags.highlight;

    if options.case_sensitive {
        mode |= flags.case_sensitive;
    }
    if options.whole_word {
        mode |= flags.whole_word;
    }
    if options.wildcard {
        mode |= flags.wild_card;
    }
    if options.regex {
        mode |= flags.regex;
    }
    if options.search_up && !is_full_search {
        mode |= flags.search_up;
    }
    if options.ambient_string || is_full_search {
        mode |= flags.ambient_string;
    }

    SearchMode(mode)
}
