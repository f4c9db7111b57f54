use crate::error::{HotspotError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Index of a node in the trie arena
pub type NodeId = usize;

/// Corpus-wide statistics kept on a terminal trie node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NgramStats {
    /// Total occurrences across all indexed passwords
    pub freq: u64,
    /// Number of distinct indexed passwords containing the n-gram
    pub doc_freq: u64,
    /// Occurrences starting at the first character of a password
    pub begin_count: u64,
    /// Occurrences touching neither end of a password
    pub middle_count: u64,
    /// Occurrences ending at the last character of a password
    pub end_count: u64,
}

impl NgramStats {
    /// Fold one occurrence into the counters.
    ///
    /// An occurrence spanning the whole password bumps both `begin_count` and
    /// `end_count`.
    #[inline]
    pub fn record(&mut self, position: Position, first_in_password: bool) {
        self.freq += 1;
        if first_in_password {
            self.doc_freq += 1;
        }
        if position.at_begin {
            self.begin_count += 1;
        }
        if position.in_middle() {
            self.middle_count += 1;
        }
        if position.at_end {
            self.end_count += 1;
        }
    }
}

/// Where a substring sits inside the string it was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub at_begin: bool,
    pub at_end: bool,
}

impl Position {
    /// Classify the substring `[start, start + len)` of a string of `total` chars
    #[inline]
    pub fn classify(start: usize, len: usize, total: usize) -> Self {
        Self {
            at_begin: start == 0,
            at_end: start + len == total,
        }
    }

    #[inline]
    pub fn in_middle(&self) -> bool {
        !self.at_begin && !self.at_end
    }
}

/// Inclusive range of n-gram lengths to harvest from a password
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NgramRange {
    min_n: usize,
    max_n: usize,
}

impl NgramRange {
    /// Validate and build a range. Requires `min_n >= 1` and `max_n >= min_n`.
    pub fn new(min_n: usize, max_n: usize) -> Result<Self> {
        if min_n < 1 {
            return Err(HotspotError::invalid_argument(format!(
                "minimum n-gram length must be at least 1, got {}",
                min_n
            )));
        }
        if max_n < min_n {
            return Err(HotspotError::invalid_argument(format!(
                "invalid n-range: max {} is below min {}",
                max_n, min_n
            )));
        }
        Ok(Self { min_n, max_n })
    }

    pub fn min_n(&self) -> usize {
        self.min_n
    }

    pub fn max_n(&self) -> usize {
        self.max_n
    }
}

impl Default for NgramRange {
    fn default() -> Self {
        Self { min_n: 3, max_n: 6 }
    }
}

/// A leaked n-gram found in a candidate password.
///
/// Combines the corpus statistics of the n-gram with where it showed up in the
/// candidate. Two hotspots are equal when their `ngram` text is equal.
#[derive(Debug, Clone, Serialize)]
pub struct Hotspot {
    /// The matched substring
    pub ngram: String,
    pub freq: u64,
    pub doc_freq: u64,
    pub begin_count: u64,
    pub middle_count: u64,
    pub end_count: u64,
    /// True if the n-gram starts the candidate
    pub candidate_at_begin: bool,
    /// Number of occurrences strictly inside the candidate
    pub candidate_middle_count: u64,
    /// True if the n-gram ends the candidate
    pub candidate_at_end: bool,
}

impl Hotspot {
    /// Corpus statistics captured when the hotspot was resolved
    pub fn stats(&self) -> NgramStats {
        NgramStats {
            freq: self.freq,
            doc_freq: self.doc_freq,
            begin_count: self.begin_count,
            middle_count: self.middle_count,
            end_count: self.end_count,
        }
    }
}

impl PartialEq for Hotspot {
    fn eq(&self, other: &Self) -> bool {
        self.ngram == other.ngram
    }
}

impl Eq for Hotspot {}

impl Hash for Hotspot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ngram.hash(state);
    }
}

impl fmt::Display for Hotspot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (freq={}, docFreq={}, begin={}, middle={}, end={}, candBegin={}, candMiddleCount={}, candEnd={})",
            self.ngram,
            self.freq,
            self.doc_freq,
            self.begin_count,
            self.middle_count,
            self.end_count,
            self.candidate_at_begin,
            self.candidate_middle_count,
            self.candidate_at_end
        )
    }
}
