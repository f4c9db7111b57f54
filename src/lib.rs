//! # hotgram - Leaked-password hotspot detection
//!
//! hotgram indexes the substrings ("n-grams") of known-leaked passwords and,
//! given a candidate password, reports which of those substrings occur in it.
//! Substrings that are common in leaks and present in a candidate are signals
//! of weakness for password-strength heuristics.
//!
//! ## Architecture
//!
//! - [`index`] - The first-child / next-sibling trie, the detector built on it,
//!   and corpus loading
//! - [`output`] - Text and JSON rendering of hotspot reports
//! - [`utils`] - N-gram enumeration, configuration, progress display
//! - [`error`] - The library error type
//!
//! ## Quick Start
//!
//! ```
//! use hotgram::index::{DlbDetector, HotspotDetector};
//!
//! let mut detector = DlbDetector::new();
//! detector.add_leaked_password("password123", 3, 6).unwrap();
//! detector.add_leaked_password("admin123", 3, 6).unwrap();
//!
//! let hotspots = detector.hotspots_in("mypass123").unwrap();
//! let h = hotspots.iter().find(|h| h.ngram == "123").unwrap();
//! assert_eq!(h.doc_freq, 2);
//! assert!(h.candidate_at_end);
//! ```
//!
//! ## Statistics
//!
//! Every indexed n-gram carries its total frequency, the number of distinct
//! passwords it appeared in, and how often it sat at the beginning, middle or
//! end of a password. Lookups add where the n-gram sits in the candidate.

pub mod error;
pub mod index;
pub mod output;
pub mod utils;

pub use error::{HotspotError, Result};
pub use index::{DlbDetector, Hotspot, HotspotDetector};
