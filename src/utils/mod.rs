//! Utility functions and data structures.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration file handling
//! - [`ngram`] - N-gram enumeration with begin/middle/end classification
//! - [`progress`] - Progress bar shim for the optional `progress` feature
//!
//! ```
//! use hotgram::index::NgramRange;
//! use hotgram::utils::ngrams;
//!
//! let chars: Vec<char> = "hello".chars().collect();
//! let range = NgramRange::new(3, 3).unwrap();
//! let grams: Vec<String> = ngrams(&chars, range)
//!     .map(|occ| occ.slice(&chars).iter().collect())
//!     .collect();
//! assert_eq!(grams, ["hel", "ell", "llo"]);
//! ```

pub mod app_data;
pub mod ngram;
pub mod progress;

pub use app_data::*;
pub use ngram::*;
pub use progress::*;
