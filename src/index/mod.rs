pub mod build;
pub mod detector;
pub mod trie;
pub mod types;

pub use detector::{DlbDetector, HotspotDetector};
pub use types::*;
