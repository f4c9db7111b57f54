#![no_main]

use arbitrary::Arbitrary;
use hotgram::index::{DlbDetector, HotspotDetector};
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;

#[derive(Debug, Arbitrary)]
struct Input {
    leaks: Vec<String>,
    min_n: u8,
    max_n: u8,
    candidate: String,
}

fuzz_target!(|input: Input| {
    // Indexing and lookup must never panic, and lookups never repeat an n-gram
    let mut det = DlbDetector::new();
    for leak in input.leaks.iter().take(64) {
        let _ = det.add_leaked_password(leak.as_str(), input.min_n as usize, input.max_n as usize % 16);
    }

    let hotspots = det.hotspots_in(input.candidate.as_str()).unwrap();
    let mut seen = HashSet::new();
    for h in &hotspots {
        assert!(seen.insert(h.ngram.as_str()));
        assert!(input.candidate.contains(h.ngram.as_str()));
        assert!(h.doc_freq <= h.freq);
    }
});
