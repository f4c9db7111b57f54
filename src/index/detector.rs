//! Leaked-password hotspot detection.
//!
//! [`DlbDetector`] indexes every n-gram of each leaked password into a
//! first-child / next-sibling [`Trie`] and later reports which indexed n-grams
//! show up in a candidate password.
//!
//! The detector is not synchronized. Indexing needs `&mut self`, so sharing it
//! across threads takes an external lock (e.g. `RwLock<DlbDetector>`).

use crate::error::{HotspotError, Result};
use crate::index::trie::Trie;
use crate::index::types::{Hotspot, NgramRange, NgramStats, Position};
use crate::utils::ngrams;
use rustc_hash::{FxHashMap, FxHashSet};

/// The two operations of a hotspot index.
///
/// Strings are taken as `Into<Option<&str>>` so that plain `&str` works and an
/// absent value (`None`) is rejected with [`HotspotError::InvalidArgument`].
pub trait HotspotDetector {
    /// Index every substring of `password` whose length is in `[min_n, max_n]`.
    ///
    /// Fails without touching the index if `password` is absent, `min_n < 1`
    /// or `max_n < min_n`. An empty password is a no-op.
    fn add_leaked_password<'a, P>(&mut self, password: P, min_n: usize, max_n: usize) -> Result<()>
    where
        P: Into<Option<&'a str>>;

    /// Find the indexed n-grams occurring in `candidate`.
    ///
    /// Each distinct n-gram is reported once, in the order it was first
    /// matched, with its candidate positions merged across all occurrences.
    fn hotspots_in<'a, C>(&self, candidate: C) -> Result<Vec<Hotspot>>
    where
        C: Into<Option<&'a str>>;
}

/// Candidate-side aggregation for one n-gram during a single lookup
#[derive(Debug)]
struct CandidateTally {
    ngram: String,
    corpus: NgramStats,
    at_begin: bool,
    middle_count: u64,
    at_end: bool,
}

impl CandidateTally {
    fn new(ngram: String, corpus: NgramStats) -> Self {
        Self {
            ngram,
            corpus,
            at_begin: false,
            middle_count: 0,
            at_end: false,
        }
    }

    fn observe(&mut self, position: Position) {
        self.at_begin |= position.at_begin;
        self.at_end |= position.at_end;
        if position.in_middle() {
            self.middle_count += 1;
        }
    }

    fn into_hotspot(self) -> Hotspot {
        Hotspot {
            ngram: self.ngram,
            freq: self.corpus.freq,
            doc_freq: self.corpus.doc_freq,
            begin_count: self.corpus.begin_count,
            middle_count: self.corpus.middle_count,
            end_count: self.corpus.end_count,
            candidate_at_begin: self.at_begin,
            candidate_middle_count: self.middle_count,
            candidate_at_end: self.at_end,
        }
    }
}

/// Tallies in first-seen order, keyed by n-gram text
#[derive(Debug, Default)]
struct QueryTallies {
    order: Vec<CandidateTally>,
    by_ngram: FxHashMap<String, usize>,
}

impl QueryTallies {
    fn observe(&mut self, ngram: &[char], corpus: &NgramStats, position: Position) {
        let text: String = ngram.iter().collect();
        let idx = match self.by_ngram.get(&text) {
            Some(&idx) => idx,
            None => {
                let idx = self.order.len();
                self.order.push(CandidateTally::new(text.clone(), *corpus));
                self.by_ngram.insert(text, idx);
                idx
            }
        };
        self.order[idx].observe(position);
    }

    fn into_hotspots(self) -> Vec<Hotspot> {
        self.order
            .into_iter()
            .map(CandidateTally::into_hotspot)
            .collect()
    }
}

/// Hotspot detector backed by a first-child / next-sibling trie
#[derive(Debug, Clone, Default)]
pub struct DlbDetector {
    trie: Trie,
    passwords: u64,
}

impl DlbDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a password over an already validated range
    pub fn add_with_range(&mut self, password: &str, range: NgramRange) {
        let chars: Vec<char> = password.chars().collect();
        let mut seen: FxHashSet<&[char]> = FxHashSet::default();

        for occ in ngrams(&chars, range) {
            let ngram = occ.slice(&chars);
            let first_in_password = seen.insert(ngram);
            if let Some(stats) = self.trie.insert(ngram) {
                stats.record(occ.position, first_in_password);
            }
        }
        self.passwords += 1;
    }

    /// Corpus statistics for `ngram` if it has been indexed
    pub fn stats(&self, ngram: &str) -> Option<&NgramStats> {
        self.trie.get(ngram)
    }

    /// Number of distinct n-grams in the index
    pub fn ngram_count(&self) -> usize {
        self.trie.ngram_count()
    }

    /// Number of trie nodes allocated so far
    pub fn node_count(&self) -> usize {
        self.trie.node_count()
    }

    /// Number of passwords passed to the indexing operation
    pub fn passwords_indexed(&self) -> u64 {
        self.passwords
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Lookup over a present candidate
    fn scan(&self, candidate: &str) -> Vec<Hotspot> {
        let chars: Vec<char> = candidate.chars().collect();
        let total = chars.len();
        let mut tallies = QueryTallies::default();

        for start in 0..total {
            let mut head = self.trie.root();
            for end in start..total {
                let Some(id) = self.trie.find_in_chain(head, chars[end]) else {
                    break;
                };
                let node = self.trie.node(id);
                if let Some(corpus) = node.stats() {
                    let len = end + 1 - start;
                    let position = Position::classify(start, len, total);
                    tallies.observe(&chars[start..=end], corpus, position);
                }
                head = node.child;
            }
        }

        tallies.into_hotspots()
    }
}

impl HotspotDetector for DlbDetector {
    fn add_leaked_password<'a, P>(&mut self, password: P, min_n: usize, max_n: usize) -> Result<()>
    where
        P: Into<Option<&'a str>>,
    {
        let password = password
            .into()
            .ok_or_else(|| HotspotError::invalid_argument("null leaked password"))?;
        let range = NgramRange::new(min_n, max_n)?;
        self.add_with_range(password, range);
        Ok(())
    }

    fn hotspots_in<'a, C>(&self, candidate: C) -> Result<Vec<Hotspot>>
    where
        C: Into<Option<&'a str>>,
    {
        let candidate = candidate
            .into()
            .ok_or_else(|| HotspotError::invalid_argument("null candidate password"))?;
        Ok(self.scan(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(hotspots: &'a [Hotspot], ngram: &str) -> Option<&'a Hotspot> {
        hotspots.iter().find(|h| h.ngram == ngram)
    }

    #[test]
    fn test_add_counts_every_ngram() {
        let mut det = DlbDetector::new();
        det.add_leaked_password("abcd", 2, 3).unwrap();

        for ngram in ["ab", "bc", "cd", "abc", "bcd"] {
            assert_eq!(det.stats(ngram).unwrap().freq, 1, "{}", ngram);
        }
        assert!(det.stats("a").is_none());
        assert!(det.stats("abcd").is_none());
        assert_eq!(det.ngram_count(), 5);
    }

    #[test]
    fn test_positions_during_indexing() {
        let mut det = DlbDetector::new();
        det.add_leaked_password("abcde", 3, 3).unwrap();

        let abc = det.stats("abc").unwrap();
        assert_eq!((abc.begin_count, abc.middle_count, abc.end_count), (1, 0, 0));
        let bcd = det.stats("bcd").unwrap();
        assert_eq!((bcd.begin_count, bcd.middle_count, bcd.end_count), (0, 1, 0));
        let cde = det.stats("cde").unwrap();
        assert_eq!((cde.begin_count, cde.middle_count, cde.end_count), (0, 0, 1));
    }

    #[test]
    fn test_whole_password_counts_begin_and_end() {
        let mut det = DlbDetector::new();
        det.add_leaked_password("abc", 3, 3).unwrap();
        let s = det.stats("abc").unwrap();
        assert_eq!(s.begin_count, 1);
        assert_eq!(s.end_count, 1);
        assert_eq!(s.middle_count, 0);
    }

    #[test]
    fn test_doc_freq_once_per_password() {
        let mut det = DlbDetector::new();
        det.add_leaked_password("123123", 3, 3).unwrap();
        let s = det.stats("123").unwrap();
        assert_eq!(s.freq, 2);
        assert_eq!(s.doc_freq, 1);
        assert_eq!(s.begin_count, 1);
        assert_eq!(s.end_count, 1);

        det.add_leaked_password("123123", 3, 3).unwrap();
        let s = det.stats("123").unwrap();
        assert_eq!(s.freq, 4);
        assert_eq!(s.doc_freq, 2);
    }

    #[test]
    fn test_invalid_arguments_leave_index_untouched() {
        let mut det = DlbDetector::new();
        assert!(det.add_leaked_password(None, 3, 6).is_err());
        assert!(det.add_leaked_password("x", 0, 3).is_err());
        assert!(det.add_leaked_password("xyz", 5, 3).is_err());
        assert!(det.is_empty());
        assert_eq!(det.passwords_indexed(), 0);
        assert!(det.hotspots_in(None).is_err());
    }

    #[test]
    fn test_empty_password_is_noop() {
        let mut det = DlbDetector::new();
        det.add_leaked_password("", 1, 3).unwrap();
        assert!(det.is_empty());
        assert_eq!(det.passwords_indexed(), 1);
    }

    #[test]
    fn test_lookup_on_empty_index() {
        let det = DlbDetector::new();
        assert!(det.hotspots_in("anything").unwrap().is_empty());
        assert!(det.hotspots_in("").unwrap().is_empty());
    }

    #[test]
    fn test_lookup_finds_nested_ngrams() {
        let mut det = DlbDetector::new();
        det.add_leaked_password("pass", 2, 4).unwrap();

        let hotspots = det.hotspots_in("xpassx").unwrap();
        for ngram in ["pa", "pas", "pass", "as", "ass", "ss"] {
            let h = find(&hotspots, ngram).unwrap();
            assert_eq!(h.candidate_middle_count, 1, "{}", ngram);
            assert!(!h.candidate_at_begin);
            assert!(!h.candidate_at_end);
        }
        assert_eq!(hotspots.len(), 6);
    }

    #[test]
    fn test_lookup_skips_non_terminal_paths() {
        let mut det = DlbDetector::new();
        det.add_leaked_password("abcd", 4, 4).unwrap();
        // "abc" exists as a path only
        assert!(det.hotspots_in("abc").unwrap().is_empty());
        assert_eq!(det.hotspots_in("abcd").unwrap().len(), 1);
    }

    #[test]
    fn test_lookup_merges_repeated_occurrences() {
        let mut det = DlbDetector::new();
        det.add_leaked_password("ab", 2, 2).unwrap();

        let hotspots = det.hotspots_in("abxabyabzab").unwrap();
        assert_eq!(hotspots.len(), 1);
        let h = &hotspots[0];
        assert!(h.candidate_at_begin);
        assert!(h.candidate_at_end);
        assert_eq!(h.candidate_middle_count, 2);
        assert_eq!(h.freq, 1);
    }

    #[test]
    fn test_lookup_first_seen_order() {
        let mut det = DlbDetector::new();
        det.add_leaked_password("zzz", 3, 3).unwrap();
        det.add_leaked_password("aaa", 3, 3).unwrap();

        let hotspots = det.hotspots_in("zzz-aaa").unwrap();
        let order: Vec<_> = hotspots.iter().map(|h| h.ngram.as_str()).collect();
        assert_eq!(order, vec!["zzz", "aaa"]);
    }

    #[test]
    fn test_lookup_snapshots_stats() {
        let mut det = DlbDetector::new();
        det.add_leaked_password("qwerty", 3, 3).unwrap();
        let before = det.hotspots_in("qwe").unwrap();
        det.add_leaked_password("qwerty", 3, 3).unwrap();

        assert_eq!(before[0].freq, 1);
        let after = det.hotspots_in("qwe").unwrap();
        assert_eq!(after[0].freq, 2);
        assert_eq!(after[0].stats(), *det.stats("qwe").unwrap());
    }

    #[test]
    fn test_unicode_chars() {
        let mut det = DlbDetector::new();
        det.add_leaked_password("pässwörd", 3, 3).unwrap();
        let hotspots = det.hotspots_in("wörd").unwrap();
        let h = find(&hotspots, "örd").unwrap();
        assert!(h.candidate_at_end);
        assert!(find(&hotspots, "wör").unwrap().candidate_at_begin);
    }
}
