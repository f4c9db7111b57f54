//! Building a detector from a newline-delimited leak list.

use crate::index::detector::DlbDetector;
use crate::index::types::NgramRange;
use crate::utils::{ProgressBar, corpus_bar};
use anyhow::{Context, Result};
use memmap2::Mmap;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};

/// How raw corpus lines become passwords
#[derive(Debug, Clone, Copy)]
pub struct CorpusOptions {
    /// Strip leading and trailing whitespace from every line. Off by default
    /// since whitespace is part of a leaked password.
    pub trim_whitespace: bool,
    /// Ignore lines starting with `#`
    pub skip_comments: bool,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self {
            trim_whitespace: false,
            skip_comments: false,
            show_progress: false,
        }
    }
}

/// What a corpus load did to the detector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorpusSummary {
    /// Passwords passed to the detector
    pub passwords: u64,
    /// Blank or comment lines
    pub skipped: u64,
    /// Lines that were not valid UTF-8
    pub invalid_utf8: u64,
    /// Distinct n-grams in the detector after loading
    pub ngrams: usize,
    /// Trie nodes in the detector after loading
    pub nodes: usize,
}

/// Load a leak list from `path` into `detector`.
///
/// The file is memory-mapped and split on `\n`; a trailing `\r` is dropped.
/// Lines that are not UTF-8 are skipped with a warning rather than failing the
/// whole load.
pub fn load_corpus(
    detector: &mut DlbDetector,
    path: &Path,
    range: NgramRange,
    options: CorpusOptions,
) -> Result<CorpusSummary> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open corpus {}", path.display()))?;
    let len = file
        .metadata()
        .with_context(|| format!("Failed to stat corpus {}", path.display()))?
        .len();

    info!(
        corpus = %path.display(),
        bytes = len,
        min_n = range.min_n(),
        max_n = range.max_n(),
        "loading leaked passwords"
    );

    // Mapping an empty file fails on some platforms
    if len == 0 {
        return Ok(summarize(detector, CorpusSummary::default()));
    }

    let mmap = unsafe { Mmap::map(&file) }
        .with_context(|| format!("Failed to map corpus {}", path.display()))?;

    let progress = options.show_progress.then(|| corpus_bar(len));

    let summary = index_lines(detector, &mmap, range, options, progress.as_ref());

    if let Some(pb) = progress {
        pb.finish_with_message(format!("Indexed {} passwords", summary.passwords));
    }

    let summary = summarize(detector, summary);
    info!(
        passwords = summary.passwords,
        skipped = summary.skipped,
        invalid_utf8 = summary.invalid_utf8,
        ngrams = summary.ngrams,
        nodes = summary.nodes,
        "corpus loaded"
    );
    Ok(summary)
}

fn index_lines(
    detector: &mut DlbDetector,
    content: &[u8],
    range: NgramRange,
    options: CorpusOptions,
    progress: Option<&ProgressBar>,
) -> CorpusSummary {
    let mut summary = CorpusSummary::default();
    let mut line_start = 0;
    let mut line_number = 0u64;

    // An unterminated last line still ends at EOF; a final `\n` leaves no extra line
    let tail = content.last().is_some_and(|&b| b != b'\n').then_some(content.len());
    let ends = memchr::memchr_iter(b'\n', content).chain(tail);
    for line_end in ends {
        line_number += 1;
        let raw = &content[line_start..line_end];
        let consumed = ((line_end + 1).min(content.len()) - line_start) as u64;
        line_start = line_end + 1;
        if let Some(pb) = progress {
            pb.inc(consumed);
        }

        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let Ok(line) = std::str::from_utf8(raw) else {
            warn!(line = line_number, "skipping corpus line that is not valid UTF-8");
            summary.invalid_utf8 += 1;
            continue;
        };

        let password = if options.trim_whitespace { line.trim() } else { line };
        if password.is_empty() || (options.skip_comments && password.starts_with('#')) {
            summary.skipped += 1;
        } else {
            detector.add_with_range(password, range);
            summary.passwords += 1;
        }
    }

    debug!(lines = line_number, "corpus scan finished");
    summary
}

fn summarize(detector: &DlbDetector, mut summary: CorpusSummary) -> CorpusSummary {
    summary.ngrams = detector.ngram_count();
    summary.nodes = detector.node_count();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> NgramRange {
        NgramRange::new(3, 3).unwrap()
    }

    #[test]
    fn test_index_lines_handles_crlf_and_blanks() {
        let mut det = DlbDetector::new();
        let options = CorpusOptions {
            trim_whitespace: true,
            ..CorpusOptions::default()
        };
        let summary = index_lines(&mut det, b"abc\r\n\r\n  def  \nghi", range(), options, None);
        assert_eq!(summary.passwords, 3);
        assert_eq!(summary.skipped, 1);
        assert!(det.stats("abc").is_some());
        assert!(det.stats("def").is_some());
        assert!(det.stats("ghi").is_some());
    }

    #[test]
    fn test_index_lines_trailing_newline() {
        let mut det = DlbDetector::new();
        let summary = index_lines(&mut det, b"abc\n", range(), CorpusOptions::default(), None);
        assert_eq!(summary.passwords, 1);
        assert_eq!(summary.skipped, 0);

        let summary = index_lines(&mut det, b"abc\n\ndef\n", range(), CorpusOptions::default(), None);
        assert_eq!(summary.passwords, 2);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_index_lines_empty_content() {
        let mut det = DlbDetector::new();
        let summary = index_lines(&mut det, b"", range(), CorpusOptions::default(), None);
        assert_eq!(summary, CorpusSummary::default());
    }

    #[test]
    fn test_index_lines_keeps_whitespace_by_default() {
        let mut det = DlbDetector::new();
        index_lines(&mut det, b" ab", range(), CorpusOptions::default(), None);
        assert!(det.stats(" ab").is_some());
    }

    #[test]
    fn test_index_lines_comments_and_invalid_utf8() {
        let mut det = DlbDetector::new();
        let options = CorpusOptions {
            skip_comments: true,
            ..CorpusOptions::default()
        };
        let summary = index_lines(&mut det, b"# header\n\xff\xfe\nabc", range(), options, None);
        assert_eq!(summary.passwords, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.invalid_utf8, 1);
    }
}
