//! Byte-level progress for corpus loading.
//!
//! With the `progress` feature this is indicatif; without it the same calls
//! compile to nothing so `index::build` never has to branch on the feature.

#[cfg(feature = "progress")]
pub use indicatif::{ProgressBar, ProgressStyle};

#[cfg(not(feature = "progress"))]
pub use self::noop::*;

const CORPUS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}";

/// Bar sized to a corpus file, advanced by the bytes each line consumes
pub fn corpus_bar(total_bytes: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_bytes);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(CORPUS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░  "),
    );
    pb.set_message("Indexing leaks...");
    pb
}

#[cfg(not(feature = "progress"))]
mod noop {
    use std::borrow::Cow;

    /// Stand-in for `indicatif::ProgressBar`; only the calls the loader makes
    #[derive(Clone)]
    pub struct ProgressBar;

    impl ProgressBar {
        pub fn new(_len: u64) -> Self {
            ProgressBar
        }

        pub fn set_style(&self, _style: ProgressStyle) {}
        pub fn set_message(&self, _msg: impl Into<Cow<'static, str>>) {}
        pub fn inc(&self, _delta: u64) {}
        pub fn finish_with_message(&self, _msg: impl Into<Cow<'static, str>>) {}
    }

    pub struct ProgressStyle;

    impl ProgressStyle {
        pub fn default_bar() -> Self {
            ProgressStyle
        }

        pub fn template(self, _template: &str) -> Result<Self, std::convert::Infallible> {
            Ok(self)
        }

        pub fn progress_chars(self, _chars: &str) -> Self {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_template_parses() {
        assert!(ProgressStyle::default_bar().template(CORPUS_TEMPLATE).is_ok());
    }

    #[test]
    fn test_corpus_bar_accepts_loader_calls() {
        let pb = corpus_bar(10);
        pb.inc(4);
        pb.inc(6);
        pb.finish_with_message(format!("Indexed {} passwords", 2));
    }
}
