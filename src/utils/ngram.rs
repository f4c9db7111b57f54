use crate::index::types::{NgramRange, Position};

/// One n-gram occurrence inside a password, addressed in chars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NgramOccurrence {
    pub start: usize,
    pub len: usize,
    pub position: Position,
}

impl NgramOccurrence {
    /// Slice the occurrence out of the chars it was extracted from
    #[inline]
    pub fn slice<'a>(&self, chars: &'a [char]) -> &'a [char] {
        &chars[self.start..self.start + self.len]
    }
}

/// Iterator over every n-gram occurrence of a char sequence.
///
/// Yields all lengths in the range, shortest first, and for each length every
/// start offset left to right. Lengths longer than the input yield nothing.
pub struct Ngrams {
    total: usize,
    len: usize,
    max_n: usize,
    start: usize,
}

impl Iterator for Ngrams {
    type Item = NgramOccurrence;

    fn next(&mut self) -> Option<NgramOccurrence> {
        while self.len <= self.max_n && self.len <= self.total {
            if self.start + self.len <= self.total {
                let start = self.start;
                self.start += 1;
                return Some(NgramOccurrence {
                    start,
                    len: self.len,
                    position: Position::classify(start, self.len, self.total),
                });
            }
            self.len += 1;
            self.start = 0;
        }
        None
    }
}

/// Enumerate the n-gram occurrences of `chars` for every length in `range`
pub fn ngrams(chars: &[char], range: NgramRange) -> Ngrams {
    Ngrams {
        total: chars.len(),
        len: range.min_n(),
        max_n: range.max_n(),
        start: 0,
    }
}
