use std::ops::Range;

/// One replacement applied to a mirror string, used to keep tracked ranges
/// in step with it.
///
/// Bounds before the edit are unchanged, bounds after it shift by the length
/// delta, and bounds inside it collapse onto the inserted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    range: Range<usize>,
    inserted_len: usize,
}

impl Edit {
    pub fn new(range: Range<usize>, inserted_len: usize) -> Self {
        Self {
            range,
            inserted_len,
        }
    }

    pub fn removal(range: Range<usize>) -> Self {
        Self::new(range, 0)
    }

    fn shifted(&self, offset: usize) -> usize {
        offset - self.range.len() + self.inserted_len
    }

    /// Maps the start bound of a tracked range.
    pub fn map_start(&self, offset: usize) -> usize {
        if offset < self.range.start {
            offset
        } else if offset >= self.range.end {
            self.shifted(offset)
        } else {
            self.range.start
        }
    }

    /// Maps the (exclusive) end bound of a tracked range.
    pub fn map_end(&self, offset: usize) -> usize {
        if offset <= self.range.start {
            offset
        } else if offset >= self.range.end {
            self.shifted(offset)
        } else {
            self.range.start + self.inserted_len
        }
    }

    pub fn apply(&self, range: &mut Range<usize>) {
        let start = self.map_start(range.start);
        let end = self.map_end(range.end);
        *range = start..end.max(start);
    }
}
