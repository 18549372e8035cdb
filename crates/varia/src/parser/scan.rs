//! Delimiter discovery over the plain-text mirror.

use std::ops::Range;

/// Finds unescaped delimiter occurrences in a string.
///
/// An occurrence is escaped when it is immediately preceded by an odd number
/// of consecutive escape tokens.
pub(crate) struct Scanner<'a> {
    text: &'a str,
    escape: Option<&'a str>,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str, escape: Option<&'a str>) -> Self {
        Self {
            text,
            escape: escape.filter(|e| !e.is_empty()),
        }
    }

    pub fn is_escaped(&self, offset: usize) -> bool {
        let Some(escape) = self.escape else {
            return false;
        };
        let mut count = 0;
        let mut end = offset;
        while end >= escape.len() && self.text.get(end - escape.len()..end) == Some(escape) {
            count += 1;
            end -= escape.len();
        }
        count % 2 == 1
    }

    /// Next unescaped occurrence of `needle` lying within `from..to`.
    pub fn find(&self, needle: &str, from: usize, to: usize) -> Option<usize> {
        let mut pos = from;
        while pos < to {
            let found = pos + self.text.get(pos..to)?.find(needle)?;
            if !self.is_escaped(found) {
                return Some(found);
            }
            pos = found + needle.len();
        }
        None
    }

    /// Container ranges for one token, plus offsets of unterminated left
    /// delimiters.
    ///
    /// Distinct delimiters nest: an inner left delimiter must be closed
    /// before the outer one, and inner regions are reported too. Identical
    /// delimiters pair up left to right.
    pub fn containers(&self, left: &str, right: &str) -> (Vec<Range<usize>>, Vec<usize>) {
        let mut found = Vec::new();
        let mut unterminated = Vec::new();
        let mut pos = 0;
        while let Some(open) = self.find(left, pos, self.text.len()) {
            let content_start = open + left.len();
            match self.find_close(left, right, content_start) {
                Some(close) => {
                    found.push(open..close + right.len());
                    pos = if left == right {
                        close + right.len()
                    } else {
                        content_start
                    };
                }
                None => {
                    unterminated.push(open);
                    pos = content_start;
                }
            }
        }
        (found, unterminated)
    }

    fn find_close(&self, left: &str, right: &str, from: usize) -> Option<usize> {
        if left == right {
            return self.find(right, from, self.text.len());
        }
        let mut depth = 0usize;
        let mut cursor = from;
        loop {
            let close = self.find(right, cursor, self.text.len())?;
            match self.find(left, cursor, close) {
                Some(open) => {
                    depth += 1;
                    cursor = open + left.len();
                }
                None if depth == 0 => return Some(close),
                None => {
                    depth -= 1;
                    cursor = close + right.len();
                }
            }
        }
    }

    /// Split `content` on unescaped `interior` delimiters, ignoring those
    /// inside any of the `nested` containers.
    pub fn split(
        &self,
        interior: &str,
        content: Range<usize>,
        nested: &[Range<usize>],
    ) -> Vec<Range<usize>> {
        let mut branches = Vec::new();
        let mut start = content.start;
        let mut pos = content.start;
        while let Some(at) = self.find(interior, pos, content.end) {
            if let Some(inner) = nested.iter().find(|r| r.start <= at && at < r.end) {
                pos = inner.end.max(at + interior.len());
                continue;
            }
            branches.push(start..at);
            start = at + interior.len();
            pos = start;
        }
        branches.push(start..content.end);
        branches
    }

    /// A `label<separator>` prefix of `branch`, with the offset where the
    /// branch content begins after it.
    ///
    /// Labels are non-empty, contain no whitespace, and never reach into a
    /// nested container.
    pub fn label(
        &self,
        separator: &str,
        branch: Range<usize>,
        nested: &[Range<usize>],
    ) -> Option<(String, usize)> {
        let at = self.find(separator, branch.start, branch.end)?;
        let label = &self.text[branch.start..at];
        if label.is_empty() || label.chars().any(char::is_whitespace) {
            return None;
        }
        if nested.iter().any(|r| r.start < at && r.end > branch.start) {
            return None;
        }
        Some((label.to_string(), at + separator.len()))
    }
}
