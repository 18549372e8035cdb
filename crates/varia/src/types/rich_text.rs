use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::Text;

/// A formatting attribute attached to a span of rich text (e.g. `bold`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Attribute(String);

impl Attribute {
    /// Create a new attribute from any string-like value.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the attribute as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for Attribute {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for Attribute {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// A run of text sharing one attribute set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub len: usize,
    pub attributes: BTreeSet<Attribute>,
}

/// Text with formatting attributes.
///
/// Attributes are stored as runs covering the whole text. Runs never have
/// zero length and adjacent runs never carry equal attribute sets.
///
/// # Example
///
/// ```
/// use varia::{Attribute, RichText, Text};
///
/// let mut text = RichText::from("Hello world");
/// text.add_attribute(6..11, Attribute::new("bold"));
///
/// let word = text.slice_range(6..11);
/// assert_eq!(word.as_str(), "world");
/// assert!(word.attributes_at(0).contains(&Attribute::new("bold")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText {
    text: String,
    runs: Vec<Run>,
}

impl RichText {
    /// Plain text with no attributes.
    pub fn new(text: impl Into<String>) -> Self {
        Self::styled(text, BTreeSet::new())
    }

    /// Text carrying `attributes` over its whole length.
    pub fn styled(text: impl Into<String>, attributes: BTreeSet<Attribute>) -> Self {
        let text = text.into();
        let runs = if text.is_empty() {
            Vec::new()
        } else {
            vec![Run {
                len: text.len(),
                attributes,
            }]
        };
        Self { text, runs }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Runs paired with the byte range each covers.
    pub fn spans(&self) -> Vec<(Range<usize>, &BTreeSet<Attribute>)> {
        let mut start = 0;
        self.runs
            .iter()
            .map(|run| {
                let range = start..start + run.len;
                start = range.end;
                (range, &run.attributes)
            })
            .collect()
    }

    /// Attributes of the character starting at `offset`.
    ///
    /// At the end of the text this is the last run's attributes.
    pub fn attributes_at(&self, offset: usize) -> BTreeSet<Attribute> {
        let mut start = 0;
        for run in &self.runs {
            if offset < start + run.len {
                return run.attributes.clone();
            }
            start += run.len;
        }
        self.runs
            .last()
            .map(|run| run.attributes.clone())
            .unwrap_or_default()
    }

    pub fn add_attribute(&mut self, range: Range<usize>, attribute: Attribute) {
        self.update_attributes(range, |attributes| {
            attributes.insert(attribute.clone());
        });
    }

    pub fn remove_attribute(&mut self, range: Range<usize>, attribute: &Attribute) {
        self.update_attributes(range, |attributes| {
            attributes.remove(attribute);
        });
    }

    /// Appends `other`, keeping its attributes.
    pub fn push(&mut self, other: &RichText) {
        self.text.push_str(&other.text);
        self.runs.extend(other.runs.iter().cloned());
        self.normalize();
    }

    fn update_attributes(&mut self, range: Range<usize>, f: impl Fn(&mut BTreeSet<Attribute>)) {
        if range.is_empty() {
            return;
        }
        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        for run in &mut self.runs[first..last] {
            f(&mut run.attributes);
        }
        self.normalize();
    }

    /// Ensures a run boundary at `offset`, returning the index of the run
    /// starting there.
    fn split_at(&mut self, offset: usize) -> usize {
        let mut start = 0;
        for index in 0..self.runs.len() {
            let len = self.runs[index].len;
            if offset == start {
                return index;
            }
            if offset < start + len {
                let head = offset - start;
                let tail = Run {
                    len: len - head,
                    attributes: self.runs[index].attributes.clone(),
                };
                self.runs[index].len = head;
                self.runs.insert(index + 1, tail);
                return index + 1;
            }
            start += len;
        }
        self.runs.len()
    }

    fn normalize(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.len == 0 {
                continue;
            }
            match merged.last_mut() {
                Some(prev) if prev.attributes == run.attributes => prev.len += run.len,
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

impl Text for RichText {
    fn plain_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn text_len(&self) -> usize {
        self.text.len()
    }

    fn slice_range(&self, range: Range<usize>) -> Self {
        let mut runs = Vec::new();
        let mut start = 0;
        for run in &self.runs {
            let end = start + run.len;
            let low = start.max(range.start);
            let high = end.min(range.end);
            if low < high {
                runs.push(Run {
                    len: high - low,
                    attributes: run.attributes.clone(),
                });
            }
            start = end;
        }
        let mut sliced = RichText {
            text: self.text[range].to_string(),
            runs,
        };
        sliced.normalize();
        sliced
    }

    fn delete_range(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        self.runs.drain(first..last);
        self.text.replace_range(range, "");
        self.normalize();
    }

    /// Inserted text keeps its own attributes and also takes on those active
    /// at the start of the replaced span.
    fn splice_range(&mut self, range: Range<usize>, with: &Self) -> String {
        let inherited = if range.is_empty() && range.start > 0 {
            self.attributes_at(range.start - 1)
        } else {
            self.attributes_at(range.start)
        };
        self.delete_range(range.clone());
        let at = self.split_at(range.start);
        let inserted = with.runs.iter().map(|run| Run {
            len: run.len,
            attributes: run.attributes.union(&inherited).cloned().collect(),
        });
        self.runs.splice(at..at, inserted);
        self.text.insert_str(range.start, &with.text);
        self.normalize();
        with.text.clone()
    }
}

impl From<String> for RichText {
    fn from(text: String) -> Self {
        RichText::new(text)
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        RichText::new(text)
    }
}

impl Display for RichText {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.text)
    }
}
