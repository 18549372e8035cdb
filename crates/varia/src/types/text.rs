use std::borrow::Cow;
use std::ops::Range;

/// A text representation the parser and resolver can operate on.
///
/// Ranges are byte offsets into [`Text::plain_text`] and always fall on
/// `char` boundaries. The engine only touches values through this trait, so
/// plain strings and [`RichText`](super::RichText) are interchangeable.
pub trait Text: Clone {
    /// The plain-text form used for all index math.
    fn plain_text(&self) -> Cow<'_, str>;

    /// Length of the plain-text form in bytes.
    fn text_len(&self) -> usize {
        self.plain_text().len()
    }

    /// A copy of the value restricted to `range`.
    fn slice_range(&self, range: Range<usize>) -> Self;

    /// Removes `range` from the value.
    fn delete_range(&mut self, range: Range<usize>);

    /// Replaces `range` with `with`, returning the inserted plain text.
    fn splice_range(&mut self, range: Range<usize>, with: &Self) -> String;
}

impl Text for String {
    fn plain_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    fn text_len(&self) -> usize {
        self.len()
    }

    fn slice_range(&self, range: Range<usize>) -> Self {
        self[range].to_string()
    }

    fn delete_range(&mut self, range: Range<usize>) {
        self.replace_range(range, "");
    }

    fn splice_range(&mut self, range: Range<usize>, with: &Self) -> String {
        self.replace_range(range, with);
        with.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_slice_and_splice() {
        let mut s = String::from("héllo world");
        assert_eq!(s.slice_range(0..6), "héllo");
        let inserted = s.splice_range(7..12, &"there".to_string());
        assert_eq!(inserted, "there");
        assert_eq!(s, "héllo there");
        s.delete_range(0..7);
        assert_eq!(s, "there");
        assert_eq!(s.text_len(), 5);
    }
}
