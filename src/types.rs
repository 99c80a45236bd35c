//! Core types used throughout the project.

/// A half-open byte range (`start..end`) within a document's source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteSpan {
    pub start: usize,
    pub end: usize,
}

impl ByteSpan {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn from_node(node: &tree_sitter::Node<'_>) -> Self {
        Self { start: node.start_byte(), end: node.end_byte() }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Checks if `other` lies entirely within this span.
    #[must_use]
    pub const fn contains(&self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The text this span covers, or `None` if it falls outside `source`
    /// or off a character boundary.
    #[must_use]
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

/// A range in source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

/// A position in source code (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: u32,
    pub character: u32,
}

impl From<tree_sitter::Point> for SourcePosition {
    #[allow(clippy::cast_possible_truncation)]
    fn from(point: tree_sitter::Point) -> Self {
        Self { line: point.row as u32, character: point.column as u32 }
    }
}

impl SourceRange {
    #[must_use]
    pub fn from_node(node: &tree_sitter::Node<'_>) -> Self {
        Self { start: node.start_position().into(), end: node.end_position().into() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    const fn span(start: usize, end: usize) -> ByteSpan {
        ByteSpan::new(start, end)
    }

    #[rstest]
    #[case::identical(span(2, 8), span(2, 8), true)]
    #[case::strictly_inside(span(2, 8), span(3, 7), true)]
    #[case::shares_start(span(2, 8), span(2, 5), true)]
    #[case::shares_end(span(2, 8), span(5, 8), true)]
    #[case::overlaps_left(span(2, 8), span(1, 5), false)]
    #[case::overlaps_right(span(2, 8), span(5, 9), false)]
    #[case::disjoint(span(2, 8), span(9, 12), false)]
    fn test_contains(#[case] outer: ByteSpan, #[case] inner: ByteSpan, #[case] expected: bool) {
        assert_that!(outer.contains(inner), eq(expected));
    }

    #[rstest]
    #[case::whole(span(0, 5), "hello", Some("hello"))]
    #[case::middle(span(1, 4), "hello", Some("ell"))]
    #[case::empty(span(3, 3), "hello", Some(""))]
    #[case::past_end(span(3, 9), "hello", None)]
    fn test_slice(#[case] span: ByteSpan, #[case] source: &str, #[case] expected: Option<&str>) {
        assert_that!(span.slice(source), eq(expected));
    }

    #[test]
    fn test_slice_rejects_mid_character_boundaries() {
        // ホ is three bytes; a span ending inside it cannot be sliced.
        assert_that!(span(0, 1).slice("ホーム"), none());
        assert_that!(span(0, 3).slice("ホーム"), some(eq("ホ")));
    }

    #[test]
    fn test_len_and_is_empty() {
        assert_that!(span(2, 8).len(), eq(6));
        assert_that!(span(2, 8).is_empty(), eq(false));
        assert_that!(span(4, 4).is_empty(), eq(true));
    }
}
