//! Pure re-render: splice translated texts over spans of the loaded
//! markup.

use crate::markup::{
    AttrSlot,
    escape_attr,
};
use crate::types::ByteSpan;

/// One pending replacement in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Edit {
    pub(super) span: ByteSpan,
    pub(super) text: String,
}

/// How a managed attribute is written for the target language code.
pub(super) fn attr_edit(slot: AttrSlot, name: &str, lang: &str) -> Edit {
    match slot {
        AttrSlot::Value(span) => Edit { span, text: escape_attr(lang) },
        AttrSlot::InsertValue(offset) => Edit {
            span: ByteSpan::new(offset, offset),
            text: format!("=\"{}\"", escape_attr(lang)),
        },
        AttrSlot::InsertAttribute(offset) => Edit {
            span: ByteSpan::new(offset, offset),
            text: format!(" {name}=\"{}\"", escape_attr(lang)),
        },
    }
}

/// Rebuild the document by applying `edits` over `source`.
///
/// Always renders from the untouched original, so applying the same
/// edits again yields the same output. Spans come from the registration
/// scan of this same text; an edit overlapping one already written is
/// dropped.
pub(super) fn splice(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|edit| (edit.span.start, edit.span.end));

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;

    for edit in &edits {
        if edit.span.start < cursor {
            tracing::debug!(?edit.span, "Dropping edit overlapping an earlier replacement");
            continue;
        }
        let Some(unchanged) = source.get(cursor..edit.span.start) else {
            tracing::warn!(?edit.span, "Edit span fell outside the document; skipping");
            continue;
        };
        output.push_str(unchanged);
        output.push_str(&edit.text);
        cursor = edit.span.end;
    }

    if let Some(tail) = source.get(cursor..) {
        output.push_str(tail);
    }

    output
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    fn edit(start: usize, end: usize, text: &str) -> Edit {
        Edit { span: ByteSpan::new(start, end), text: text.to_string() }
    }

    #[googletest::test]
    fn test_splice_replaces_spans_in_order() {
        let source = "<p>one</p><p>two</p>";

        let result = splice(source, vec![edit(13, 16, "二"), edit(3, 6, "一")]);

        assert_that!(result, eq("<p>一</p><p>二</p>"));
    }

    #[googletest::test]
    fn test_splice_inserts_at_empty_span() {
        let source = "<html><body></body></html>";

        let result = splice(source, vec![edit(5, 5, " lang=\"en\"")]);

        assert_that!(result, eq("<html lang=\"en\"><body></body></html>"));
    }

    #[googletest::test]
    fn test_splice_drops_overlapping_edit() {
        let source = "<div>outer text</div>";

        let result = splice(source, vec![edit(5, 15, "replaced"), edit(11, 15, "ignored")]);

        assert_that!(result, eq("<div>replaced</div>"));
    }

    #[googletest::test]
    fn test_splice_without_edits_is_identity() {
        let source = "<p>そのまま</p>";

        let result = splice(source, Vec::new());

        assert_that!(result, eq(source));
    }

    #[googletest::test]
    fn test_attr_edit_variants() {
        let value = attr_edit(AttrSlot::Value(ByteSpan::new(10, 12)), "lang", "en");
        expect_that!(value.text, eq("en"));
        expect_that!(value.span, eq(ByteSpan::new(10, 12)));

        let insert_value = attr_edit(AttrSlot::InsertValue(20), "data-lang", "ja");
        expect_that!(insert_value.text, eq("=\"ja\""));
        expect_that!(insert_value.span, eq(ByteSpan::new(20, 20)));

        let insert_attr = attr_edit(AttrSlot::InsertAttribute(5), "lang", "ja");
        expect_that!(insert_attr.text, eq(" lang=\"ja\""));
    }

    #[googletest::test]
    fn test_attr_edit_escapes_the_code() {
        let edit = attr_edit(AttrSlot::Value(ByteSpan::new(0, 2)), "lang", "a\"b");

        assert_that!(edit.text, eq("a&quot;b"));
    }
}
