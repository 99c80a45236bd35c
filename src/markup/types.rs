//! Scan result types for the registration pass

use thiserror::Error;

use crate::types::{
    ByteSpan,
    SourceRange,
};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to set up the HTML grammar: {0}")]
    LanguageSetup(#[from] tree_sitter::LanguageError),

    #[error("Failed to parse the document")]
    ParseFailed,
}

/// Where a managed attribute lives in a start tag.
///
/// The scan resolves each attribute of interest to one of these so a
/// render can write the active language without re-parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrSlot {
    /// Existing value to overwrite.
    Value(ByteSpan),
    /// Attribute present without a value; `="value"` goes after the name.
    InsertValue(usize),
    /// Attribute absent; a whole ` name="value"` goes after the tag name.
    InsertAttribute(usize),
}

/// One registered localizable element: its translation key and the inner
/// content span a render replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBinding {
    pub key: String,
    /// Content between the start tag and the end tag.
    pub inner: ByteSpan,
    /// Where the key is written in the markup (for findings).
    pub range: SourceRange,
}

/// Everything one registration pass learns about a page.
///
/// All spans index into the markup the scan ran over; that text is
/// treated as immutable for the rest of the session.
#[derive(Debug, Clone, Default)]
pub struct PageScan {
    /// Localizable elements in document order, outermost first.
    pub bindings: Vec<TextBinding>,
    /// Inner span of the first `<title>` element.
    pub title_inner: Option<ByteSpan>,
    /// `lang` attribute of the first `<html>` element.
    pub html_lang: Option<AttrSlot>,
    /// State attribute of the first `<body>` element.
    pub body_state: Option<AttrSlot>,
    /// Inner span of the toggle control, when the page has one.
    pub toggle_inner: Option<ByteSpan>,
}

impl PageScan {
    /// The language the page records in its state attribute, if any.
    ///
    /// An empty value counts as unset, the way a missing attribute does.
    #[must_use]
    pub fn recorded_language<'a>(&self, source: &'a str) -> Option<&'a str> {
        match self.body_state {
            Some(AttrSlot::Value(span)) => span.slice(source).filter(|value| !value.is_empty()),
            _ => None,
        }
    }
}
