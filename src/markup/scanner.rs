//! Registration scan: one parse of the page that finds every localizable
//! element and the attributes a render maintains.

use tree_sitter::{
    Node,
    Parser,
};

use super::types::{
    AttrSlot,
    PageScan,
    ScanError,
    TextBinding,
};
use crate::config::LocalizerSettings;
use crate::types::{
    ByteSpan,
    SourceRange,
};

/// An attribute value as written in a start tag.
#[derive(Debug, Clone)]
struct AttrValue {
    text: String,
    span: ByteSpan,
    range: SourceRange,
}

/// An attribute located in a start tag, with or without a value.
#[derive(Debug, Clone)]
struct FoundAttr {
    /// Byte offset just past the attribute name.
    name_end: usize,
    value: Option<AttrValue>,
}

/// Scan `html` once and register everything later renders splice into.
///
/// Elements are collected in document order; a localizable element nested
/// inside another localizable element is dropped, since replacing the
/// outer content would discard it anyway.
///
/// # Errors
/// - HTML グラマーの初期化エラー
/// - ドキュメントのパースエラー
pub fn scan(html: &str, settings: &LocalizerSettings) -> Result<PageScan, ScanError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_html::LANGUAGE.into()).map_err(ScanError::LanguageSetup)?;
    let tree = parser.parse(html, None).ok_or(ScanError::ParseFailed)?;

    let mut scan = PageScan::default();
    collect(tree.root_node(), html, settings, &mut scan);

    tracing::debug!(
        bindings = scan.bindings.len(),
        has_title = scan.title_inner.is_some(),
        has_toggle = scan.toggle_inner.is_some(),
        "Registered localizable elements"
    );

    Ok(scan)
}

/// Walk the tree depth-first, visiting elements in document order.
fn collect(node: Node<'_>, html: &str, settings: &LocalizerSettings, scan: &mut PageScan) {
    if node.kind() == "element" {
        inspect_element(node, html, settings, scan);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect(child, html, settings, scan);
    }
}

/// Record whatever one element contributes to the scan.
fn inspect_element(element: Node<'_>, html: &str, settings: &LocalizerSettings, scan: &mut PageScan) {
    let mut cursor = element.walk();
    let Some(start_tag) = element.children(&mut cursor).find(|c| c.kind() == "start_tag") else {
        // 自己終端タグや void 要素は差し替える内容を持たない
        return;
    };

    let mut tag_cursor = start_tag.walk();
    let Some(tag_name_node) = start_tag.children(&mut tag_cursor).find(|c| c.kind() == "tag_name")
    else {
        return;
    };
    let Ok(tag_name) = tag_name_node.utf8_text(html.as_bytes()) else {
        return;
    };

    let mut end_cursor = element.walk();
    let inner = element
        .children(&mut end_cursor)
        .find(|c| c.kind() == "end_tag" && !c.is_missing())
        .map(|end_tag| ByteSpan::new(start_tag.end_byte(), end_tag.start_byte()));

    register_binding(start_tag, html, settings, inner, scan);

    if tag_name.eq_ignore_ascii_case("title") && scan.title_inner.is_none() {
        scan.title_inner = inner;
    }

    if tag_name.eq_ignore_ascii_case("html") && scan.html_lang.is_none() {
        scan.html_lang = Some(attr_slot(start_tag, html, "lang", tag_name_node.end_byte()));
    }

    if tag_name.eq_ignore_ascii_case("body") && scan.body_state.is_none() {
        scan.body_state =
            Some(attr_slot(start_tag, html, &settings.state_attribute, tag_name_node.end_byte()));
    }

    if scan.toggle_inner.is_none()
        && let Some(id_attr) = find_attribute(start_tag, html, "id")
        && let Some(id) = id_attr.value
        && id.text == settings.toggle_control_id
    {
        scan.toggle_inner = inner;
    }
}

/// Register a localizable element, outermost occurrence winning.
fn register_binding(
    start_tag: Node<'_>,
    html: &str,
    settings: &LocalizerSettings,
    inner: Option<ByteSpan>,
    scan: &mut PageScan,
) {
    let Some(key_attr) = find_attribute(start_tag, html, &settings.key_attribute) else {
        return;
    };
    let Some(value) = key_attr.value else {
        return;
    };
    if value.text.is_empty() {
        tracing::debug!("Skipping localizable element with an empty key");
        return;
    }
    let Some(inner) = inner else {
        tracing::debug!(key = %value.text, "Skipping localizable element without content");
        return;
    };

    // 外側の要素が先に登録されている（先行順の走査）
    if scan.bindings.iter().any(|outer| outer.inner.contains(inner)) {
        tracing::debug!(key = %value.text, "Skipping element nested in another localizable element");
        return;
    }

    scan.bindings.push(TextBinding { key: value.text, inner, range: value.range });
}

/// Resolve how a render writes attribute `name` on this start tag.
fn attr_slot(start_tag: Node<'_>, html: &str, name: &str, tag_name_end: usize) -> AttrSlot {
    match find_attribute(start_tag, html, name) {
        Some(attr) => match attr.value {
            Some(value) => AttrSlot::Value(value.span),
            None => AttrSlot::InsertValue(attr.name_end),
        },
        None => AttrSlot::InsertAttribute(tag_name_end),
    }
}

/// Find an attribute by name (ASCII case-insensitive, as in HTML).
fn find_attribute(start_tag: Node<'_>, html: &str, name: &str) -> Option<FoundAttr> {
    let mut cursor = start_tag.walk();
    for child in start_tag.children(&mut cursor) {
        if child.kind() != "attribute" {
            continue;
        }

        let mut name_node = None;
        let mut value_node = None;
        let mut attr_cursor = child.walk();
        for part in child.children(&mut attr_cursor) {
            match part.kind() {
                "attribute_name" => name_node = Some(part),
                "attribute_value" | "quoted_attribute_value" => value_node = Some(part),
                _ => {}
            }
        }

        let Some(name_node) = name_node else {
            continue;
        };
        let Ok(name_text) = name_node.utf8_text(html.as_bytes()) else {
            continue;
        };
        if !name_text.eq_ignore_ascii_case(name) {
            continue;
        }

        let value = value_node.map(|node| resolve_value(node, html));
        return Some(FoundAttr { name_end: name_node.end_byte(), value });
    }

    None
}

/// The value span of an attribute, unwrapped from its quotes if any.
fn resolve_value(node: Node<'_>, html: &str) -> AttrValue {
    if node.kind() == "quoted_attribute_value" {
        let mut cursor = node.walk();
        if let Some(inner) = node.children(&mut cursor).find(|c| c.kind() == "attribute_value") {
            return attr_value_at(inner, html);
        }

        // 空の引用値（""）：引用符の間を指す
        let span =
            ByteSpan::new(node.start_byte().saturating_add(1), node.end_byte().saturating_sub(1));
        return AttrValue { text: String::new(), span, range: SourceRange::from_node(&node) };
    }

    attr_value_at(node, html)
}

/// Build an [`AttrValue`] from the node holding the bare value text.
fn attr_value_at(node: Node<'_>, html: &str) -> AttrValue {
    let span = ByteSpan::from_node(&node);
    let text = span.slice(html).unwrap_or_default().to_string();
    AttrValue { text, span, range: SourceRange::from_node(&node) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    /// 元のページと同じ構造の縮小版
    const FIXTURE: &str = r##"<!DOCTYPE html>
<html lang="ja">
<head>
    <meta charset="UTF-8">
    <title data-i18n="pageTitle">粉もんプロジェクト - 報告書索引</title>
</head>
<body data-lang="ja">
    <header>
        <h1 data-i18n="projectTitle">粉もんプロジェクト</h1>
        <nav>
            <a href="index.html" data-i18n="navHome">ホーム</a>
            <a href="#" id="lang-switch">English</a>
        </nav>
    </header>
    <footer data-i18n="footerText">© 2025 粉もんプロジェクト</footer>
</body>
</html>
"##;

    fn scan_fixture() -> PageScan {
        scan(FIXTURE, &LocalizerSettings::default()).unwrap()
    }

    #[googletest::test]
    fn test_scan_registers_bindings_in_document_order() {
        let result = scan_fixture();

        assert_that!(
            result.bindings,
            elements_are![
                field!(TextBinding.key, eq("pageTitle")),
                field!(TextBinding.key, eq("projectTitle")),
                field!(TextBinding.key, eq("navHome")),
                field!(TextBinding.key, eq("footerText")),
            ]
        );
    }

    #[googletest::test]
    fn test_scan_binding_spans_cover_the_markup_text() {
        let result = scan_fixture();

        let texts: Vec<_> = result
            .bindings
            .iter()
            .map(|b| b.inner.slice(FIXTURE).unwrap().to_string())
            .collect();

        assert_that!(
            texts,
            elements_are![
                eq("粉もんプロジェクト - 報告書索引"),
                eq("粉もんプロジェクト"),
                eq("ホーム"),
                eq("© 2025 粉もんプロジェクト"),
            ]
        );
    }

    #[googletest::test]
    fn test_scan_locates_title_state_and_toggle() -> Result<()> {
        let result = scan_fixture();

        expect_that!(
            result.title_inner.map(|s| s.slice(FIXTURE).unwrap()),
            some(eq("粉もんプロジェクト - 報告書索引"))
        );
        expect_that!(result.toggle_inner.map(|s| s.slice(FIXTURE).unwrap()), some(eq("English")));

        let Some(AttrSlot::Value(lang_span)) = result.html_lang else {
            return fail!("expected an existing lang attribute");
        };
        expect_that!(lang_span.slice(FIXTURE), some(eq("ja")));

        let Some(AttrSlot::Value(state_span)) = result.body_state else {
            return fail!("expected an existing state attribute");
        };
        expect_that!(state_span.slice(FIXTURE), some(eq("ja")));

        Ok(())
    }

    #[googletest::test]
    fn test_recorded_language_reads_the_state_attribute() {
        let result = scan_fixture();

        assert_that!(result.recorded_language(FIXTURE), some(eq("ja")));
    }

    #[rstest]
    #[case::missing_attribute("<html><body><p>x</p></body></html>")]
    #[case::empty_value(r#"<html><body data-lang=""><p>x</p></body></html>"#)]
    fn test_recorded_language_unset(#[case] html: &str) {
        let result = scan(html, &LocalizerSettings::default()).unwrap();

        assert_eq!(result.recorded_language(html), None);
    }

    #[googletest::test]
    fn test_scan_missing_lang_attribute_becomes_insertion_point() -> Result<()> {
        let html = "<html><head></head><body></body></html>";

        let result = scan(html, &LocalizerSettings::default()).unwrap();

        let Some(AttrSlot::InsertAttribute(offset)) = result.html_lang else {
            return fail!("expected an insertion point for the lang attribute");
        };
        assert_that!(&html[..offset], eq("<html"));

        Ok(())
    }

    #[googletest::test]
    fn test_scan_valueless_state_attribute_becomes_value_insertion() -> Result<()> {
        let html = "<html><body data-lang><p>x</p></body></html>";

        let result = scan(html, &LocalizerSettings::default()).unwrap();

        let Some(AttrSlot::InsertValue(offset)) = result.body_state else {
            return fail!("expected a value insertion point for the state attribute");
        };
        expect_that!(&html[..offset], ends_with("data-lang"));
        expect_that!(result.recorded_language(html), none());

        Ok(())
    }

    #[googletest::test]
    fn test_scan_drops_nested_binding() {
        let html = r#"<html><body>
            <div data-i18n="outer">before <span data-i18n="inner">x</span></div>
        </body></html>"#;

        let result = scan(html, &LocalizerSettings::default()).unwrap();

        assert_that!(result.bindings, elements_are![field!(TextBinding.key, eq("outer"))]);
    }

    #[googletest::test]
    fn test_scan_keeps_repeated_keys() {
        let html = r##"<html><body>
            <h1 data-i18n="navHome">ホーム</h1>
            <a href="#" data-i18n="navHome">ホーム</a>
        </body></html>"##;

        let result = scan(html, &LocalizerSettings::default()).unwrap();

        assert_that!(
            result.bindings,
            elements_are![
                field!(TextBinding.key, eq("navHome")),
                field!(TextBinding.key, eq("navHome")),
            ]
        );
    }

    #[rstest]
    #[case::void_element(r#"<html><body><img data-i18n="logo" src="logo.png"></body></html>"#)]
    #[case::empty_key(r#"<html><body><p data-i18n="">text</p></body></html>"#)]
    fn test_scan_skips_unusable_elements(#[case] html: &str) {
        let result = scan(html, &LocalizerSettings::default()).unwrap();

        assert_eq!(result.bindings.len(), 0);
    }

    #[googletest::test]
    fn test_scan_empty_element_has_empty_inner_span() {
        let html = r#"<html><body><span data-i18n="navHome"></span></body></html>"#;

        let result = scan(html, &LocalizerSettings::default()).unwrap();

        assert_that!(result.bindings, len(eq(1)));
        let binding = &result.bindings[0];
        expect_that!(binding.inner.is_empty(), eq(true));
        expect_that!(binding.inner.slice(html), some(eq("")));
    }

    #[googletest::test]
    fn test_scan_attribute_names_are_case_insensitive() {
        let html = r#"<html><body><p DATA-I18N="navHome">ホーム</p></body></html>"#;

        let result = scan(html, &LocalizerSettings::default()).unwrap();

        assert_that!(result.bindings, elements_are![field!(TextBinding.key, eq("navHome"))]);
    }

    #[googletest::test]
    fn test_scan_unquoted_attribute_value() {
        let html = "<html><body><p data-i18n=navHome>ホーム</p></body></html>";

        let result = scan(html, &LocalizerSettings::default()).unwrap();

        assert_that!(result.bindings, elements_are![field!(TextBinding.key, eq("navHome"))]);
    }

    #[googletest::test]
    fn test_scan_without_toggle_control() {
        let html = r#"<html><body><p data-i18n="navHome">ホーム</p></body></html>"#;

        let result = scan(html, &LocalizerSettings::default()).unwrap();

        assert_that!(result.toggle_inner, none());
    }

    #[googletest::test]
    fn test_scan_honors_configured_attribute_names() {
        let html = r#"<html><body data-locale="en"><p data-t="navHome">Home</p></body></html>"#;
        let settings = LocalizerSettings {
            key_attribute: "data-t".to_string(),
            state_attribute: "data-locale".to_string(),
            ..LocalizerSettings::default()
        };

        let result = scan(html, &settings).unwrap();

        assert_that!(result.bindings, elements_are![field!(TextBinding.key, eq("navHome"))]);
        assert_that!(result.recorded_language(html), some(eq("en")));
    }
}
