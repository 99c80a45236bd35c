//! Translation table definitions

use std::collections::HashMap;

/// Display texts for one translation key, by language code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationEntry {
    /// 言語コード → 表示テキスト
    texts: HashMap<String, String>,
}

impl TranslationEntry {
    pub fn set(&mut self, lang: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(lang.into(), text.into());
    }

    /// Text for `lang`, or `None` if the entry does not cover it.
    #[must_use]
    pub fn text(&self, lang: &str) -> Option<&str> {
        self.texts.get(lang).map(String::as_str)
    }

    #[must_use]
    pub fn has_language(&self, lang: &str) -> bool {
        self.texts.contains_key(lang)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.texts.keys().map(String::as_str)
    }
}

/// Translation key → per-language texts.
///
/// Built once from translation files, then read-only for the rest of the
/// localization session.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    /// 翻訳キー → エントリ
    entries: HashMap<String, TranslationEntry>,
}

impl TranslationTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, lang: impl Into<String>, text: impl Into<String>) {
        self.entries.entry(key.into()).or_default().set(lang, text);
    }

    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&TranslationEntry> {
        self.entries.get(key)
    }

    /// Text for `key` in `lang`. Absent key or language is `None`, never
    /// an error.
    #[must_use]
    pub fn text(&self, key: &str, lang: &str) -> Option<&str> {
        self.entries.get(key).and_then(|entry| entry.text(lang))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge a per-language key map (one translation file's worth) into
    /// the table under `lang`.
    pub fn merge_language(&mut self, lang: &str, texts: HashMap<String, String>) {
        for (key, text) in texts {
            self.set(key, lang, text);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[googletest::test]
    fn test_set_and_text() {
        let mut table = TranslationTable::new();
        table.set("navHome", "ja", "ホーム");
        table.set("navHome", "en", "Home");

        expect_that!(table.text("navHome", "ja"), some(eq("ホーム")));
        expect_that!(table.text("navHome", "en"), some(eq("Home")));
        expect_that!(table.len(), eq(1));
    }

    #[googletest::test]
    fn test_missing_key_and_language_are_none() {
        let mut table = TranslationTable::new();
        table.set("navHome", "ja", "ホーム");

        expect_that!(table.text("navAbout", "ja"), none());
        expect_that!(table.text("navHome", "en"), none());
    }

    #[googletest::test]
    fn test_entry_languages() {
        let mut table = TranslationTable::new();
        table.set("pageTitle", "ja", "粉もんプロジェクト - 報告書索引");
        table.set("pageTitle", "en", "Konamon Project - Report Index");

        let entry = table.entry("pageTitle").unwrap();
        let mut languages: Vec<_> = entry.languages().map(ToString::to_string).collect();
        languages.sort_unstable();

        expect_that!(languages, elements_are![eq("en"), eq("ja")]);
        expect_that!(entry.has_language("ja"), eq(true));
        expect_that!(entry.has_language("fr"), eq(false));
    }

    #[googletest::test]
    fn test_merge_language_extends_existing_entries() {
        let mut table = TranslationTable::new();
        table.set("navHome", "ja", "ホーム");

        let mut texts = HashMap::new();
        texts.insert("navHome".to_string(), "Home".to_string());
        texts.insert("navAbout".to_string(), "About".to_string());
        table.merge_language("en", texts);

        expect_that!(table.text("navHome", "ja"), some(eq("ホーム")));
        expect_that!(table.text("navHome", "en"), some(eq("Home")));
        expect_that!(table.text("navAbout", "en"), some(eq("About")));
        expect_that!(table.len(), eq(2));
    }
}
