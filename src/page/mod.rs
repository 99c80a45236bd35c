//! ページ本体：読み込み済みマークアップと能動的な言語状態
//!
//! 言語適用は毎回、読み込み時のマークアップから再レンダリングされる。
//! そのため同じ言語を何度適用しても出力は変わらず、翻訳が見つからない
//! 要素はマークアップに書かれたテキストのまま残る。

mod render;

use std::fmt;
use std::path::Path;

use thiserror::Error;

use render::{
    Edit,
    attr_edit,
    splice,
};

use crate::catalog::TranslationTable;
use crate::config::LocalizerSettings;
use crate::markup::{
    self,
    PageScan,
    ScanError,
    escape_text,
};

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Failed to read page: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    ScanError(#[from] ScanError),
}

/// The language the page currently renders in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveLanguage(String);

impl ActiveLanguage {
    /// 状態は [`Page`] だけが進める
    fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActiveLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What one localization pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Elements whose text was replaced with a translation.
    pub replaced: usize,
    /// Elements left as written in the markup (no translation for the
    /// requested language).
    pub skipped: usize,
}

/// A loaded page: the original markup, its registration scan, and the
/// active-language state carried as an explicit value.
#[derive(Debug, Clone)]
pub struct Page {
    /// 読み込み時のマークアップ。以後変更されない
    source: String,
    scan: PageScan,
    settings: LocalizerSettings,
    /// 最後のレンダリング結果（適用前は `source` と同一）
    rendered: String,
    active: ActiveLanguage,
    /// `<title>` 要素の現在のテキスト
    title_text: Option<String>,
}

impl Page {
    /// Load a page from markup already in memory.
    ///
    /// Runs the registration scan and reads the recorded language from
    /// the state attribute, falling back to the default language.
    ///
    /// # Errors
    /// - マークアップのパースエラー
    pub fn load(html: impl Into<String>, settings: &LocalizerSettings) -> Result<Self, PageError> {
        let source = html.into();
        let scan = markup::scan(&source, settings)?;

        let active = ActiveLanguage::new(
            scan.recorded_language(&source).unwrap_or(&settings.default_language),
        );
        let title_text =
            scan.title_inner.and_then(|span| span.slice(&source)).map(ToString::to_string);

        tracing::debug!(active = %active, "Loaded page");

        Ok(Self {
            rendered: source.clone(),
            source,
            scan,
            settings: settings.clone(),
            active,
            title_text,
        })
    }

    /// Load a page from a file.
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - マークアップのパースエラー
    pub fn read(path: &Path, settings: &LocalizerSettings) -> Result<Self, PageError> {
        let html = std::fs::read_to_string(path)?;
        Self::load(html, settings)
    }

    /// Apply `lang` to every registered element and stamp the page
    /// state.
    ///
    /// Elements without a translation for `lang` keep their markup text.
    /// The toggle control's label and the `lang`/state attributes are
    /// written in the same pass; whatever the page lacks is skipped
    /// silently.
    pub fn apply_language(&mut self, lang: &str, table: &TranslationTable) -> ApplyOutcome {
        let mut outcome = ApplyOutcome::default();
        let mut edits: Vec<Edit> = Vec::new();
        let mut translated_title = None;

        for binding in &self.scan.bindings {
            if let Some(text) = table.text(&binding.key, lang) {
                if Some(binding.inner) == self.scan.title_inner {
                    translated_title = Some(text.to_string());
                }
                edits.push(Edit { span: binding.inner, text: escape_text(text) });
                outcome.replaced += 1;
            } else {
                tracing::debug!(key = %binding.key, lang, "No translation; keeping markup text");
                outcome.skipped += 1;
            }
        }

        // トグルコントロールのラベル：切り替え先（非アクティブ言語）の名前
        if let Some(toggle_span) = self.scan.toggle_inner
            && let Some(label) = table.text(&self.settings.toggle_label_key, lang)
        {
            edits.retain(|edit| edit.span != toggle_span);
            edits.push(Edit { span: toggle_span, text: escape_text(label) });
        }

        if let Some(slot) = self.scan.html_lang {
            edits.push(attr_edit(slot, "lang", lang));
        }
        if let Some(slot) = self.scan.body_state {
            edits.push(attr_edit(slot, &self.settings.state_attribute, lang));
        }

        self.rendered = splice(&self.source, edits);
        self.title_text = translated_title.or_else(|| {
            self.scan.title_inner.and_then(|span| span.slice(&self.source)).map(ToString::to_string)
        });
        self.active = ActiveLanguage::new(lang);

        tracing::debug!(
            lang,
            replaced = outcome.replaced,
            skipped = outcome.skipped,
            "Applied language"
        );

        outcome
    }

    /// Switch to the other language of the configured pair and re-render.
    ///
    /// Returns the new active language.
    pub fn toggle(&mut self, table: &TranslationTable) -> ActiveLanguage {
        let next = self.settings.opposite_of(self.active.code()).to_string();
        tracing::debug!(from = %self.active, to = %next, "Toggling language");
        self.apply_language(&next, table);
        self.active.clone()
    }

    /// The current rendering of the page.
    #[must_use]
    pub fn render(&self) -> &str {
        &self.rendered
    }

    /// The document title as of the last render, if the page has a
    /// `<title>` element.
    #[must_use]
    pub fn document_title(&self) -> Option<&str> {
        self.title_text.as_deref()
    }

    #[must_use]
    pub const fn active_language(&self) -> &ActiveLanguage {
        &self.active
    }

    /// The registration scan, for consistency checks.
    #[must_use]
    pub const fn scan(&self) -> &PageScan {
        &self.scan
    }

    #[must_use]
    pub const fn settings(&self) -> &LocalizerSettings {
        &self.settings
    }
}
