//! ページと翻訳辞書の整合性チェック

use std::collections::HashSet;

use crate::catalog::TranslationTable;
use crate::config::LocalizerSettings;
use crate::markup::PageScan;
use crate::types::SourceRange;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Information,
}

impl Severity {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Information => "info",
        }
    }
}

/// One consistency finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub message: String,
    /// Where the key is written in the page. `None` for findings that do
    /// not point at a tagged element.
    pub range: Option<SourceRange>,
    pub severity: Severity,
}

impl Finding {
    /// 警告レベルの検出結果を作る
    fn warning(message: String, range: Option<SourceRange>) -> Self {
        Self { message, range, severity: Severity::Warning }
    }
}

/// ページと翻訳辞書の整合性を検査する
///
/// 登録済みの翻訳キーが辞書に存在するか、両言語のテキストを持つかを
/// チェックします。トグルコントロールがあるページではラベルキーも
/// 検査対象に含めます。
///
/// # Arguments
/// * `scan` - ページの登録スキャン結果
/// * `table` - 翻訳辞書
/// * `settings` - ローカライザ設定
///
/// # Returns
/// 検出された問題のリスト（存在しないキーと言語抜けは警告、
/// 未使用キーは情報）
#[must_use]
pub fn run(
    scan: &PageScan,
    table: &TranslationTable,
    settings: &LocalizerSettings,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    let languages = [settings.default_language.as_str(), settings.alternate_language.as_str()];

    for binding in &scan.bindings {
        check_key(&mut findings, table, &binding.key, Some(binding.range), &languages);
    }

    // ラベルキーはマークアップに書かれないが、コントロールがある限り
    // 使用されるキーとして扱う
    if scan.toggle_inner.is_some() {
        check_key(&mut findings, table, &settings.toggle_label_key, None, &languages);
    }

    if settings.check.unused_keys {
        let mut used: HashSet<&str> = scan.bindings.iter().map(|b| b.key.as_str()).collect();
        if scan.toggle_inner.is_some() {
            used.insert(settings.toggle_label_key.as_str());
        }

        let mut unused: Vec<&str> = table.keys().filter(|key| !used.contains(key)).collect();
        unused.sort_unstable();

        for key in unused {
            findings.push(Finding {
                message: format!("Translation key '{key}' is never used"),
                range: None,
                severity: Severity::Information,
            });
        }
    }

    tracing::debug!(count = findings.len(), "Consistency check finished");

    findings
}

/// 1 キー分の検査：エントリの有無と両言語のテキストの有無
fn check_key(
    findings: &mut Vec<Finding>,
    table: &TranslationTable,
    key: &str,
    range: Option<SourceRange>,
    languages: &[&str],
) {
    let Some(entry) = table.entry(key) else {
        findings.push(Finding::warning(format!("Translation key '{key}' not found"), range));
        return;
    };

    for lang in languages {
        if !entry.has_language(lang) {
            findings.push(Finding::warning(
                format!("Translation key '{key}' has no text for language '{lang}'"),
                range,
            ));
        }
    }
}
