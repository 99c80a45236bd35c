//! Translation file loading and locale discovery

use std::collections::HashMap;
use std::path::Path;

use globset::{
    Glob,
    GlobSetBuilder,
};
use ignore::WalkBuilder;
use serde_json::Value;
use thiserror::Error;

use super::TranslationTable;
use crate::config::LocalizerSettings;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read translation file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse translation file: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid translation file pattern: {0}")]
    PatternError(#[from] globset::Error),
}

/// 大文字小文字とハイフン/アンダースコアの揺れを吸収する
fn normalize_language_code(code: &str) -> String {
    code.to_lowercase().replace('-', "_")
}

/// Detect which of the two configured languages a file belongs to.
///
/// Takes the path apart at '/' and '.' boundaries and looks for the
/// default or alternate language code, later parts winning.
///
/// # Examples
/// - `locales/en.json` → `en`
/// - `locales/ja/common.json` → `ja`
/// - `locales/fr.json` → `None` (not part of the configured pair)
fn detect_language_from_path(file_path: &Path, settings: &LocalizerSettings) -> Option<String> {
    let path_str = file_path.to_string_lossy();
    let parts: Vec<&str> = path_str.split(&['/', '.']).collect();

    for part in parts.iter().rev() {
        let normalized = normalize_language_code(part);
        for code in [&settings.default_language, &settings.alternate_language] {
            if normalized == normalize_language_code(code) {
                return Some(code.clone());
            }
        }
    }

    None
}

/// Flatten nested JSON into a map of separator-joined keys.
///
/// Array elements get an `[index]` suffix; non-string scalars keep
/// their JSON rendering.
///
/// # Examples
/// ```
/// use html_i18n_localizer::catalog::flatten_json;
/// use serde_json::json;
///
/// let json = json!({"nav": {"home": "ホーム"}});
///
/// let flattened = flatten_json(&json, ".", None);
/// assert_eq!(flattened.get("nav.home"), Some(&"ホーム".to_string()));
/// ```
#[must_use]
pub fn flatten_json(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
) -> HashMap<String, String> {
    let mut texts = HashMap::new();
    flatten_into(json, separator, prefix, &mut texts);
    texts
}

/// `flatten_json` の再帰部分。`key` は親までの結合済みキー
fn flatten_into(
    json: &Value,
    separator: &str,
    key: Option<&str>,
    texts: &mut HashMap<String, String>,
) {
    match json {
        Value::Object(map) => {
            for (child, value) in map {
                let child_key = match key {
                    Some(parent) => format!("{parent}{separator}{child}"),
                    None => child.clone(),
                };
                flatten_into(value, separator, Some(&child_key), texts);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                let child_key = match key {
                    Some(parent) => format!("{parent}[{index}]"),
                    None => format!("[{index}]"),
                };
                flatten_into(value, separator, Some(&child_key), texts);
            }
        }
        Value::String(text) => {
            if let Some(key) = key {
                texts.insert(key.to_string(), text.clone());
            }
        }
        other => {
            if let Some(key) = key {
                texts.insert(key.to_string(), other.to_string());
            }
        }
    }
}

/// Load one per-language translation file into `table` under `lang`.
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub fn load_language_file(
    table: &mut TranslationTable,
    file_path: &Path,
    lang: &str,
    separator: &str,
) -> Result<(), CatalogError> {
    let content = std::fs::read_to_string(file_path)?;
    let json: Value = serde_json::from_str(&content)?;

    let texts = flatten_json(&json, separator, None);
    tracing::debug!(file = %file_path.display(), lang, keys = texts.len(), "Loaded translation file");
    table.merge_language(lang, texts);

    Ok(())
}

/// Load a combined table file mapping key → {language → text}.
///
/// Nested objects flatten with `separator`. An object whose values are
/// all strings is one entry's language map, not a deeper key level.
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub fn load_combined_file(
    table: &mut TranslationTable,
    file_path: &Path,
    separator: &str,
) -> Result<(), CatalogError> {
    let content = std::fs::read_to_string(file_path)?;
    let json: Value = serde_json::from_str(&content)?;

    merge_combined_value(&json, separator, None, table);
    tracing::debug!(file = %file_path.display(), keys = table.len(), "Loaded combined table file");

    Ok(())
}

/// `load_combined_file` の再帰部分
fn merge_combined_value(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
    table: &mut TranslationTable,
) {
    let Value::Object(map) = json else {
        if let Some(key) = prefix {
            tracing::warn!(key, "Skipping non-object entry in combined table file");
        }
        return;
    };

    let is_language_map = !map.is_empty() && map.values().all(Value::is_string);
    if is_language_map && let Some(key) = prefix {
        for (lang, text) in map {
            if let Some(text) = text.as_str() {
                table.set(key, lang, text);
            }
        }
        return;
    }

    for (child_key, value) in map {
        let full_key =
            prefix.map_or_else(|| child_key.clone(), |p| format!("{p}{separator}{child_key}"));
        merge_combined_value(value, separator, Some(&full_key), table);
    }
}

/// Discover translation files under `locales_dir` and merge them into one
/// table.
///
/// Files matching the configured pattern are assigned to a language by
/// their path; files naming neither configured language are skipped with
/// a warning.
///
/// # Errors
/// - 無効な glob パターン
/// - ファイル読み込みまたはパースエラー
pub fn discover(
    locales_dir: &Path,
    settings: &LocalizerSettings,
) -> Result<TranslationTable, CatalogError> {
    let mut pattern_builder = GlobSetBuilder::new();
    pattern_builder.add(Glob::new(&settings.translation_files.file_pattern)?);
    let pattern_set = pattern_builder.build()?;

    let mut table = TranslationTable::new();

    for result in WalkBuilder::new(locales_dir)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        // ファイルのみを対象
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative_path) = path.strip_prefix(locales_dir) else {
            continue;
        };
        if !pattern_set.is_match(relative_path) {
            continue;
        }

        if let Some(lang) = detect_language_from_path(path, settings) {
            load_language_file(&mut table, path, &lang, &settings.key_separator)?;
        } else {
            tracing::warn!(
                file = %path.display(),
                "Skipping translation file: path names neither configured language"
            );
        }
    }

    Ok(table)
}
