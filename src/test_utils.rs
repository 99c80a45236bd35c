//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use crate::catalog::TranslationTable;

/// 原文ページの辞書を模したテスト用テーブルを作成する
///
/// 両言語のテキストが揃ったエントリのみを含む。`langSwitch` は
/// トグルコントロールのラベル（非アクティブ言語の名前）。
pub(crate) fn konamon_table() -> TranslationTable {
    let mut table = TranslationTable::new();
    for (key, ja, en) in [
        ("pageTitle", "粉もんプロジェクト - 報告書索引", "Konamon Project - Report Index"),
        ("projectTitle", "粉もんプロジェクト", "Konamon Project"),
        ("navHome", "ホーム", "Home"),
        ("footerText", "© 2025 粉もんプロジェクト", "© 2025 Konamon Project"),
        ("langSwitch", "English", "日本語"),
    ] {
        table.set(key, "ja", ja);
        table.set(key, "en", en);
    }
    table
}
