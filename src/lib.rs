//! html-i18n-localizer
//!
//! 静的 HTML ページ向けの日英ローカライザ。翻訳辞書（キー × 言語 →
//! テキスト）を読み込み、`data-i18n` でタグ付けされた要素のテキストを
//! 言語切り替えごとに書き換える。

pub mod catalog;
pub mod check;
pub mod cli;
pub mod config;
pub mod markup;
pub mod page;
mod test_utils;
pub mod types;

// よく使う型を再エクスポート
pub use catalog::TranslationTable;
pub use config::LocalizerSettings;
pub use page::{
    ActiveLanguage,
    Page,
};
