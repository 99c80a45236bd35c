//! 翻訳辞書（キー × 言語 → テキスト）の構築
mod loader;
mod table;

pub use loader::{
    CatalogError,
    discover,
    flatten_json,
    load_combined_file,
    load_language_file,
};
pub use table::{
    TranslationEntry,
    TranslationTable,
};
