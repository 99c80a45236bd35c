//! ページのマークアップ解析（tree-sitter-html による登録スキャン）
mod escape;
mod scanner;
mod types;

pub use escape::{
    escape_attr,
    escape_text,
};
pub use scanner::scan;
pub use types::{
    AttrSlot,
    PageScan,
    ScanError,
    TextBinding,
};
