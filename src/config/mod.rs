//! ローカライザの設定モジュール
mod loader;
mod manager;
mod types;

pub use manager::ConfigManager;
pub use types::{
    CheckConfig,
    ConfigError,
    LocalizerSettings,
    TranslationFilesConfig,
    ValidationError,
};
