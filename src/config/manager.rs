//! 設定の読み込みと保持

use std::path::Path;

use super::{
    ConfigError,
    LocalizerSettings,
    loader,
};

/// 読み込み済みの設定を保持し、コマンド実行中の参照点になる
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: LocalizerSettings,
}

impl ConfigManager {
    /// デフォルト設定のマネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ページの置かれたディレクトリから設定を読み込む
    ///
    /// `.html-i18n.json` が見つからなければデフォルト設定のままにする。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_for_page(&mut self, page_path: &Path) -> Result<(), ConfigError> {
        let settings = match page_path.parent() {
            Some(dir) => loader::load_from_workspace(dir)?.unwrap_or_default(),
            None => LocalizerSettings::default(),
        };
        self.install(settings)
    }

    /// 明示的に指定された設定ファイルを読み込む（`--config` 用）
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings_file(&mut self, config_path: &Path) -> Result<(), ConfigError> {
        let settings = loader::load_from_file(config_path)?;
        self.install(settings)
    }

    /// バリデーションを通った設定だけを現在の設定にする
    fn install(&mut self, settings: LocalizerSettings) -> Result<(), ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        tracing::debug!(?settings, "Settings installed");
        self.current_settings = settings;
        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &LocalizerSettings {
        &self.current_settings
    }
}
