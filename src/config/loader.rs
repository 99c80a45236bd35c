//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    LocalizerSettings,
};

/// 設定ファイル名。ページと同じディレクトリに置く
const SETTINGS_FILE_NAME: &str = ".html-i18n.json";

/// ワークスペースの `.html-i18n.json` を読み込む
///
/// ファイルがないことはエラーではなく `Ok(None)`。呼び出し側が
/// デフォルト設定に切り替える。
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<LocalizerSettings>, ConfigError> {
    let config_path = workspace_root.join(SETTINGS_FILE_NAME);
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No configuration file");
        return Ok(None);
    }
    read_settings(&config_path).map(Some)
}

/// 明示的に指定された設定ファイルを読み込む
///
/// ワークスペース探索と違い、ファイルの不在はそのまま IO エラーになる。
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_file(config_path: &Path) -> Result<LocalizerSettings, ConfigError> {
    read_settings(config_path)
}

/// JSON ファイルを [`LocalizerSettings`] にデシリアライズする
fn read_settings(config_path: &Path) -> Result<LocalizerSettings, ConfigError> {
    tracing::debug!(path = %config_path.display(), "Loading configuration");

    let content = std::fs::read_to_string(config_path)?;
    let settings: LocalizerSettings = serde_json::from_str(&content)?;

    Ok(settings)
}
