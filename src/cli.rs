//! コマンドラインインターフェース
//!
//! `apply`/`toggle` はページを書き換えて標準出力（または `-o`）へ、
//! `check` は整合性の問題を報告する。ログは標準エラーに出るので
//! 標準出力はレンダリング結果専用。

use std::io::{
    self,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Args,
    Parser,
    Subcommand,
};
use thiserror::Error;

use crate::catalog::{
    self,
    CatalogError,
    TranslationTable,
};
use crate::check::{
    self,
    Finding,
};
use crate::config::{
    ConfigError,
    ConfigManager,
    LocalizerSettings,
};
use crate::page::{
    Page,
    PageError,
};

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Japanese/English localization for static HTML pages.
#[derive(Parser, Debug)]
#[command(name = "html-i18n", version, about)]
pub struct Cli {
    /// Settings file (default: `.html-i18n.json` beside the page)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a language to every tagged element of the page
    Apply {
        /// Page to localize
        #[arg(value_name = "PAGE")]
        page: PathBuf,

        /// Language code to apply
        #[arg(short, long, value_name = "CODE")]
        lang: String,

        #[command(flatten)]
        source: TableSource,

        /// Write the rendered page here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Switch the page to the other language of the configured pair
    Toggle {
        /// Page to toggle
        #[arg(value_name = "PAGE")]
        page: PathBuf,

        #[command(flatten)]
        source: TableSource,

        /// Write the rendered page here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Report dictionary/markup inconsistencies without rewriting
    Check {
        /// Page to check
        #[arg(value_name = "PAGE")]
        page: PathBuf,

        #[command(flatten)]
        source: TableSource,
    },
}

/// Where the translation table comes from.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct TableSource {
    /// Directory of per-language translation files (ja.json, en.json, ...)
    #[arg(long, value_name = "DIR")]
    pub locales: Option<PathBuf>,

    /// Combined table file mapping key to per-language texts
    #[arg(long, value_name = "FILE")]
    pub table: Option<PathBuf>,
}

impl TableSource {
    /// 指定されたソースから翻訳辞書を構築する
    fn load(&self, settings: &LocalizerSettings) -> Result<TranslationTable, CatalogError> {
        match (&self.locales, &self.table) {
            (Some(dir), _) => catalog::discover(dir, settings),
            (None, Some(file)) => {
                let mut table = TranslationTable::new();
                catalog::load_combined_file(&mut table, file, &settings.key_separator)?;
                Ok(table)
            }
            // clap のグループ制約でどちらか一方は必ず指定される
            (None, None) => Ok(TranslationTable::new()),
        }
    }
}

/// コマンドを実行する
///
/// # Errors
/// - 設定・翻訳ファイル・ページの読み込みエラー
/// - 出力の書き込みエラー
pub fn run(cli: Cli) -> Result<ExitCode, CliError> {
    match cli.command {
        Commands::Apply { page, lang, source, output } => {
            let settings = load_settings(cli.config.as_deref(), &page)?;
            let table = source.load(&settings)?;

            let mut page = Page::read(&page, &settings)?;
            let outcome = page.apply_language(&lang, &table);
            tracing::info!(
                %lang,
                replaced = outcome.replaced,
                skipped = outcome.skipped,
                "Applied language"
            );

            write_rendered(page.render(), output.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Toggle { page, source, output } => {
            let settings = load_settings(cli.config.as_deref(), &page)?;
            let table = source.load(&settings)?;

            let mut page = Page::read(&page, &settings)?;
            let active = page.toggle(&table);
            tracing::info!(%active, "Toggled");

            write_rendered(page.render(), output.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check { page, source } => {
            let settings = load_settings(cli.config.as_deref(), &page)?;
            let table = source.load(&settings)?;

            let scanned = Page::read(&page, &settings)?;
            let findings = check::run(scanned.scan(), &table, &settings);
            report_findings(&mut io::stdout().lock(), &page, &findings)?;

            if findings.is_empty() { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::FAILURE) }
        }
    }
}

/// 設定を読み込む。`--config` 指定時はそのファイル、なければページの
/// ディレクトリの `.html-i18n.json`（存在しなければデフォルト値）
fn load_settings(
    config_path: Option<&Path>,
    page_path: &Path,
) -> Result<LocalizerSettings, ConfigError> {
    let mut manager = ConfigManager::new();
    if let Some(path) = config_path {
        manager.load_settings_file(path)?;
    } else {
        manager.load_for_page(page_path)?;
    }
    Ok(manager.get_settings().clone())
}

/// レンダリング結果を `-o` のファイルまたは標準出力へ書き出す
fn write_rendered(rendered: &str, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => std::fs::write(path, rendered)?,
        None => io::stdout().lock().write_all(rendered.as_bytes())?,
    }
    Ok(())
}

/// `check` の検出結果を 1 行 1 件で書き出す（位置は 1 始まり）
fn report_findings(
    writer: &mut impl Write,
    page_path: &Path,
    findings: &[Finding],
) -> Result<(), CliError> {
    for finding in findings {
        let location = finding.range.map_or_else(
            || page_path.display().to_string(),
            |range| {
                format!(
                    "{}:{}:{}",
                    page_path.display(),
                    range.start.line + 1,
                    range.start.character + 1
                )
            },
        );
        writeln!(writer, "{location}: {}: {}", finding.severity.label(), finding.message)?;
    }
    Ok(())
}
