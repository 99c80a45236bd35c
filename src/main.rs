//! Entry point for the HTML page localizer CLI.

use std::process::ExitCode;

use clap::Parser;
use html_i18n_localizer::cli::{
    self,
    Cli,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // ログは標準エラーへ。標準出力はレンダリング結果専用
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli::run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
