//! テキスト生成AI連携
//!
//! - Gemini API（HTTP）
//! - Claude / Codex CLI（外部プロセス）
//!
//! どちらもプロンプトを渡して応答テキストを受け取るだけの同期的な呼び出し。
//! タイムアウト・リトライはしない。

pub mod cli_tool;
pub mod gemini;

pub use gemini::GeminiClient;

use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// プロンプトを送信して応答テキストを取得
pub async fn generate(provider: AiProvider, config: &Config, prompt: &str) -> Result<String> {
    tracing::info!(provider = %provider, prompt_len = prompt.chars().count(), "AI呼び出し開始");

    let response = match provider {
        AiProvider::Gemini => {
            let client = GeminiClient::new(config.get_api_key()?, &config.model, config.temperature);
            client.generate(prompt).await?
        }
        AiProvider::Claude | AiProvider::Codex => cli_tool::run_cli(provider, prompt).await?,
    };

    tracing::debug!(response_len = response.chars().count(), "AI応答受信");
    Ok(response)
}

/// スピナーを表示しながら生成
pub async fn generate_with_spinner(provider: AiProvider, config: &Config, prompt: &str) -> Result<String> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("AI({})がスタイリングを考えています...", provider));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = generate(provider, config, prompt).await;
    spinner.finish_and_clear();
    result
}
