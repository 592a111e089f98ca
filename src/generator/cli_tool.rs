//! 外部AI CLI（claude / codex）の呼び出し

use crate::ai_provider::AiProvider;
use crate::error::{Result, StylingAiError};
use tokio::process::Command;

/// プロバイダごとのCLI引数
fn cli_args(provider: AiProvider, prompt: &str) -> Vec<String> {
    match provider {
        AiProvider::Codex => vec!["exec".into(), prompt.into()],
        _ => vec![
            "-p".into(),
            prompt.into(),
            "--output-format".into(),
            "text".into(),
        ],
    }
}

pub async fn run_cli(provider: AiProvider, prompt: &str) -> Result<String> {
    let command = provider.command_name().ok_or_else(|| {
        StylingAiError::CliExecution(format!("{} はCLIプロバイダではありません", provider))
    })?;
    let args = cli_args(provider, prompt);

    // Windowsではcmd /c経由
    #[cfg(windows)]
    let output = Command::new("cmd")
        .arg("/c")
        .arg(command)
        .args(&args)
        .output()
        .await
        .map_err(|e| StylingAiError::ApiCall(format!("{} CLI実行エラー: {}", command, e)))?;

    #[cfg(not(windows))]
    let output = Command::new(command)
        .args(&args)
        .output()
        .await
        .map_err(|e| StylingAiError::ApiCall(format!("{} CLI実行エラー: {}", command, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(StylingAiError::ApiCall(format!(
            "{} CLI failed (code {:?}): {}",
            command,
            output.status.code(),
            stderr
        )));
    }

    let response = String::from_utf8_lossy(&output.stdout).to_string();
    if response.trim().is_empty() {
        return Err(StylingAiError::ApiParse(format!("{} CLIの応答が空です", command)));
    }

    let preview: String = response.chars().take(200).collect();
    tracing::debug!(command, preview = %preview, "CLI応答");

    Ok(response)
}
