use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// テキスト生成に使うAI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    /// Gemini API（HTTP）
    #[default]
    Gemini,
    /// Claude CLI
    Claude,
    /// Codex CLI
    Codex,
}

impl AiProvider {
    /// 外部CLIのコマンド名（Gemini APIはNone）
    pub fn command_name(&self) -> Option<&'static str> {
        match self {
            AiProvider::Gemini => None,
            AiProvider::Claude => Some("claude"),
            AiProvider::Codex => Some("codex"),
        }
    }
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiProvider::Gemini => write!(f, "gemini"),
            AiProvider::Claude => write!(f, "claude"),
            AiProvider::Codex => write!(f, "codex"),
        }
    }
}
