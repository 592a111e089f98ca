use thiserror::Error;

#[derive(Error, Debug)]
pub enum StylingAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`styling-ai config --set-api-key YOUR_KEY` または環境変数 GEMINI_API_KEY で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("カタログの読み込みに失敗: {0}")]
    CatalogLoad(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Common(#[from] styling_ai_common::Error),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),

    #[error("入力エラー: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, StylingAiError>;
