//! エラー型定義

use thiserror::Error;

/// 診断（質問票）の事前条件違反
///
/// いずれの場合も状態は変更されない。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosisError {
    #[error("診断が開始されていません")]
    NotStarted,

    #[error("診断はすでに開始されています")]
    AlreadyStarted,

    #[error("診断はすでに完了しています。リセットしてください")]
    AlreadyScored,

    #[error("無効な回答です: {0}（A/B/C/Dから選択）")]
    InvalidChoice(String),

    #[error("回答数が{got}件です（{expected}件必要）")]
    WrongAnswerCount { got: usize, expected: usize },
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Diagnosis error: {0}")]
    Diagnosis(#[from] DiagnosisError),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
