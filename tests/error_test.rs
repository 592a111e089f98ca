//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use std::path::Path;
use styling_ai_common::{Catalog, DiagnosisError, Error};
use styling_ai_rust::diagnose;
use styling_ai_rust::error::StylingAiError;
use styling_ai_rust::report;
use tempfile::tempdir;

/// 存在しないカタログを読み込んだ場合
#[test]
fn test_load_nonexistent_catalog() {
    let result = report::load_catalog(Path::new("/nonexistent/path/12345.csv"));
    assert!(matches!(result, Err(StylingAiError::FileNotFound(_))));

    let result = Catalog::from_csv(Path::new("/nonexistent/path/12345.csv"));
    assert!(matches!(result, Err(Error::Catalog(_))));
}

/// 必須列が足りないカタログ
#[test]
fn test_load_catalog_missing_columns() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("products.csv");
    std::fs::write(&path, "商品名,価格\nリップA,1500\n").unwrap();

    let result = report::load_catalog(&path);
    assert!(matches!(result, Err(StylingAiError::CatalogLoad(_))));
}

/// ヘッダーだけのカタログは空として読める
#[test]
fn test_load_empty_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("products.csv");
    std::fs::write(&path, "商品名,ブランド名,価格,特徴,推奨パーソナルカラー,商品カテゴリ\n").unwrap();

    let catalog = report::load_catalog(&path).unwrap();
    assert!(catalog.is_empty());
}

/// 不正な診断回答
#[test]
fn test_invalid_answers() {
    let err = diagnose::diagnose_from_answers("ABCE").unwrap_err();
    assert!(err.to_string().contains("E"));

    assert!(diagnose::diagnose_from_answers("").is_err());
}

/// StylingAiErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        StylingAiError::Config("テスト設定エラー".to_string()),
        StylingAiError::FileNotFound("products.csv".to_string()),
        StylingAiError::CatalogLoad("列がありません".to_string()),
        StylingAiError::ApiCall("timeout".to_string()),
        StylingAiError::ApiParse("空のレスポンス".to_string()),
        StylingAiError::CliExecution("claude not found".to_string()),
        StylingAiError::InvalidInput("ABC".to_string()),
        StylingAiError::MissingApiKey,
    ];

    for err in errors {
        assert!(!err.to_string().is_empty());
    }
}

/// 共通ライブラリのエラーがそのまま表示される
#[test]
fn test_common_error_conversion() {
    let err: StylingAiError = Error::from(DiagnosisError::NotStarted).into();
    assert!(matches!(err, StylingAiError::Common(_)));
    assert!(err.to_string().contains("診断が開始されていません"));
}
