//! エラーケーステスト
//!
//! 入力不足は致命的、行単位の欠落は致命的でないことを検証

use roadsign_pack::catalogue;
use roadsign_pack::error::PackError;
use roadsign_pack::scanner;
use std::path::Path;
use tempfile::tempdir;

/// 存在しない画像ルート
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::build_image_index(Path::new("/nonexistent/path/12345"), "-jpg");
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, PackError::FolderNotFound(_)));
}

/// 空のフォルダは空の索引
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::build_image_index(dir.path(), "-jpg");

    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 画像のないフォルダ
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");

    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scanner::build_image_index(dir.path(), "-jpg");
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 存在しないスプレッドシート
#[test]
fn test_missing_spreadsheet() {
    let result = catalogue::load_catalogue(Path::new("/nonexistent/details.xls"));
    assert!(matches!(result, Err(PackError::FileNotFound(_))));
}

/// スプレッドシートでないファイル
#[test]
fn test_unreadable_spreadsheet() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("details.xlsx");
    std::fs::write(&path, "not a workbook").unwrap();

    let result = catalogue::load_catalogue(&path);
    assert!(matches!(result, Err(PackError::Spreadsheet(_))));
}

/// PackErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        PackError::Config("テスト設定エラー".to_string()),
        PackError::FileNotFound("details.xls".to_string()),
        PackError::FolderNotFound("/path/to/roadsign".to_string()),
        PackError::Spreadsheet("壊れたファイル".to_string()),
        PackError::MissingColumn("JPG".to_string()),
        PackError::EmptySheet("details.xls".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 必須列エラーのメッセージに列名が入る
#[test]
fn test_missing_column_message() {
    let err = PackError::MissingColumn("DGNo".to_string());
    assert!(format!("{}", err).contains("DGNo"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: PackError = io_err.into();

    assert!(matches!(err, PackError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: PackError = json_err.into();

    assert!(matches!(err, PackError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = roadsign_common::Error::Config("folder marker must not be empty".to_string());
    let err: PackError = common_err.into();

    assert!(matches!(err, PackError::Common(_)));
    assert!(format!("{}", err).contains("folder marker"));
}
