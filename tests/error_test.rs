//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use optical_caliper::error::CaliperError;
use optical_caliper::intake;
use optical_caliper_common::{is_auth_expired, Error, InFlight, Rejected};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = intake::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(matches!(result, Err(CaliperError::FileNotFound(_))));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = intake::scan_folder(dir.path());

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.unwrap().is_empty());
}

/// 画像のないフォルダを読み込んだ場合
#[test]
fn test_load_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let images = intake::load_images(&[dir.path().to_path_buf()]).unwrap();
    assert!(images.is_empty());
}

/// 存在しないファイルを指定した場合
#[test]
fn test_load_missing_file() {
    let result = intake::load_images(&[PathBuf::from("/nonexistent/photo.png")]);
    assert!(matches!(result, Err(CaliperError::FileNotFound(_))));
}

/// エラーメッセージの表示
#[test]
fn test_error_messages() {
    let err = CaliperError::FileNotFound("photo.png".into());
    assert!(err.to_string().contains("photo.png"));

    let err = CaliperError::MissingApiKey;
    assert!(err.to_string().contains("GEMINI_API_KEY"));

    // 共通エラーはそのまま表示
    let err = CaliperError::from(Error::NoImageInResponse);
    assert_eq!(err.to_string(), "No image data found in the response");
}

/// API呼び出しエラーはリモートの文言を加工しない
#[test]
fn test_api_call_user_message_is_verbatim() {
    let err = CaliperError::ApiCall("Requested entity was not found.".into());
    assert_eq!(err.user_message(), "Requested entity was not found.");
    assert!(is_auth_expired(&err.user_message()));

    let other = CaliperError::ExcelGeneration("disk full".into());
    assert!(other.user_message().contains("disk full"));
    assert!(!is_auth_expired(&other.user_message()));
}

/// 操作の拒否理由の変換
#[test]
fn test_rejected_conversion() {
    let err = CaliperError::from(Rejected::NoImages);
    assert!(matches!(err, CaliperError::Common(Error::NoImages)));

    let err = CaliperError::from(Rejected::Busy(InFlight::Analyzing));
    assert!(matches!(err, CaliperError::Operation(_)));
}

/// JSONパースエラー
#[test]
fn test_json_parse_error() {
    let invalid_json = "{ invalid json }";
    let result: Result<serde_json::Value, _> = serde_json::from_str(invalid_json);
    let err: CaliperError = result.unwrap_err().into();
    assert!(matches!(err, CaliperError::JsonParse(_)));
}
