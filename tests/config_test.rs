//! 設定ファイルテスト
//!
//! 読み込み/保存と環境変数による上書きを検証

use gait_ai::config::Config;
use tempfile::tempdir;

/// ファイルが無ければデフォルト
#[test]
fn test_load_missing_file_gives_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).expect("読み込み失敗");

    assert_eq!(config, Config::default());
    assert_eq!(config.server_url, "http://localhost:8000");
    assert!(config.session_cookie.is_none());
}

/// 保存して読み直す（親フォルダも作成される）
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("gait-ai").join("config.json");

    let config = Config {
        server_url: "https://vet.example.com".into(),
        csrf_token: Some("tok".into()),
        session_cookie: Some("sess".into()),
        timeout_seconds: 60,
    };
    config.save_to(&path).expect("保存失敗");

    let loaded = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(loaded, config);
}

/// 足りないフィールドはデフォルトで補う
#[test]
fn test_partial_file_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"server_url": "http://10.0.0.5:8000"}"#).unwrap();

    let config = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(config.server_url, "http://10.0.0.5:8000");
    assert_eq!(config.timeout_seconds, Config::default().timeout_seconds);
}

/// 壊れたJSONはエラー
#[test]
fn test_broken_file_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load_from(&path).is_err());
}

/// 環境変数の値が優先される（空白のみは無視）
#[test]
fn test_server_url_override() {
    let config = Config::default();

    assert_eq!(
        config.server_url_with(Some("http://staging:8000".into())),
        "http://staging:8000"
    );
    assert_eq!(config.server_url_with(Some("  ".into())), config.server_url);
    assert_eq!(config.server_url_with(None), config.server_url);
}
