//! CLIテスト
//!
//! ビルド済みバイナリを起動して設定サブコマンドを検証

use shiptrack_ui_common::UiConfig;
use std::process::Command;
use tempfile::tempdir;

fn shiptrack_ui() -> Command {
    Command::new(env!("CARGO_BIN_EXE_shiptrack-ui"))
}

/// 明示したパスにまだ無い設定ファイルを作成できる
#[test]
fn test_config_init_creates_explicit_path() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let output = shiptrack_ui()
        .arg("--config")
        .arg(&path)
        .args(["config", "--init"])
        .output()
        .expect("起動失敗");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(path.exists());

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(UiConfig::from_json(&content).unwrap(), UiConfig::default());
}

/// 作成直後に --show で内容を表示できる
#[test]
fn test_config_init_and_show() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");

    let output = shiptrack_ui()
        .arg("--config")
        .arg(&path)
        .args(["config", "--init", "--show"])
        .output()
        .expect("起動失敗");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("progressBarContainer"), "{}", stdout);
}

/// 既存の設定ファイルは上書きしない
#[test]
fn test_config_init_keeps_existing_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"hideDelayMs": 1500}"#).unwrap();

    let output = shiptrack_ui()
        .arg("--config")
        .arg(&path)
        .args(["config", "--init"])
        .output()
        .expect("起動失敗");

    assert!(output.status.success());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"hideDelayMs": 1500}"#);
}

/// 明示したパスが無いまま他のコマンドを使うとエラー
#[test]
fn test_missing_explicit_config_fails_check() {
    let dir = tempdir().expect("Failed to create temp dir");
    let template = dir.path().join("base.html");
    std::fs::write(&template, "<p></p>").unwrap();

    let output = shiptrack_ui()
        .arg("--config")
        .arg(dir.path().join("none.json"))
        .arg("check")
        .arg(&template)
        .output()
        .expect("起動失敗");

    assert!(!output.status.success());
}
