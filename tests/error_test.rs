//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use shiptrack_ui::error::ShipTrackError;
use shiptrack_ui::preview::PreviewStep;

/// ShipTrackErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ShipTrackError::Config("テスト設定エラー".to_string()),
        ShipTrackError::FileNotFound("base.html".to_string()),
        ShipTrackError::NoTemplatesFound("templates".to_string()),
        ShipTrackError::InvalidStep("abc".to_string()),
        ShipTrackError::AuditFailed(3),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty());
    }
}

#[test]
fn test_audit_failed_message_has_count() {
    let display = format!("{}", ShipTrackError::AuditFailed(2));
    assert!(display.contains('2'));
}

/// 共通ライブラリのエラーからの変換
#[test]
fn test_from_common_error() {
    let error: ShipTrackError = shiptrack_ui_common::Error::Config("barId が空です".to_string()).into();
    assert!(matches!(error, ShipTrackError::Config(msg) if msg.contains("barId")));

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: ShipTrackError = shiptrack_ui_common::Error::Json(json_error).into();
    assert!(matches!(error, ShipTrackError::JsonParse(_)));
}

/// 不正なプレビュー指定
#[test]
fn test_invalid_preview_step() {
    let err = "half".parse::<PreviewStep>().unwrap_err();
    assert!(format!("{}", err).contains("half"));
}
