use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShipTrackError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("テンプレートが見つかりません: {0}")]
    NoTemplatesFound(String),

    #[error("プレビューの指定が不正: {0}")]
    InvalidStep(String),

    #[error("マークアップ検査で{0}件の問題が見つかりました")]
    AuditFailed(usize),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<shiptrack_ui_common::Error> for ShipTrackError {
    fn from(error: shiptrack_ui_common::Error) -> Self {
        match error {
            shiptrack_ui_common::Error::Json(e) => ShipTrackError::JsonParse(e),
            shiptrack_ui_common::Error::Config(msg) => ShipTrackError::Config(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShipTrackError>;
