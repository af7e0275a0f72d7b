use crate::error::{ShipTrackError, Result};
use shiptrack_ui_common::UiConfig;
use std::path::{Path, PathBuf};

/// 設定を読み込む
///
/// `path` 指定時はそのファイル（無ければエラー）、未指定時は既定の場所
/// （無ければ既定値）。
pub fn load(path: Option<&Path>) -> Result<UiConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(ShipTrackError::FileNotFound(path.display().to_string()));
            }
            load_from(path)
        }
        None => {
            let path = config_path()?;
            if path.exists() {
                load_from(&path)
            } else {
                Ok(UiConfig::default())
            }
        }
    }
}

pub fn load_from(path: &Path) -> Result<UiConfig> {
    let content = std::fs::read_to_string(path)?;
    Ok(UiConfig::from_json(&content)?)
}

pub fn save(config: &UiConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, config.to_json_pretty()?)?;
    Ok(())
}

pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ShipTrackError::Config("ホームディレクトリが見つかりません".into()))?;
    Ok(home.join(".config").join("shiptrack-ui").join("config.json"))
}
