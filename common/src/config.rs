//! UI設定
//!
//! JSON（camelCase）で読み書きする。欠けた項目は既定値で補う。

use serde::{Deserialize, Serialize};

use crate::anchor::ScrollBehavior;
use crate::error::{Error, Result};
use crate::progress::HidePolicy;

pub const DEFAULT_BAR_ID: &str = "progressBar";
pub const DEFAULT_CONTAINER_ID: &str = "progressBarContainer";
pub const DEFAULT_HIDE_DELAY_MS: u32 = 1000;
pub const DEFAULT_TOOLTIP_SELECTOR: &str = r#"[data-bs-toggle="tooltip"]"#;
pub const DEFAULT_ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;

/// 非表示までの遅延の上限（ms）
pub const MAX_HIDE_DELAY_MS: u32 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiConfig {
    pub bar_id: String,
    pub container_id: String,
    pub hide_delay_ms: u32,
    pub hide_policy: HidePolicy,
    pub tooltip_selector: String,
    pub anchor_selector: String,
    pub scroll_behavior: ScrollBehavior,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            bar_id: DEFAULT_BAR_ID.into(),
            container_id: DEFAULT_CONTAINER_ID.into(),
            hide_delay_ms: DEFAULT_HIDE_DELAY_MS,
            hide_policy: HidePolicy::default(),
            tooltip_selector: DEFAULT_TOOLTIP_SELECTOR.into(),
            anchor_selector: DEFAULT_ANCHOR_SELECTOR.into(),
            scroll_behavior: ScrollBehavior::default(),
        }
    }
}

impl UiConfig {
    /// JSON文字列から読み込み、検証する
    pub fn from_json(json: &str) -> Result<Self> {
        let config: UiConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("barId", &self.bar_id),
            ("containerId", &self.container_id),
            ("tooltipSelector", &self.tooltip_selector),
            ("anchorSelector", &self.anchor_selector),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{} が空です", name)));
            }
        }

        if self.bar_id == self.container_id {
            return Err(Error::Config(format!(
                "barId と containerId が同じです: {}",
                self.bar_id
            )));
        }

        if self.hide_delay_ms > MAX_HIDE_DELAY_MS {
            return Err(Error::Config(format!(
                "hideDelayMs が大きすぎます: {} (上限 {})",
                self.hide_delay_ms, MAX_HIDE_DELAY_MS
            )));
        }

        Ok(())
    }
}
