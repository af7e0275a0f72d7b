//! JS側から渡される設定
//!
//! `window.SHIPTRACK_UI_CONFIG` もしくは `init(config)` の引数を読む。
//! 読めない場合は警告を出して既定値を使う。

use js_sys::Reflect;
use shiptrack_ui_common::UiConfig;
use wasm_bindgen::JsValue;

pub const GLOBAL_CONFIG_KEY: &str = "SHIPTRACK_UI_CONFIG";

pub fn from_js(value: JsValue) -> UiConfig {
    if value.is_undefined() || value.is_null() {
        return UiConfig::default();
    }

    let config: UiConfig = match serde_wasm_bindgen::from_value(value) {
        Ok(config) => config,
        Err(e) => {
            gloo::console::warn!(format!("ShipTrack UI: invalid config, using defaults ({})", e));
            return UiConfig::default();
        }
    };

    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            gloo::console::warn!(format!("ShipTrack UI: invalid config, using defaults ({})", e));
            UiConfig::default()
        }
    }
}

pub fn from_global() -> UiConfig {
    let value = Reflect::get(&js_sys::global(), &JsValue::from_str(GLOBAL_CONFIG_KEY))
        .unwrap_or(JsValue::UNDEFINED);
    from_js(value)
}
