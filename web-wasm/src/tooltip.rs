//! Bootstrapツールチップ
//!
//! グローバル `bootstrap.Tooltip` コンストラクタがあれば使う。

use js_sys::{Array, Function, Reflect};
use shiptrack_ui_common::TooltipProvider;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

pub struct BootstrapTooltips {
    constructor: Function,
}

impl BootstrapTooltips {
    /// `bootstrap.Tooltip` が関数として存在するか確認する
    pub fn detect() -> Option<Self> {
        let bootstrap = Reflect::get(&js_sys::global(), &JsValue::from_str("bootstrap")).ok()?;
        if bootstrap.is_undefined() || bootstrap.is_null() {
            return None;
        }
        let constructor = Reflect::get(&bootstrap, &JsValue::from_str("Tooltip")).ok()?;
        constructor.dyn_into::<Function>().ok().map(|constructor| Self { constructor })
    }
}

impl TooltipProvider for BootstrapTooltips {
    type Element = Element;
    type Error = JsValue;

    fn attach(&self, element: &Element) -> Result<(), JsValue> {
        Reflect::construct(&self.constructor, &Array::of1(element)).map(|_| ())
    }
}
