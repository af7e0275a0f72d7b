//! ShipTrack UI enhancements (WASM)
//!
//! JSへ公開する関数:
//! - `updateProgressBar(percentage)`
//! - `init(config?)`

mod config;
mod dom;
mod page;
mod scroll;
mod timer;
mod tooltip;

pub use dom::{DomElement, DomLookup};
pub use page::{activate_page_tooltips, bind_anchor_links, enhance_page};
pub use scroll::DomScrollSurface;
pub use timer::GlooScheduler;
pub use tooltip::BootstrapTooltips;

use gloo::events::EventListener;
use shiptrack_ui_common::{ProgressIndicator, UiConfig, UpdateOutcome};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

/// ページごとの状態
struct Runtime {
    config: UiConfig,
    indicator: ProgressIndicator<DomLookup, GlooScheduler>,
    listeners: Vec<EventListener>,
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    install(config::from_global());
}

/// 設定を差し替えて再初期化する
///
/// 以前のリスナーと保留中の非表示タイマーは破棄される。
#[wasm_bindgen]
pub fn init(config: JsValue) {
    install(config::from_js(config));
}

/// プログレスバーを更新する
#[wasm_bindgen(js_name = updateProgressBar)]
pub fn update_progress_bar(percentage: f64) {
    let outcome = RUNTIME.with(|runtime| {
        runtime
            .borrow()
            .as_ref()
            .map(|runtime| runtime.indicator.update(percentage))
    });

    match outcome {
        Some(UpdateOutcome::Rendered { .. }) => {}
        Some(UpdateOutcome::Skipped) | None => {
            gloo::console::debug!("ShipTrack UI: progress bar markup not found");
        }
        Some(UpdateOutcome::Ignored) => {
            gloo::console::debug!(format!("ShipTrack UI: ignored progress value {}", percentage));
        }
    }
}

fn install(config: UiConfig) {
    let Some(lookup) = DomLookup::current() else {
        gloo::console::warn!("ShipTrack UI: no document available");
        return;
    };
    let document = lookup.document().clone();

    let runtime = Runtime {
        indicator: ProgressIndicator::new(lookup, GlooScheduler, &config),
        config,
        listeners: Vec::new(),
    };
    // 古いRuntimeはここでドロップされる
    RUNTIME.with(|slot| *slot.borrow_mut() = Some(runtime));

    if document.ready_state() == "loading" {
        let listener = EventListener::once(&document, "DOMContentLoaded", |_| enhance());
        RUNTIME.with(|slot| {
            if let Some(runtime) = slot.borrow_mut().as_mut() {
                runtime.listeners.push(listener);
            }
        });
    } else {
        enhance();
    }
}

fn enhance() {
    RUNTIME.with(|slot| {
        if let Some(runtime) = slot.borrow_mut().as_mut() {
            let listeners = enhance_page(runtime.indicator.lookup().document(), &runtime.config);
            runtime.listeners.extend(listeners);
        }
    });
}
