//! ページ初期化
//!
//! - ツールチップ（提供元がある場合のみ）
//! - ページ内リンクのスムーススクロール

use gloo::events::{EventListener, EventListenerOptions};
use shiptrack_ui_common::{activate_tooltips, handle_anchor_click, is_fragment_link, AnchorOutcome, UiConfig};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::scroll::DomScrollSurface;
use crate::tooltip::BootstrapTooltips;

/// ページを拡張し、登録したリスナーを返す
///
/// リスナーはドロップで解除される。
pub fn enhance_page(document: &Document, config: &UiConfig) -> Vec<EventListener> {
    gloo::console::log!("ShipTrack Pro initialized");

    activate_page_tooltips(document, config);
    bind_anchor_links(document, config)
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    match document.query_selector_all(selector) {
        Ok(nodes) => (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
        Err(e) => {
            gloo::console::warn!(format!("ShipTrack UI: invalid selector {}", selector), e);
            Vec::new()
        }
    }
}

/// 有効化したツールチップ数を返す
pub fn activate_page_tooltips(document: &Document, config: &UiConfig) -> usize {
    let Some(provider) = BootstrapTooltips::detect() else {
        gloo::console::debug!("ShipTrack UI: tooltip provider not found, skipping");
        return 0;
    };

    let triggers = query_all(document, &config.tooltip_selector);
    let Some(report) = activate_tooltips(Some(&provider), triggers) else {
        return 0;
    };

    for error in report.errors {
        gloo::console::warn!("ShipTrack UI: tooltip init failed", error);
    }
    report.activated
}

/// `href` が `#` で始まるリンクのクリックを横取りする
pub fn bind_anchor_links(document: &Document, config: &UiConfig) -> Vec<EventListener> {
    let behavior = config.scroll_behavior;

    query_all(document, &config.anchor_selector)
        .into_iter()
        .filter(|anchor| {
            anchor
                .get_attribute("href")
                .is_some_and(|href| is_fragment_link(&href))
        })
        .map(|anchor| {
            let surface = DomScrollSurface::new(document.clone());
            let target = anchor.clone();
            EventListener::new_with_options(
                &anchor,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let href = target.get_attribute("href").unwrap_or_default();
                    if handle_anchor_click(&surface, &href, behavior) == AnchorOutcome::NoTarget {
                        gloo::console::debug!(format!("ShipTrack UI: no scroll target for {}", href));
                    }
                },
            )
        })
        .collect()
}
