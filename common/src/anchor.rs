//! ページ内リンクのスムーススクロール
//!
//! `href="#id"` のクリックは常に既定の遷移を止める（呼び出し側の責務）。
//! 対象要素があればスクロールし、無ければ何もしない。

use serde::{Deserialize, Serialize};

/// スクロールの挙動（`scrollIntoView` の `behavior`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollBehavior {
    Auto,
    #[default]
    Smooth,
    Instant,
}

impl ScrollBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollBehavior::Auto => "auto",
            ScrollBehavior::Smooth => "smooth",
            ScrollBehavior::Instant => "instant",
        }
    }
}

/// スクロール先を探し、スクロールさせる面
pub trait ScrollSurface {
    type Target;

    fn find_by_id(&self, id: &str) -> Option<Self::Target>;
    fn scroll_into_view(&self, target: &Self::Target, behavior: ScrollBehavior);
}

/// クリック処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorOutcome {
    Scrolled(String),
    NoTarget,
}

/// `a[href^="#"]` に該当するか
pub fn is_fragment_link(href: &str) -> bool {
    href.starts_with('#')
}

/// フラグメントのID部分（`"#"` 単体や非フラグメントは `None`）
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// リンクのクリックを処理する
pub fn handle_anchor_click<S: ScrollSurface>(
    surface: &S,
    href: &str,
    behavior: ScrollBehavior,
) -> AnchorOutcome {
    let Some(id) = fragment_id(href) else {
        return AnchorOutcome::NoTarget;
    };

    match surface.find_by_id(id) {
        Some(target) => {
            surface.scroll_into_view(&target, behavior);
            AnchorOutcome::Scrolled(id.to_string())
        }
        None => AnchorOutcome::NoTarget,
    }
}
