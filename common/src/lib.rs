//! ShipTrack UI Common Library
//!
//! ブラウザ(WASM)とCLIで共有されるコア:
//! - ProgressIndicator: プログレスバーの表示更新と完了時の自動非表示
//! - anchor: ページ内リンクのスムーススクロール判定
//! - tooltip: ツールチップ提供元の有無を確認した初期化
//! - schedule: 遅延アクションのスケジューラ（仮想時計つき）

pub mod anchor;
pub mod config;
pub mod error;
pub mod progress;
pub mod schedule;
pub mod tooltip;

pub use anchor::{fragment_id, handle_anchor_click, is_fragment_link, AnchorOutcome, ScrollBehavior, ScrollSurface};
pub use config::UiConfig;
pub use error::{Error, Result};
pub use progress::{
    normalize_percentage, BarElement, ContainerElement, ElementLookup, HidePolicy, ProgressIndicator,
    ProgressState, UpdateOutcome, Visibility,
};
pub use schedule::{Action, ManualScheduler, Scheduler, TimerId};
pub use tooltip::{activate_tooltips, TooltipProvider, TooltipReport};
