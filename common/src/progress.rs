//! プログレスバー
//!
//! バーとコンテナの要素は毎回 [`ElementLookup`] から取得する。
//! どちらかが無ければ何もしない。100% に達したら遅延後にコンテナを隠す。

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::UiConfig;
use crate::schedule::Scheduler;

/// コンテナの表示状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

impl Visibility {
    /// CSS `display` の値
    pub fn display_value(&self) -> &'static str {
        match self {
            Visibility::Shown => "block",
            Visibility::Hidden => "none",
        }
    }
}

/// 描画直後の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressState {
    pub visibility: Visibility,
    pub percentage: u8,
}

impl ProgressState {
    /// バーに表示するラベル（例: `"42%"`）
    pub fn label(&self) -> String {
        format!("{}%", self.percentage)
    }

    pub fn is_complete(&self) -> bool {
        self.percentage == 100
    }
}

/// 自動非表示タイマーの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HidePolicy {
    /// 保留中の非表示は次の更新で取り消す
    #[default]
    CancelOnUpdate,
    /// 100% のたびに独立したタイマーを登録し、取り消さない
    Untracked,
}

/// バー要素（幅とラベル）
pub trait BarElement {
    fn set_width(&self, percentage: u8);
    fn set_label(&self, label: &str);
}

/// バーを包むコンテナ要素
pub trait ContainerElement {
    fn set_visibility(&self, visibility: Visibility);
}

/// IDから要素を引く
pub trait ElementLookup {
    type Bar: BarElement;
    type Container: ContainerElement + 'static;

    fn bar(&self, id: &str) -> Option<Self::Bar>;
    fn container(&self, id: &str) -> Option<Self::Container>;
}

/// `update` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// 要素が見つからず何もしなかった
    Skipped,
    /// 数値として扱えない入力（NaN/無限大）
    Ignored,
    Rendered {
        state: ProgressState,
        hide_scheduled: bool,
    },
}

/// 入力値を 0..=100 の整数に丸める
///
/// 非有限値は `None`。
pub fn normalize_percentage(value: f64) -> Option<u8> {
    if !value.is_finite() {
        return None;
    }
    Some(value.round().clamp(0.0, 100.0) as u8)
}

/// プログレスバー本体
pub struct ProgressIndicator<L: ElementLookup, S: Scheduler> {
    lookup: L,
    scheduler: S,
    bar_id: String,
    container_id: String,
    hide_delay_ms: u32,
    policy: HidePolicy,
    pending_hide: RefCell<Option<S::Handle>>,
    outstanding: Rc<Cell<usize>>,
}

impl<L: ElementLookup, S: Scheduler> ProgressIndicator<L, S> {
    pub fn new(lookup: L, scheduler: S, config: &UiConfig) -> Self {
        Self {
            lookup,
            scheduler,
            bar_id: config.bar_id.clone(),
            container_id: config.container_id.clone(),
            hide_delay_ms: config.hide_delay_ms,
            policy: config.hide_policy,
            pending_hide: RefCell::new(None),
            outstanding: Rc::new(Cell::new(0)),
        }
    }

    pub fn policy(&self) -> HidePolicy {
        self.policy
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// 実行待ちの非表示タイマー数
    pub fn pending_hides(&self) -> usize {
        self.outstanding.get()
    }

    /// プログレスバーを更新する
    pub fn update(&self, percentage: f64) -> UpdateOutcome {
        let Some(percentage) = normalize_percentage(percentage) else {
            return UpdateOutcome::Ignored;
        };

        let (Some(bar), Some(container)) = (
            self.lookup.bar(&self.bar_id),
            self.lookup.container(&self.container_id),
        ) else {
            return UpdateOutcome::Skipped;
        };

        if self.policy == HidePolicy::CancelOnUpdate {
            self.cancel_pending_hide();
        }

        let state = ProgressState {
            visibility: Visibility::Shown,
            percentage,
        };
        container.set_visibility(state.visibility);
        bar.set_width(percentage);
        bar.set_label(&state.label());

        let hide_scheduled = state.is_complete();
        if hide_scheduled {
            self.schedule_hide(container);
        }

        UpdateOutcome::Rendered {
            state,
            hide_scheduled,
        }
    }

    /// 保留中の非表示を取り消す（`CancelOnUpdate` のみ追跡される）
    pub fn cancel_pending_hide(&self) -> bool {
        match self.pending_hide.borrow_mut().take() {
            Some(handle) => {
                self.scheduler.cancel(handle);
                if self.outstanding.get() > 0 {
                    self.outstanding.set(self.outstanding.get() - 1);
                }
                true
            }
            None => false,
        }
    }

    fn schedule_hide(&self, container: L::Container) {
        let outstanding = self.outstanding.clone();
        let handle = self.scheduler.schedule(
            self.hide_delay_ms,
            Box::new(move || {
                container.set_visibility(Visibility::Hidden);
                outstanding.set(outstanding.get().saturating_sub(1));
            }),
        );
        self.outstanding.set(self.outstanding.get() + 1);

        match self.policy {
            HidePolicy::CancelOnUpdate => {
                // 発火済みハンドルの取り消しは無害
                *self.pending_hide.borrow_mut() = Some(handle);
            }
            HidePolicy::Untracked => self.scheduler.detach(handle),
        }
    }
}
