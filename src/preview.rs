//! プログレスバーのターミナルプレビュー
//!
//! 進捗値の列を時刻つきで再生し、コンテナの表示/非表示の推移を記録する。
//! タイマーは仮想時計で管理し、`instant` でなければ実時間に合わせて進める。

use crate::error::{ShipTrackError, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use shiptrack_ui_common::{
    BarElement, ContainerElement, ElementLookup, ManualScheduler, ProgressIndicator, UiConfig,
    Visibility,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

/// 時刻を省略したステップの間隔（ms）
pub const DEFAULT_STEP_GAP_MS: u64 = 250;

/// `PERCENT` または `PERCENT@MS`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewStep {
    pub percentage: f64,
    pub at_ms: Option<u64>,
}

impl FromStr for PreviewStep {
    type Err = ShipTrackError;

    fn from_str(s: &str) -> Result<Self> {
        let (value, at) = match s.split_once('@') {
            Some((value, at)) => (value, Some(at)),
            None => (s, None),
        };

        let percentage: f64 = value
            .trim()
            .parse()
            .map_err(|_| ShipTrackError::InvalidStep(format!("進捗値が数値ではありません: {}", s)))?;

        let at_ms = at
            .map(|at| {
                at.trim()
                    .trim_end_matches("ms")
                    .parse::<u64>()
                    .map_err(|_| ShipTrackError::InvalidStep(format!("時刻が不正です: {}", s)))
            })
            .transpose()?;

        Ok(Self { percentage, at_ms })
    }
}

/// 時刻の確定したステップ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledStep {
    pub at_ms: u64,
    pub percentage: f64,
}

/// 省略された時刻を補い、時刻順になっているか確認する
pub fn resolve_steps(steps: &[PreviewStep]) -> Result<Vec<ScheduledStep>> {
    let mut resolved: Vec<ScheduledStep> = Vec::with_capacity(steps.len());

    for step in steps {
        let previous = resolved.last().map(|s| s.at_ms);
        let at_ms = match (step.at_ms, previous) {
            (Some(at), Some(prev)) if at < prev => {
                return Err(ShipTrackError::InvalidStep(format!(
                    "時刻が前のステップより前です: {}ms < {}ms",
                    at, prev
                )));
            }
            (Some(at), _) => at,
            (None, Some(prev)) => prev + DEFAULT_STEP_GAP_MS,
            (None, None) => 0,
        };
        resolved.push(ScheduledStep {
            at_ms,
            percentage: step.percentage,
        });
    }

    Ok(resolved)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEntry {
    pub at_ms: u64,
    pub visibility: Visibility,
    pub percentage: u8,
}

#[derive(Debug, Clone)]
pub struct PreviewReport {
    pub timeline: Vec<TimelineEntry>,
    pub final_visibility: Visibility,
    pub final_percentage: u8,
    pub elapsed_ms: u64,
}

struct ViewState {
    visibility: Visibility,
    percentage: u8,
    timeline: Vec<TimelineEntry>,
}

/// ターミナル上のバー兼コンテナ
#[derive(Clone)]
pub struct TerminalView {
    bar: ProgressBar,
    clock: ManualScheduler,
    draw: bool,
    state: Rc<RefCell<ViewState>>,
}

impl TerminalView {
    pub fn new(clock: ManualScheduler, draw: bool) -> Self {
        let bar = ProgressBar::with_draw_target(Some(100), ProgressDrawTarget::hidden());
        let style = ProgressStyle::with_template("{bar:40.cyan/blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);

        Self {
            bar,
            clock,
            draw,
            state: Rc::new(RefCell::new(ViewState {
                // 初期マークアップは display: none
                visibility: Visibility::Hidden,
                percentage: 0,
                timeline: Vec::new(),
            })),
        }
    }

    fn record(&self, state: &mut ViewState) {
        state.timeline.push(TimelineEntry {
            at_ms: self.clock.now_ms(),
            visibility: state.visibility,
            percentage: state.percentage,
        });
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl BarElement for TerminalView {
    fn set_width(&self, percentage: u8) {
        self.bar.set_position(u64::from(percentage));
        let mut state = self.state.borrow_mut();
        state.percentage = percentage;
        self.record(&mut state);
    }

    fn set_label(&self, label: &str) {
        self.bar.set_message(label.to_string());
    }
}

impl ContainerElement for TerminalView {
    fn set_visibility(&self, visibility: Visibility) {
        let mut state = self.state.borrow_mut();
        if state.visibility == visibility {
            return;
        }
        state.visibility = visibility;

        match visibility {
            Visibility::Shown if self.draw => self.bar.set_draw_target(ProgressDrawTarget::stderr()),
            Visibility::Shown => {}
            Visibility::Hidden => {
                self.bar.set_draw_target(ProgressDrawTarget::hidden());
                self.record(&mut state);
            }
        }
    }
}

impl ElementLookup for TerminalView {
    type Bar = TerminalView;
    type Container = TerminalView;

    fn bar(&self, _id: &str) -> Option<TerminalView> {
        Some(self.clone())
    }

    fn container(&self, _id: &str) -> Option<TerminalView> {
        Some(self.clone())
    }
}

/// ステップを再生する
///
/// 最後のステップの後も、保留中の非表示がすべて実行されるまで進める。
pub async fn run_preview(
    steps: &[ScheduledStep],
    config: &UiConfig,
    instant: bool,
    draw: bool,
) -> PreviewReport {
    let clock = ManualScheduler::new();
    let view = TerminalView::new(clock.clone(), draw);
    let indicator = ProgressIndicator::new(view.clone(), clock.clone(), config);
    let started = tokio::time::Instant::now();

    let mut next = 0;
    loop {
        let next_step = steps.get(next).map(|s| s.at_ms);
        let Some(target) = [next_step, clock.next_due()].into_iter().flatten().min() else {
            break;
        };

        if !instant {
            tokio::time::sleep_until(started + Duration::from_millis(target)).await;
        }
        clock.advance_to(target);

        if let Some(step) = steps.get(next).filter(|s| s.at_ms == target) {
            indicator.update(step.percentage);
            next += 1;
        }
    }

    view.finish();

    let state = view.state.borrow();
    PreviewReport {
        timeline: state.timeline.clone(),
        final_visibility: state.visibility,
        final_percentage: state.percentage,
        elapsed_ms: clock.now_ms(),
    }
}
