//! ブラウザのタイマー（gloo）

use gloo::timers::callback::Timeout;
use shiptrack_ui_common::{Action, Scheduler};

/// `setTimeout` によるスケジューラ
///
/// `Timeout` はドロップで取り消され、`forget` で切り離される。
#[derive(Clone, Copy, Default)]
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, action: Action) -> Timeout {
        Timeout::new(delay_ms, move || action())
    }

    fn cancel(&self, handle: Timeout) {
        drop(handle.cancel());
    }

    fn detach(&self, handle: Timeout) {
        let _ = handle.forget();
    }
}
