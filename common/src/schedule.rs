//! 遅延アクションのスケジューラ
//!
//! ブラウザではタイマー（setTimeout相当）、CLIプレビューとテストでは
//! 仮想時計 [`ManualScheduler`] を使う。

use std::cell::RefCell;
use std::rc::Rc;

/// 一度だけ実行される遅延アクション
pub type Action = Box<dyn FnOnce()>;

/// 遅延アクションの登録先
///
/// シングルスレッド前提（イベントループ上で実行される）。
pub trait Scheduler {
    /// 登録したアクションのハンドル
    type Handle;

    /// `delay_ms` 経過後に `action` を一度だけ実行する
    fn schedule(&self, delay_ms: u32, action: Action) -> Self::Handle;

    /// 未実行のアクションを取り消す（実行済みなら何もしない）
    fn cancel(&self, handle: Self::Handle);

    /// ハンドルを手放し、取り消し不能なまま実行させる
    fn detach(&self, handle: Self::Handle);
}

/// [`ManualScheduler`] のタイマーID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct PendingAction {
    id: u64,
    due_ms: u64,
    action: Action,
}

#[derive(Default)]
struct ManualState {
    now_ms: u64,
    next_id: u64,
    queue: Vec<PendingAction>,
}

/// 仮想時計で進むスケジューラ
///
/// `advance` / `advance_to` を呼ぶまで何も実行されない。
/// 同時刻のアクションは登録順に実行される。
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在の仮想時刻（ms）
    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// 未実行アクション数
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// 次に実行されるアクションの予定時刻
    pub fn next_due(&self) -> Option<u64> {
        self.state.borrow().queue.iter().map(|p| p.due_ms).min()
    }

    /// `ms` だけ時計を進め、期限が来たアクションを実行する
    pub fn advance(&self, ms: u64) -> usize {
        let target = self.now_ms().saturating_add(ms);
        self.advance_to(target)
    }

    /// 時計を `target_ms` まで進め、期限が来たアクションを実行する
    ///
    /// 過去の時刻を指定した場合は時計を戻さない。戻り値は実行数。
    pub fn advance_to(&self, target_ms: u64) -> usize {
        let mut fired = 0;
        loop {
            // アクション実行中に再登録されるため、借用はここで手放す
            let next = {
                let mut state = self.state.borrow_mut();
                let position = state
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due_ms <= target_ms)
                    .min_by_key(|(_, p)| (p.due_ms, p.id))
                    .map(|(i, _)| i);
                match position {
                    Some(i) => {
                        let pending = state.queue.remove(i);
                        state.now_ms = state.now_ms.max(pending.due_ms);
                        Some(pending.action)
                    }
                    None => {
                        state.now_ms = state.now_ms.max(target_ms);
                        None
                    }
                }
            };

            match next {
                Some(action) => {
                    action();
                    fired += 1;
                }
                None => return fired,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = TimerId;

    fn schedule(&self, delay_ms: u32, action: Action) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let due_ms = state.now_ms + u64::from(delay_ms);
        state.queue.push(PendingAction { id, due_ms, action });
        TimerId(id)
    }

    fn cancel(&self, handle: TimerId) {
        self.state.borrow_mut().queue.retain(|p| p.id != handle.0);
    }

    fn detach(&self, _handle: TimerId) {
        // キューが所有しているので何もしない
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, Action) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (count, Box::new(move || c.set(c.get() + 1)))
    }

    #[test]
    fn test_action_runs_only_after_delay() {
        let scheduler = ManualScheduler::new();
        let (count, action) = counter();
        scheduler.schedule(1000, action);

        assert_eq!(scheduler.advance(999), 0);
        assert_eq!(count.get(), 0);
        assert_eq!(scheduler.advance(1), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_cancel_removes_pending_action() {
        let scheduler = ManualScheduler::new();
        let (count, action) = counter();
        let id = scheduler.schedule(500, action);
        scheduler.cancel(id);

        assert_eq!(scheduler.advance(1000), 0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_cancel_after_fire_is_noop() {
        let scheduler = ManualScheduler::new();
        let (count, action) = counter();
        let id = scheduler.schedule(10, action);
        scheduler.advance(10);
        scheduler.cancel(id);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_same_due_time_runs_in_registration_order() {
        let scheduler = ManualScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for label in ["a", "b", "c"] {
            let order = order.clone();
            scheduler.schedule(100, Box::new(move || order.borrow_mut().push(label)));
        }
        scheduler.advance(100);
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_action_can_schedule_follow_up() {
        let scheduler = ManualScheduler::new();
        let (count, follow_up) = counter();
        let inner = scheduler.clone();
        scheduler.schedule(
            100,
            Box::new(move || {
                inner.schedule(100, follow_up);
            }),
        );

        assert_eq!(scheduler.advance_to(150), 1);
        assert_eq!(scheduler.next_due(), Some(200));
        assert_eq!(scheduler.advance_to(200), 1);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let scheduler = ManualScheduler::new();
        scheduler.advance_to(500);
        scheduler.advance_to(100);
        assert_eq!(scheduler.now_ms(), 500);
    }
}
