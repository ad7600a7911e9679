//! Cancellable scheduled callbacks.
//!
//! The game never sleeps: every delay (mismatch reveal, win pause, kids-mode reveal,
//! resize debounce) is an entry here keyed by a [`TimerHandle`]. The browser arms a real
//! timeout per handle and calls back with [`Timers::take`]; tests drive a manual clock
//! with [`Timers::drain_due`]. A handle that was cancelled yields nothing, so a stale
//! callback from a torn-down game cannot act.

use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerAction {
    MismatchRevert,
    WinNotify,
    TrainingConceal,
    ResizeDebounce,
}

#[derive(Clone, Copy, Debug)]
pub struct Scheduled {
    pub action: TimerAction,
    pub due_ms: f64,
}

#[derive(Debug, Default)]
pub struct Timers {
    next_id: u64,
    pending: BTreeMap<TimerHandle, Scheduled>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, action: TimerAction, delay_ms: u32, now_ms: f64) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.insert(
            handle,
            Scheduled {
                action,
                due_ms: now_ms + f64::from(delay_ms),
            },
        );
        handle
    }

    /// Returns false when the handle already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("cancelling {} pending timers", self.pending.len());
        }
        self.pending.clear();
    }

    /// Remove and return the action of a fired handle.
    pub fn take(&mut self, handle: TimerHandle) -> Option<TimerAction> {
        self.pending.remove(&handle).map(|s| s.action)
    }

    /// Remove every entry due at `now_ms`, earliest first (ties in schedule order).
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<(TimerHandle, TimerAction)> {
        let mut due: Vec<(TimerHandle, Scheduled)> = self
            .pending
            .iter()
            .filter(|(_, s)| s.due_ms <= now_ms)
            .map(|(h, s)| (*h, *s))
            .collect();
        due.sort_by(|a, b| a.1.due_ms.total_cmp(&b.1.due_ms).then(a.0.cmp(&b.0)));
        for (handle, _) in &due {
            self.pending.remove(handle);
        }
        due.into_iter().map(|(h, s)| (h, s.action)).collect()
    }

    pub fn next_due(&self) -> Option<f64> {
        self.pending.values().map(|s| s.due_ms).min_by(f64::total_cmp)
    }

    pub fn pending(&self) -> impl Iterator<Item = (TimerHandle, &Scheduled)> {
        self.pending.iter().map(|(h, s)| (*h, s))
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_due_order() {
        let mut t = Timers::new();
        let late = t.schedule(TimerAction::WinNotify, 500, 0.0);
        let early = t.schedule(TimerAction::MismatchRevert, 100, 0.0);
        assert_eq!(t.next_due(), Some(100.0));
        assert!(t.drain_due(50.0).is_empty());
        assert_eq!(
            t.drain_due(1000.0),
            vec![(early, TimerAction::MismatchRevert), (late, TimerAction::WinNotify)]
        );
        assert!(t.is_empty());
    }

    #[test]
    fn cancelled_handles_never_fire() {
        let mut t = Timers::new();
        let h = t.schedule(TimerAction::ResizeDebounce, 250, 10.0);
        assert!(t.cancel(h));
        assert!(!t.cancel(h));
        assert_eq!(t.take(h), None);
        assert!(t.drain_due(10_000.0).is_empty());
    }

    #[test]
    fn cancel_all_clears_everything() {
        let mut t = Timers::new();
        let a = t.schedule(TimerAction::TrainingConceal, 3000, 0.0);
        t.schedule(TimerAction::MismatchRevert, 600, 0.0);
        t.cancel_all();
        assert!(t.is_empty());
        assert!(!t.is_pending(a));
        // Fresh handles keep counting up and never alias old ones.
        let b = t.schedule(TimerAction::WinNotify, 1, 0.0);
        assert_ne!(a, b);
    }

    #[test]
    fn take_fires_once() {
        let mut t = Timers::new();
        let h = t.schedule(TimerAction::WinNotify, 500, 0.0);
        assert_eq!(t.take(h), Some(TimerAction::WinNotify));
        assert_eq!(t.take(h), None);
    }
}
