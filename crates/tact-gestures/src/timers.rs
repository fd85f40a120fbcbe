//! Timer slots
//!
//! Four named cancellable deadlines. Each kind holds at most one
//! outstanding deadline; scheduling replaces any previous one. Deadlines
//! are plain millisecond timestamps compared against the caller's clock,
//! so firing order is fully deterministic.

/// The kinds of deferred work the recognizer schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Stationary-hold classification (long delay)
    LongTap,
    /// Zero-delay end-of-contact tick, so an external cancel can win the race
    TapTick,
    /// Delayed single-tap confirmation
    TapConfirm,
    /// Zero-delay swipe classification
    Swipe,
}

const ALL_KINDS: [TimerKind; 4] = [
    TimerKind::LongTap,
    TimerKind::TapTick,
    TimerKind::TapConfirm,
    TimerKind::Swipe,
];

/// One deadline slot per timer kind
#[derive(Debug, Default)]
pub struct TimerSet {
    long_tap: Option<u64>,
    tap_tick: Option<u64>,
    tap_confirm: Option<u64>,
    swipe: Option<u64>,
}

impl TimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, kind: TimerKind) -> &Option<u64> {
        match kind {
            TimerKind::LongTap => &self.long_tap,
            TimerKind::TapTick => &self.tap_tick,
            TimerKind::TapConfirm => &self.tap_confirm,
            TimerKind::Swipe => &self.swipe,
        }
    }

    fn slot_mut(&mut self, kind: TimerKind) -> &mut Option<u64> {
        match kind {
            TimerKind::LongTap => &mut self.long_tap,
            TimerKind::TapTick => &mut self.tap_tick,
            TimerKind::TapConfirm => &mut self.tap_confirm,
            TimerKind::Swipe => &mut self.swipe,
        }
    }

    /// Arm a slot, replacing any outstanding deadline of the same kind
    pub fn schedule(&mut self, kind: TimerKind, deadline_ms: u64) {
        *self.slot_mut(kind) = Some(deadline_ms);
    }

    /// Disarm one slot
    pub fn cancel(&mut self, kind: TimerKind) {
        *self.slot_mut(kind) = None;
    }

    /// Disarm every slot
    pub fn cancel_all(&mut self) {
        for kind in ALL_KINDS {
            self.cancel(kind);
        }
    }

    /// Whether a slot is armed
    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.slot(kind).is_some()
    }

    /// Number of armed slots
    pub fn outstanding(&self) -> usize {
        ALL_KINDS.iter().filter(|&&k| self.is_scheduled(k)).count()
    }

    /// Earliest armed deadline, if any
    pub fn next_deadline(&self) -> Option<u64> {
        ALL_KINDS.iter().filter_map(|&k| *self.slot(k)).min()
    }

    /// Disarm and return every slot whose deadline has been reached,
    /// earliest deadline first
    pub fn take_due(&mut self, now_ms: u64) -> Vec<TimerKind> {
        let mut due: Vec<(u64, TimerKind)> = Vec::new();
        for kind in ALL_KINDS {
            if let Some(deadline) = *self.slot(kind) {
                if deadline <= now_ms {
                    self.cancel(kind);
                    due.push((deadline, kind));
                }
            }
        }
        due.sort_by_key(|&(deadline, _)| deadline);
        due.into_iter().map(|(_, kind)| kind).collect()
    }
}
