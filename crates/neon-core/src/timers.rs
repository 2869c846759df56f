use fnv::FnvHashMap;
use std::time::Duration;

/// Identity of a deferred toggle. Scheduling the same id again replaces the
/// pending deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToggleId {
    Glitch,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledToggle {
    pub id: ToggleId,
    pub deadline: Duration,
    pub value: bool,
}

/// Cancelable deferred toggles polled from the frame tick.
#[derive(Clone, Debug, Default)]
pub struct ToggleTimers {
    pending: FnvHashMap<ToggleId, ScheduledToggle>,
}

impl ToggleTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending toggle with this id and submit a new one.
    pub fn schedule(&mut self, id: ToggleId, deadline: Duration, value: bool) {
        if let Some(prev) = self.pending.insert(
            id,
            ScheduledToggle {
                id,
                deadline,
                value,
            },
        ) {
            log::debug!("[timers] {:?} rescheduled (was {:?})", id, prev.deadline);
        }
    }

    pub fn cancel(&mut self, id: ToggleId) -> Option<ScheduledToggle> {
        self.pending.remove(&id)
    }

    pub fn pending(&self, id: ToggleId) -> Option<&ScheduledToggle> {
        self.pending.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every toggle whose deadline is at or before `now`,
    /// earliest first.
    pub fn drain_due(&mut self, now: Duration) -> Vec<ScheduledToggle> {
        let mut due: Vec<ScheduledToggle> = self
            .pending
            .values()
            .filter(|t| t.deadline <= now)
            .copied()
            .collect();
        for t in &due {
            self.pending.remove(&t.id);
        }
        due.sort_by_key(|t| (t.deadline, t.id));
        due
    }
}
