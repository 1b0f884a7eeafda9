//! Virtual-clock timer scheduler
//!
//! Replaces browser `setInterval`/`setTimeout` with explicit timers that
//! fire only when the owner advances the clock. Firing order is fully
//! deterministic: earliest due time first, ties broken by creation order.

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer<T> {
    id: TimerId,
    task: T,
    due_ms: u64,
    /// `Some` for repeating timers
    period_ms: Option<u64>,
}

/// Periodic and one-shot timers over a virtual millisecond clock
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    timers: Vec<Timer<T>>,
}

impl<T: Copy> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            timers: Vec::new(),
        }
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fire `task` every `period_ms`, first at `now + period_ms`.
    /// A zero period is treated as 1 ms.
    pub fn every(&mut self, period_ms: u64, task: T) -> TimerId {
        let period_ms = period_ms.max(1);
        self.insert(task, self.now_ms.saturating_add(period_ms), Some(period_ms))
    }

    /// Fire `task` once, `delay_ms` from now
    pub fn after(&mut self, delay_ms: u64, task: T) -> TimerId {
        self.insert(task, self.now_ms.saturating_add(delay_ms), None)
    }

    fn insert(&mut self, task: T, due_ms: u64, period_ms: Option<u64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            task,
            due_ms,
            period_ms,
        });
        id
    }

    /// Cancel a timer. Returns false if it already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Number of live timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Pop the next timer due at or before `until_ms`.
    ///
    /// Moves the clock to the timer's due time. Repeating timers are
    /// rescheduled one period later before the task is handed out, so a
    /// task that cancels its own timer stops future ticks only.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<T> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id.0))
            .map(|(idx, _)| idx)?;

        let timer = &mut self.timers[idx];
        let task = timer.task;
        self.now_ms = self.now_ms.max(timer.due_ms);
        match timer.period_ms {
            Some(period) => timer.due_ms += period,
            None => {
                self.timers.swap_remove(idx);
            }
        }
        Some(task)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}
