//! Virtual clock driving interval timers.

use std::fmt;
use std::time::Duration;

use crate::dom::{Document, DomError};

/// Shortest interval a timer can be scheduled with.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Whether a timer keeps running after it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerControl {
    Continue,
    Cancel,
}

/// Work run each time an interval elapses.
pub trait TimerTask: fmt::Debug + Send {
    fn fire(&mut self, doc: &mut Document) -> Result<TimerControl, DomError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Timer {
    id: TimerId,
    interval: Duration,
    due: Duration,
    task: Box<dyn TimerTask>,
}

/// Interval timers against a clock that only moves when advanced.
///
/// Timers due at the same instant fire in the order they were set.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the session opened.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Run `task` every `interval`, first firing one interval from now.
    pub fn set_interval(&mut self, interval: Duration, task: Box<dyn TimerTask>) -> TimerId {
        let interval = interval.max(MIN_INTERVAL);
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            interval,
            due: self.now + interval,
            task,
        });
        id
    }

    pub fn clear(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Move the clock forward by `by`, firing every timer that falls due.
    ///
    /// A failing task is removed and its error returned; the clock stops at
    /// the failing tick.
    pub fn advance(&mut self, by: Duration, doc: &mut Document) -> Result<usize, DomError> {
        let until = self.now + by;
        let mut fired = 0;

        while let Some(index) = self.next_due(until) {
            let timer = &mut self.timers[index];
            self.now = timer.due;
            fired += 1;

            match timer.task.fire(doc) {
                Ok(TimerControl::Continue) => timer.due += timer.interval,
                Ok(TimerControl::Cancel) => {
                    self.timers.remove(index);
                }
                Err(e) => {
                    self.timers.remove(index);
                    return Err(e);
                }
            }
        }

        self.now = until;
        Ok(fired)
    }

    fn next_due(&self, until: Duration) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i)
    }
}
