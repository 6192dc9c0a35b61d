//! Interval and debounce timers driven by host timestamps.
//!
//! The page owns the real clock (`requestAnimationFrame` / `setInterval`);
//! these types only decide whether a given timestamp fires.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

/// Fires once every `period_ms`, starting one period after `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    period_ms: f64,
    next_ms: Option<f64>,
}

impl Interval {
    /// A stopped interval.
    #[must_use]
    pub fn new(period_ms: f64) -> Self {
        Self { period_ms, next_ms: None }
    }

    pub fn start(&mut self, now_ms: f64) {
        self.next_ms = Some(now_ms + self.period_ms);
    }

    pub fn stop(&mut self) {
        self.next_ms = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next_ms.is_some()
    }

    /// True when a period has elapsed. A late poll fires once and schedules
    /// the next period from `now_ms`, so missed periods are not replayed.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.next_ms {
            Some(next) if now_ms >= next => {
                self.next_ms = Some(now_ms + self.period_ms);
                true
            }
            _ => false,
        }
    }
}

/// Fires once `delay_ms` after the most recent `trigger`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Debounce {
    delay_ms: f64,
    due_ms: Option<f64>,
}

impl Debounce {
    #[must_use]
    pub fn new(delay_ms: f64) -> Self {
        Self { delay_ms, due_ms: None }
    }

    /// Restart the quiet period.
    pub fn trigger(&mut self, now_ms: f64) {
        self.due_ms = Some(now_ms + self.delay_ms);
    }

    pub fn cancel(&mut self) {
        self.due_ms = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.due_ms.is_some()
    }

    /// True once, when the quiet period has passed.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.due_ms {
            Some(due) if now_ms >= due => {
                self.due_ms = None;
                true
            }
            _ => false,
        }
    }
}
