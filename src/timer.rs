//! Repeating timers with tap semantics for held keys and held buttons
//!
//! The host owns the clock: every call takes the current `Instant`, and the
//! owner asks [`RepeatTimer::next_deadline`] when it should be woken up. A
//! timer never invokes anything itself. It counts ticks, and the owning
//! widget performs its bound action once per counted tick. Stopping or
//! restarting a timer while applying its own ticks therefore cannot fire
//! twice.
//!
//! # Ensure-one-tick
//!
//! A press shorter than one interval still performs the action once: when
//! [`RepeatTimer::stop`] finds that no natural tick happened since
//! [`RepeatTimer::start`], it reports one synthesized tick. Holding past the
//! first interval gives the normal repeat cadence instead.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RepeatTimer {
    interval: Duration,
    ensure_one_tick: bool,
    has_ticked: bool,
    /// Due time of the next natural tick; `Some` while running
    next_due: Option<Instant>,
}

impl RepeatTimer {
    /// Create a stopped timer. `ensure_one_tick` defaults to true.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ensure_one_tick: true,
            has_ticked: false,
            next_due: None,
        }
    }

    pub fn from_millis(interval_ms: u64) -> Self {
        Self::new(Duration::from_millis(interval_ms))
    }

    /// Builder form of [`set_ensure_one_tick`](Self::set_ensure_one_tick)
    pub fn with_ensure_one_tick(mut self, ensure: bool) -> Self {
        self.ensure_one_tick = ensure;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn ensure_one_tick(&self) -> bool {
        self.ensure_one_tick
    }

    pub fn set_ensure_one_tick(&mut self, ensure: bool) {
        self.ensure_one_tick = ensure;
    }

    pub fn has_ticked(&self) -> bool {
        self.has_ticked
    }

    /// Start the timer. The first natural tick is due one interval from `now`.
    ///
    /// Ignored while already running, so repeated key-down events from host
    /// auto-repeat don't reset the cadence.
    pub fn start(&mut self, now: Instant) {
        if self.is_running() {
            return;
        }
        self.has_ticked = false;
        self.next_due = Some(now + self.interval);
        tracing::trace!(target: "timer", interval_ms = self.interval.as_millis() as u64, "start");
    }

    /// Number of natural ticks that became due up to `now`.
    pub fn poll(&mut self, now: Instant) -> usize {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        if self.interval.is_zero() {
            // A zero interval would never catch up; treat it as one tick per poll.
            self.has_ticked = true;
            return 1;
        }

        let mut ticks = 0;
        while due <= now {
            ticks += 1;
            due += self.interval;
        }
        self.next_due = Some(due);
        if ticks > 0 {
            self.has_ticked = true;
        }
        ticks
    }

    /// Stop the timer.
    ///
    /// Returns the number of ticks the owner must still perform: one if the
    /// timer was running, never ticked naturally and `ensure_one_tick` is set,
    /// zero otherwise.
    pub fn stop(&mut self) -> usize {
        let synthesized = self.is_running() && !self.has_ticked && self.ensure_one_tick;
        self.has_ticked = false;
        self.next_due = None;
        if synthesized {
            tracing::trace!(target: "timer", "stop: synthesized tick");
            1
        } else {
            0
        }
    }

    /// When the next natural tick is due, if running
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_due
    }
}

/// Earliest of several optional deadlines
pub fn earliest(deadlines: impl IntoIterator<Item = Option<Instant>>) -> Option<Instant> {
    deadlines.into_iter().flatten().min()
}
