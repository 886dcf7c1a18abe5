//! Double-click detection

use std::time::{Duration, Instant};

/// Default maximum gap between clicks of a multi-click
pub const DOUBLE_CLICK_TIME: Duration = Duration::from_millis(300);

/// Click tracking state for double-click detection on list rows
#[derive(Debug, Clone)]
pub struct ClickTracker {
    last_click_time: Option<Instant>,
    last_click_row: Option<usize>,
    click_count: u32,
    double_click_time: Duration,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_TIME)
    }
}

impl ClickTracker {
    pub fn new(double_click_time: Duration) -> Self {
        Self {
            last_click_time: None,
            last_click_row: None,
            click_count: 0,
            double_click_time,
        }
    }

    /// Register a click on `row` at `now`.
    ///
    /// Returns the click count (1 for single, 2 for double). Counts wrap back
    /// to 1 after a double click so a third rapid click starts a new pair.
    pub fn track_row_click(&mut self, row: usize, now: Instant) -> u8 {
        let is_rapid_click = self
            .last_click_time
            .is_some_and(|last| now.saturating_duration_since(last) < self.double_click_time);
        let is_same_row = self.last_click_row == Some(row);

        if is_rapid_click && is_same_row {
            self.click_count += 1;
            if self.click_count > 2 {
                self.click_count = 1;
            }
        } else {
            self.click_count = 1;
        }

        self.last_click_time = Some(now);
        self.last_click_row = Some(row);

        self.click_count as u8
    }

    /// Reset click tracking (e.g., when the items change)
    pub fn reset(&mut self) {
        self.click_count = 0;
        self.last_click_row = None;
        self.last_click_time = None;
    }
}
