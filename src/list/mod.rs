//! Virtualized list widget
//!
//! [`ListView`] owns the display records and wires input to a
//! [`SelectionNavigator`]: pointer presses select and invoke rows, held
//! Up/Down keys repeat through [`RepeatTimer`]s, presses on a visible
//! scrollbar go to that bar.

mod navigator;

pub use navigator::{Direction, SelectionNavigator};

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::changes::Changes;
use crate::config::ToolkitConfig;
use crate::error::ToolkitError;
use crate::geometry::{Point, Size};
use crate::input::{ClickTracker, InputEvent, Key, MouseButton};
use crate::timer::{earliest, RepeatTimer};

/// One display record. Rendering is up to the painter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub title: String,
    pub details: Option<String>,
    /// Title of the group the item belongs to
    pub group: Option<String>,
    /// Host data carried along with the row, never displayed
    pub tag: Option<String>,
}

impl ListItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// A single way of invoking a row, as spelled in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationTrigger {
    Select,
    Click,
    DoubleClick,
    Enter,
}

impl InvocationTrigger {
    const ALL: [InvocationTrigger; 4] = [
        InvocationTrigger::Select,
        InvocationTrigger::Click,
        InvocationTrigger::DoubleClick,
        InvocationTrigger::Enter,
    ];

    const fn mode(self) -> InvocationMode {
        match self {
            InvocationTrigger::Select => InvocationMode::SELECT,
            InvocationTrigger::Click => InvocationMode::CLICK,
            InvocationTrigger::DoubleClick => InvocationMode::DOUBLE_CLICK,
            InvocationTrigger::Enter => InvocationMode::ENTER,
        }
    }
}

/// Which user actions invoke the selected row, as a bitfield.
///
/// Serialized as a list of trigger names, e.g. `[double_click, enter]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<InvocationTrigger>", into = "Vec<InvocationTrigger>")]
pub struct InvocationMode(u8);

impl InvocationMode {
    pub const NONE: InvocationMode = InvocationMode(0);
    pub const SELECT: InvocationMode = InvocationMode(1);
    pub const CLICK: InvocationMode = InvocationMode(2);
    pub const DOUBLE_CLICK: InvocationMode = InvocationMode(4);
    pub const ENTER: InvocationMode = InvocationMode(8);

    #[inline]
    pub const fn contains(self, other: InvocationMode) -> bool {
        other.0 != 0 && (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for InvocationMode {
    type Output = InvocationMode;

    fn bitor(self, rhs: InvocationMode) -> InvocationMode {
        InvocationMode(self.0 | rhs.0)
    }
}

impl From<Vec<InvocationTrigger>> for InvocationMode {
    fn from(triggers: Vec<InvocationTrigger>) -> Self {
        triggers
            .into_iter()
            .fold(InvocationMode::NONE, |mode, t| mode | t.mode())
    }
}

impl From<InvocationMode> for Vec<InvocationTrigger> {
    fn from(mode: InvocationMode) -> Self {
        InvocationTrigger::ALL
            .into_iter()
            .filter(|t| mode.contains(t.mode()))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ListView {
    items: Vec<ListItem>,
    navigator: SelectionNavigator,
    invocation: InvocationMode,
    /// Row under the pointer, for hover painting
    hovered: Option<usize>,
    up_timer: RepeatTimer,
    down_timer: RepeatTimer,
    clicks: ClickTracker,
}

impl ListView {
    pub fn new(config: &ToolkitConfig) -> Self {
        let repeat = Duration::from_millis(config.list.repeat_interval_ms);
        Self {
            items: Vec::new(),
            navigator: SelectionNavigator::new(config),
            invocation: config.list.invocation,
            hovered: None,
            up_timer: RepeatTimer::new(repeat),
            down_timer: RepeatTimer::new(repeat),
            clicks: ClickTracker::default(),
        }
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn navigator(&self) -> &SelectionNavigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut SelectionNavigator {
        &mut self.navigator
    }

    pub fn selected(&self) -> Option<usize> {
        self.navigator.selected()
    }

    pub fn selected_item(&self) -> Option<&ListItem> {
        self.selected().and_then(|i| self.items.get(i))
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn invocation(&self) -> InvocationMode {
        self.invocation
    }

    pub fn set_invocation(&mut self, invocation: InvocationMode) {
        self.invocation = invocation;
    }

    /// Replace all records
    pub fn set_items(&mut self, items: Vec<ListItem>) -> Changes {
        tracing::debug!(target: "selection", count = items.len(), "items replaced");
        self.items = items;
        self.clicks.reset();
        let mut changes = Changes::ITEMS | self.navigator.set_item_count(self.items.len());
        if self.hovered.take().is_some() {
            changes |= Changes::INTERACTION;
        }
        changes
    }

    pub fn set_client_size(&mut self, size: Size) -> Changes {
        self.navigator.set_client_size(size)
    }

    /// Programmatic selection. Never invokes.
    pub fn set_selection(&mut self, index: Option<usize>) -> Result<Changes, ToolkitError> {
        self.navigator.set_selection(index)
    }

    /// Add the invoked row when a user-driven selection change should invoke
    fn after_user_selection(&self, changes: Changes) -> Changes {
        match self.selected() {
            Some(i)
                if changes.contains(Changes::SELECTION)
                    && self.invocation.contains(InvocationMode::SELECT) =>
            {
                changes | Changes::invoked(i)
            }
            _ => changes,
        }
    }

    fn move_selection(&mut self, direction: Direction, times: usize) -> Changes {
        let mut changes = Changes::NONE;
        for _ in 0..times {
            let moved = self.navigator.move_selection(direction);
            changes |= self.after_user_selection(moved);
        }
        changes
    }

    fn timer_mut(&mut self, direction: Direction) -> &mut RepeatTimer {
        match direction {
            Direction::Up => &mut self.up_timer,
            Direction::Down => &mut self.down_timer,
        }
    }

    fn stop_key_timer(&mut self, direction: Direction) -> Changes {
        let ticks = self.timer_mut(direction).stop();
        self.move_selection(direction, ticks)
    }

    fn pointer_down(&mut self, pos: Point, button: MouseButton, now: Instant) -> Changes {
        if let Some(changes) = self.navigator.viewport_mut().pointer_down(pos, button, now) {
            return changes;
        }
        if button != MouseButton::Left {
            return Changes::NONE;
        }

        let (hit, selected) = self.navigator.select_at(pos);
        let Some(index) = hit else {
            return Changes::NONE;
        };
        let mut changes = self.after_user_selection(selected);

        let clicks = self.clicks.track_row_click(index, now);
        if self.invocation.contains(InvocationMode::CLICK)
            || (clicks == 2 && self.invocation.contains(InvocationMode::DOUBLE_CLICK))
        {
            changes |= Changes::invoked(index);
        }
        if let Some(invoked) = changes.invoked {
            tracing::debug!(target: "selection", index = invoked, clicks, "row invoked");
        }
        changes
    }

    fn set_hovered(&mut self, hovered: Option<usize>) -> Changes {
        if self.hovered == hovered {
            return Changes::NONE;
        }
        self.hovered = hovered;
        Changes::INTERACTION
    }

    pub fn handle_event(&mut self, event: &InputEvent, now: Instant) -> Changes {
        #[cfg(debug_assertions)]
        let before = crate::tracing::ListSnapshot::from_list(self);

        let changes = self.dispatch_event(event, now);

        #[cfg(debug_assertions)]
        if let Some(diff) = before.diff(&crate::tracing::ListSnapshot::from_list(self)) {
            tracing::debug!(target: "selection", ?event, "{}", diff);
        }
        changes
    }

    fn dispatch_event(&mut self, event: &InputEvent, now: Instant) -> Changes {
        match *event {
            InputEvent::PointerDown { pos, button } => self.pointer_down(pos, button, now),
            InputEvent::PointerMove { pos } => {
                if let Some(changes) = self.navigator.viewport_mut().pointer_move(pos) {
                    return changes;
                }
                let hovered = self.navigator.hit_test(pos);
                self.set_hovered(hovered)
            }
            InputEvent::PointerUp { .. } => {
                self.navigator.viewport_mut().pointer_up().unwrap_or_default()
            }
            InputEvent::PointerLeave => {
                self.navigator.viewport_mut().pointer_leave() | self.set_hovered(None)
            }
            InputEvent::KeyDown { key: Key::Up, .. } => {
                self.up_timer.start(now);
                Changes::NONE
            }
            InputEvent::KeyDown { key: Key::Down, .. } => {
                self.down_timer.start(now);
                Changes::NONE
            }
            InputEvent::KeyUp { key: Key::Up, .. } => self.stop_key_timer(Direction::Up),
            InputEvent::KeyUp { key: Key::Down, .. } => self.stop_key_timer(Direction::Down),
            InputEvent::KeyDown { key: Key::Enter, .. } => match self.selected() {
                Some(i) if self.invocation.contains(InvocationMode::ENTER) => {
                    tracing::debug!(target: "selection", index = i, "row invoked by enter");
                    Changes::invoked(i)
                }
                _ => Changes::NONE,
            },
            InputEvent::FocusLost => {
                let mut changes = self.stop_key_timer(Direction::Up);
                changes |= self.stop_key_timer(Direction::Down);
                if let Some(released) = self.navigator.viewport_mut().pointer_up() {
                    changes |= released;
                }
                changes
            }
            _ => Changes::NONE,
        }
    }

    /// Perform due key repeats and scrollbar paging
    pub fn tick(&mut self, now: Instant) -> Changes {
        let up = self.up_timer.poll(now);
        let down = self.down_timer.poll(now);
        let mut changes = self.move_selection(Direction::Up, up);
        changes |= self.move_selection(Direction::Down, down);
        changes | self.navigator.viewport_mut().tick(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([
            self.up_timer.next_deadline(),
            self.down_timer.next_deadline(),
            self.navigator.viewport().next_deadline(),
        ])
    }
}
