//! Single-line text box
//!
//! [`TextBox`] drives a [`TextEditState`] from input events: pointer presses
//! and drags hit-test the caret against measured char boundaries, typed
//! chars insert, and Left/Right/Backspace/Delete go through repeat timers so
//! a quick tap acts once and a held key repeats.

mod layout;
mod state;

pub use layout::{caret_index_at, char_positions, MonospaceMeasure, TextMeasure};
pub use state::TextEditState;

use std::time::Instant;

use crate::changes::Changes;
use crate::config::ToolkitConfig;
use crate::error::ToolkitError;
use crate::geometry::{Padding, Rect, Size};
use crate::input::{InputEvent, Key, MouseButton};
use crate::timer::{earliest, RepeatTimer};

/// Width of the painted caret
pub const CARET_WIDTH: i32 = 2;

/// Keys bound to a repeat timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditKey {
    Left,
    Right,
    Backspace,
    Delete,
}

impl EditKey {
    const ALL: [EditKey; 4] = [
        EditKey::Left,
        EditKey::Right,
        EditKey::Backspace,
        EditKey::Delete,
    ];

    fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Left => Some(EditKey::Left),
            Key::Right => Some(EditKey::Right),
            Key::Backspace => Some(EditKey::Backspace),
            Key::Delete => Some(EditKey::Delete),
            _ => None,
        }
    }

    fn is_deletion(self) -> bool {
        matches!(self, EditKey::Backspace | EditKey::Delete)
    }
}

#[derive(Debug, Clone)]
struct KeyRepeat {
    timer: RepeatTimer,
    /// The current press deleted a selection on key-down
    consumed_selection: bool,
}

#[derive(Debug, Clone)]
pub struct TextBox<M: TextMeasure = MonospaceMeasure> {
    state: TextEditState,
    measure: M,
    editable: bool,
    focused: bool,
    caret_visible: bool,
    padding: Padding,
    border_width: i32,
    size: Size,
    blink_timer: RepeatTimer,
    key_repeats: [KeyRepeat; 4],
}

impl TextBox<MonospaceMeasure> {
    pub fn new(config: &ToolkitConfig) -> Self {
        Self::with_measure(config, MonospaceMeasure::default())
    }
}

impl<M: TextMeasure> TextBox<M> {
    pub fn with_measure(config: &ToolkitConfig, measure: M) -> Self {
        let settings = &config.text_box;
        let key_repeat = || KeyRepeat {
            timer: RepeatTimer::from_millis(settings.repeat_interval_ms),
            consumed_selection: false,
        };
        Self {
            state: TextEditState::new(),
            measure,
            editable: true,
            focused: false,
            caret_visible: false,
            padding: Padding::all(settings.padding),
            border_width: settings.border_width,
            size: Size::default(),
            blink_timer: RepeatTimer::from_millis(settings.caret_blink_ms)
                .with_ensure_one_tick(false),
            key_repeats: [key_repeat(), key_repeat(), key_repeat(), key_repeat()],
        }
    }

    pub fn state(&self) -> &TextEditState {
        &self.state
    }

    pub fn text(&self) -> &str {
        self.state.text()
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_caret_visible(&self) -> bool {
        self.caret_visible
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn border_width(&self) -> i32 {
        self.border_width
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> Changes {
        self.state.set_text(text)
    }

    pub fn set_caret_position(&mut self, position: usize) -> Result<Changes, ToolkitError> {
        self.state.set_caret_position(position)
    }

    pub fn select(&mut self, start: usize, length: usize) -> Result<Changes, ToolkitError> {
        self.state.select(start, length)
    }

    pub fn delete_selection(&mut self) -> Changes {
        self.state.delete_selection()
    }

    // =========================================================================
    // Geometry for the painter
    // =========================================================================

    /// Caret boundaries in control coordinates
    pub fn char_positions(&self) -> Vec<i32> {
        char_positions(self.state.text(), self.padding.left, &self.measure)
    }

    /// Minimum size that fits the text and padding at `line_height`
    pub fn preferred_size(&self, line_height: i32) -> Size {
        let positions = self.char_positions();
        let text_width = positions.last().copied().unwrap_or(self.padding.left) - self.padding.left;
        Size::new(
            text_width + self.padding.horizontal(),
            line_height + self.padding.vertical(),
        )
    }

    pub fn caret_bounds(&self) -> Rect {
        let positions = self.char_positions();
        let x = positions
            .get(self.state.caret_position())
            .copied()
            .unwrap_or(self.padding.left);
        Rect::new(
            x,
            self.padding.top,
            CARET_WIDTH,
            (self.size.height - self.padding.vertical()).max(0),
        )
    }

    /// Highlight behind the selected chars, if any
    pub fn selection_bounds(&self) -> Option<Rect> {
        if !self.state.has_selection() {
            return None;
        }
        let positions = self.char_positions();
        let range = self.state.selection_range();
        let left = *positions.get(range.start)?;
        let right = *positions.get(range.end)?;
        Some(Rect::new(
            left,
            self.padding.top,
            right - left,
            (self.size.height - self.padding.vertical()).max(0),
        ))
    }

    fn caret_index_at(&self, x: i32) -> usize {
        caret_index_at(&self.char_positions(), x)
    }

    // =========================================================================
    // Caret blink
    // =========================================================================

    fn set_caret_visible(&mut self, visible: bool) -> Changes {
        if self.caret_visible == visible {
            return Changes::NONE;
        }
        self.caret_visible = visible;
        Changes::CARET_VISIBILITY
    }

    /// Show the caret and restart the blink cadence after input
    fn reset_blink(&mut self, now: Instant) -> Changes {
        if !self.focused {
            return Changes::NONE;
        }
        self.blink_timer.stop();
        self.blink_timer.start(now);
        self.set_caret_visible(true)
    }

    // =========================================================================
    // Key repeat
    // =========================================================================

    fn key_repeat_mut(&mut self, key: EditKey) -> &mut KeyRepeat {
        &mut self.key_repeats[key as usize]
    }

    fn perform(&mut self, key: EditKey, times: usize) -> Changes {
        let mut changes = Changes::NONE;
        for _ in 0..times {
            changes |= match key {
                EditKey::Left => self.state.move_caret_left(),
                EditKey::Right => self.state.move_caret_right(),
                EditKey::Backspace if self.editable => self.state.backspace(),
                EditKey::Delete if self.editable => self.state.delete_forward(),
                _ => Changes::NONE,
            };
        }
        changes
    }

    fn key_down(&mut self, key: EditKey, now: Instant) -> Changes {
        let mut changes = Changes::NONE;
        if key.is_deletion() {
            let has_selection = self.state.has_selection();
            let first_press = !self.key_repeats[key as usize].timer.is_running();
            if first_press {
                self.key_repeat_mut(key).consumed_selection = false;
            }
            if has_selection && self.editable {
                changes |= self.state.delete_selection();
                self.key_repeat_mut(key).consumed_selection = true;
            }
            self.key_repeat_mut(key).timer.set_ensure_one_tick(!has_selection);
        }
        self.key_repeat_mut(key).timer.start(now);
        changes
    }

    fn key_up(&mut self, key: EditKey) -> Changes {
        if key.is_deletion() {
            let ensure = !self.state.has_selection()
                && !self.key_repeats[key as usize].consumed_selection;
            self.key_repeat_mut(key).timer.set_ensure_one_tick(ensure);
        }
        let repeat = self.key_repeat_mut(key);
        let ticks = repeat.timer.stop();
        repeat.consumed_selection = false;
        self.perform(key, ticks)
    }

    /// Stop every held key, performing synthesized taps
    fn release_keys(&mut self) -> Changes {
        EditKey::ALL
            .into_iter()
            .fold(Changes::NONE, |changes, key| changes | self.key_up(key))
    }

    // =========================================================================
    // Events
    // =========================================================================

    pub fn handle_event(&mut self, event: &InputEvent, now: Instant) -> Changes {
        #[cfg(debug_assertions)]
        let before = crate::tracing::TextSnapshot::from_state(&self.state);

        let changes = self.dispatch_event(event, now);

        #[cfg(debug_assertions)]
        if let Some(diff) = before.diff(&crate::tracing::TextSnapshot::from_state(&self.state)) {
            tracing::debug!(target: "caret", ?event, "{}", diff);
        }
        changes
    }

    fn dispatch_event(&mut self, event: &InputEvent, now: Instant) -> Changes {
        match *event {
            InputEvent::PointerDown {
                pos,
                button: MouseButton::Left,
            } => {
                let index = self.caret_index_at(pos.x);
                self.state.begin_mouse_selection(index) | self.reset_blink(now)
            }
            InputEvent::PointerMove { pos } if self.state.is_mouse_selecting() => {
                let index = self.caret_index_at(pos.x);
                self.state.drag_caret_to(index)
            }
            InputEvent::PointerUp {
                button: MouseButton::Left,
                ..
            } => {
                self.state.end_mouse_selection();
                Changes::NONE
            }
            InputEvent::KeyDown { key: Key::Shift, .. } => {
                self.state.begin_key_selection();
                Changes::NONE
            }
            InputEvent::KeyUp { key: Key::Shift, .. } => {
                self.state.end_key_selection();
                Changes::NONE
            }
            InputEvent::KeyDown { key, .. } => match EditKey::from_key(key) {
                Some(edit_key) => self.key_down(edit_key, now) | self.reset_blink(now),
                None => Changes::NONE,
            },
            InputEvent::KeyUp { key, .. } => match EditKey::from_key(key) {
                Some(edit_key) => self.key_up(edit_key),
                None => Changes::NONE,
            },
            InputEvent::Char(ch) if self.editable && !ch.is_control() => {
                self.state.insert_char(ch) | self.reset_blink(now)
            }
            InputEvent::FocusGained => {
                self.focused = true;
                self.blink_timer.start(now);
                self.set_caret_visible(true)
            }
            InputEvent::FocusLost => {
                self.focused = false;
                self.blink_timer.stop();
                self.state.end_mouse_selection();
                self.state.end_key_selection();
                self.release_keys() | self.set_caret_visible(false)
            }
            _ => Changes::NONE,
        }
    }

    /// Perform due key repeats and blink the caret
    pub fn tick(&mut self, now: Instant) -> Changes {
        let mut changes = Changes::NONE;
        for key in EditKey::ALL {
            let ticks = self.key_repeat_mut(key).timer.poll(now);
            changes |= self.perform(key, ticks);
        }
        if self.blink_timer.poll(now) % 2 == 1 {
            changes |= self.set_caret_visible(!self.caret_visible);
        }
        changes
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        earliest(
            self.key_repeats
                .iter()
                .map(|r| r.timer.next_deadline())
                .chain([self.blink_timer.next_deadline()]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn text_box(text: &str) -> TextBox {
        let mut text_box = TextBox::new(&ToolkitConfig::default());
        text_box.set_size(Size::new(200, 40));
        text_box.set_text(text);
        text_box
    }

    fn tap(text_box: &mut TextBox, key: Key, now: Instant) -> Changes {
        text_box.handle_event(&InputEvent::key_down(key), now)
            | text_box.handle_event(&InputEvent::key_up(key), now + Duration::from_millis(20))
    }

    #[test]
    fn test_caret_bounds_follow_boundaries() {
        let mut text_box = text_box("hello");
        text_box.set_caret_position(2).unwrap();
        assert_eq!(text_box.caret_bounds(), Rect::new(30, 10, 2, 20));
    }

    #[test]
    fn test_preferred_size_fits_text_and_padding() {
        assert_eq!(text_box("hello").preferred_size(20), Size::new(70, 40));
        assert_eq!(text_box("").preferred_size(16), Size::new(20, 36));
    }

    #[test]
    fn test_selection_bounds() {
        let mut text_box = text_box("hello");
        assert_eq!(text_box.selection_bounds(), None);
        text_box.select(1, 3).unwrap();
        assert_eq!(text_box.selection_bounds(), Some(Rect::new(20, 10, 30, 20)));
    }

    #[test]
    fn test_pointer_press_hit_tests_caret() {
        let now = Instant::now();
        let mut text_box = text_box("hello");
        text_box.handle_event(&InputEvent::left_down(42, 20), now);
        assert_eq!(text_box.state().caret_position(), 3);
        text_box.handle_event(&InputEvent::pointer_move(11, 20), now);
        text_box.handle_event(&InputEvent::left_up(11, 20), now);
        assert_eq!(text_box.state().selection_range(), 0..3);
    }

    #[test]
    fn test_typing_respects_editable() {
        let now = Instant::now();
        let mut text_box = text_box("");
        text_box.handle_event(&InputEvent::Char('a'), now);
        text_box.handle_event(&InputEvent::Char('\u{8}'), now);
        assert_eq!(text_box.text(), "a");

        text_box.set_editable(false);
        assert!(text_box.handle_event(&InputEvent::Char('b'), now).is_empty());
        tap(&mut text_box, Key::Backspace, now);
        assert_eq!(text_box.text(), "a");
        tap(&mut text_box, Key::Left, now);
        assert_eq!(text_box.state().caret_position(), 0);
    }

    #[test]
    fn test_delete_key_on_selection_deletes_once() {
        let now = Instant::now();
        let mut text_box = text_box("hello");
        text_box.select(1, 3).unwrap();
        tap(&mut text_box, Key::Delete, now);
        assert_eq!(text_box.text(), "ho");
        assert_eq!(text_box.state().caret_position(), 1);
    }

    #[test]
    fn test_blink_toggles_on_natural_ticks() {
        let t0 = Instant::now();
        let mut text_box = text_box("hello");
        let changes = text_box.handle_event(&InputEvent::FocusGained, t0);
        assert_eq!(changes, Changes::CARET_VISIBILITY);
        assert!(text_box.is_caret_visible());

        let changes = text_box.tick(t0 + Duration::from_millis(500));
        assert_eq!(changes, Changes::CARET_VISIBILITY);
        assert!(!text_box.is_caret_visible());

        text_box.tick(t0 + Duration::from_millis(1000));
        assert!(text_box.is_caret_visible());
    }

    #[test]
    fn test_focus_lost_hides_caret_without_synthesized_blink() {
        let t0 = Instant::now();
        let mut text_box = text_box("hello");
        text_box.handle_event(&InputEvent::FocusGained, t0);
        text_box.handle_event(&InputEvent::FocusLost, t0 + Duration::from_millis(10));
        assert!(!text_box.is_caret_visible());
        assert_eq!(text_box.next_deadline(), None);
    }

    #[test]
    fn test_typing_resets_blink() {
        let t0 = Instant::now();
        let mut text_box = text_box("");
        text_box.handle_event(&InputEvent::FocusGained, t0);
        text_box.tick(t0 + Duration::from_millis(500));
        assert!(!text_box.is_caret_visible());
        text_box.handle_event(&InputEvent::Char('x'), t0 + Duration::from_millis(600));
        assert!(text_box.is_caret_visible());
        assert_eq!(
            text_box.next_deadline(),
            Some(t0 + Duration::from_millis(1100))
        );
    }
}
