//! Caret and selection state machine for a single line of text
//!
//! All positions are char indices in `0..=len`. The caret sits between
//! characters. Selection is `selection_start .. selection_start +
//! selection_length`; while caret selection is active (mouse button held
//! after a press, or Shift held) every caret move re-spans the selection
//! between `selection_origin` and the caret.

use std::ops::Range;

use crate::changes::Changes;
use crate::error::ToolkitError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextEditState {
    text: String,
    /// Length in chars
    len: usize,
    caret: usize,
    selection_start: usize,
    selection_length: usize,
    /// Fixed end of a caret-driven selection
    selection_origin: usize,
    mouse_selection: bool,
    key_selection: bool,
}

impl TextEditState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            len: text.chars().count(),
            text,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn caret_position(&self) -> usize {
        self.caret
    }

    pub fn selection_start(&self) -> usize {
        self.selection_start
    }

    pub fn selection_length(&self) -> usize {
        self.selection_length
    }

    pub fn selection_range(&self) -> Range<usize> {
        self.selection_start..self.selection_start + self.selection_length
    }

    pub fn has_selection(&self) -> bool {
        self.selection_length > 0
    }

    pub fn is_mouse_selecting(&self) -> bool {
        self.mouse_selection
    }

    pub fn is_caret_selection_active(&self) -> bool {
        self.mouse_selection || self.key_selection
    }

    pub fn selected_text(&self) -> &str {
        let range = self.selection_range();
        &self.text[self.byte_offset(range.start)..self.byte_offset(range.end)]
    }

    /// Byte offset of char index `index` (clamped to the end)
    fn byte_offset(&self, index: usize) -> usize {
        self.text
            .char_indices()
            .nth(index)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    // =========================================================================
    // Caret
    // =========================================================================

    /// Move the caret. Rejects positions past the end of the text.
    pub fn set_caret_position(&mut self, position: usize) -> Result<Changes, ToolkitError> {
        if position > self.len {
            return Err(ToolkitError::CaretOutOfRange {
                position,
                len: self.len,
            });
        }
        Ok(self.place_caret(position))
    }

    /// Caller guarantees `position <= len`
    fn place_caret(&mut self, position: usize) -> Changes {
        if position == self.caret {
            return Changes::NONE;
        }
        tracing::trace!(target: "caret", from = self.caret, to = position, "caret moved");
        self.caret = position;

        let (start, length) = if self.is_caret_selection_active() {
            let origin = self.selection_origin;
            (origin.min(position), origin.abs_diff(position))
        } else {
            (self.selection_start, 0)
        };
        Changes::CARET | self.set_selection_span(start, length)
    }

    fn set_selection_span(&mut self, start: usize, length: usize) -> Changes {
        if (start, length) == (self.selection_start, self.selection_length) {
            return Changes::NONE;
        }
        self.selection_start = start;
        self.selection_length = length;
        Changes::SELECTION
    }

    pub fn move_caret_left(&mut self) -> Changes {
        self.place_caret(self.caret.saturating_sub(1))
    }

    pub fn move_caret_right(&mut self) -> Changes {
        self.place_caret((self.caret + 1).min(self.len))
    }

    // =========================================================================
    // Caret-driven selection
    // =========================================================================

    /// Pointer press at caret index `position`: collapse everything there and
    /// start following the pointer
    pub fn begin_mouse_selection(&mut self, position: usize) -> Changes {
        let position = position.min(self.len);
        let mut changes = Changes::when(position != self.caret, Changes::CARET);
        self.caret = position;
        self.selection_origin = position;
        changes |= self.set_selection_span(position, 0);
        self.mouse_selection = true;
        changes
    }

    /// Pointer move while the button is held
    pub fn drag_caret_to(&mut self, position: usize) -> Changes {
        if !self.mouse_selection {
            return Changes::NONE;
        }
        self.place_caret(position.min(self.len))
    }

    /// Pointer release. The selected range is kept.
    pub fn end_mouse_selection(&mut self) {
        self.mouse_selection = false;
    }

    /// Shift pressed: caret moves now extend a selection from here.
    /// Repeated presses while already selecting keep the first anchor.
    pub fn begin_key_selection(&mut self) {
        if self.key_selection {
            return;
        }
        self.key_selection = true;
        self.selection_origin = self.caret;
    }

    pub fn end_key_selection(&mut self) {
        self.key_selection = false;
    }

    /// Select `length` chars from `start` and put the caret at the end.
    /// Rejects ranges past the end of the text.
    pub fn select(&mut self, start: usize, length: usize) -> Result<Changes, ToolkitError> {
        if start.checked_add(length).map_or(true, |end| end > self.len) {
            return Err(ToolkitError::SelectionOutOfRange {
                start,
                length,
                len: self.len,
            });
        }
        let end = start + length;
        let changes = Changes::when(end != self.caret, Changes::CARET);
        self.caret = end;
        self.selection_origin = start;
        Ok(changes | self.set_selection_span(start, length))
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Insert `ch` at the caret and advance the caret past it
    pub fn insert_char(&mut self, ch: char) -> Changes {
        let at = self.caret;
        let offset = self.byte_offset(at);
        self.text.insert(offset, ch);
        self.len += 1;
        if self.selection_origin > at {
            self.selection_origin += 1;
        }
        tracing::trace!(target: "caret", at, ?ch, "insert");
        Changes::TEXT | self.place_caret(at + 1)
    }

    /// Delete the char before the caret
    pub fn backspace(&mut self) -> Changes {
        if self.caret == 0 {
            return Changes::NONE;
        }
        let at = self.caret - 1;
        self.remove_range(at..self.caret) | self.place_caret(at)
    }

    /// Delete the char after the caret
    pub fn delete_forward(&mut self) -> Changes {
        if self.caret >= self.len {
            return Changes::NONE;
        }
        self.remove_range(self.caret..self.caret + 1)
    }

    /// Remove the selected text and put the caret at its start. No-op
    /// without a selection.
    pub fn delete_selection(&mut self) -> Changes {
        if self.selection_length == 0 {
            return Changes::NONE;
        }
        let range = self.selection_range();
        tracing::debug!(target: "selection", ?range, "delete selection");
        let mut changes = self.remove_range(range.clone());
        changes |= self.set_selection_span(range.start, 0);
        self.selection_origin = range.start;
        if self.caret != range.start {
            self.caret = range.start;
            changes |= Changes::CARET;
        }
        changes
    }

    /// Replace the whole text. Caret and selection are clamped into it.
    pub fn set_text(&mut self, text: impl Into<String>) -> Changes {
        let text = text.into();
        if text == self.text {
            return Changes::NONE;
        }
        self.text = text;
        self.len = self.text.chars().count();
        Changes::TEXT | self.reconcile_text()
    }

    /// Remove chars in `range` (caller guarantees it lies within the text)
    fn remove_range(&mut self, range: Range<usize>) -> Changes {
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end);
        self.text.replace_range(start..end, "");
        self.len -= range.len();

        if self.selection_origin >= range.end {
            self.selection_origin -= range.len();
        } else if self.selection_origin > range.start {
            self.selection_origin = range.start;
        }
        Changes::TEXT | self.reconcile_text()
    }

    /// Clamp caret, selection and origin into the current text
    fn reconcile_text(&mut self) -> Changes {
        let mut changes = Changes::NONE;
        if self.caret > self.len {
            self.caret = self.len;
            changes |= Changes::CARET;
        }
        self.selection_origin = self.selection_origin.min(self.len);
        let start = self.selection_start.min(self.len);
        let length = self.selection_length.min(self.len - start);
        changes | self.set_selection_span(start, length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_caret_rejects_past_end() {
        let mut state = TextEditState::with_text("hello");
        assert_eq!(
            state.set_caret_position(6),
            Err(ToolkitError::CaretOutOfRange {
                position: 6,
                len: 5
            })
        );
        assert_eq!(state.caret_position(), 0);
        assert_eq!(state.set_caret_position(5), Ok(Changes::CARET));
    }

    #[test]
    fn test_plain_caret_move_clears_selection() {
        let mut state = TextEditState::with_text("hello");
        state.select(1, 2).unwrap();
        let changes = state.move_caret_left();
        assert!(changes.contains(Changes::SELECTION));
        assert_eq!(state.selection_length(), 0);
        assert_eq!(state.caret_position(), 2);
    }

    #[test]
    fn test_shift_selection_spans_from_origin() {
        let mut state = TextEditState::with_text("hello");
        state.set_caret_position(2).unwrap();
        state.begin_key_selection();
        state.move_caret_right();
        state.move_caret_right();
        assert_eq!(state.selection_range(), 2..4);
        state.move_caret_left();
        state.move_caret_left();
        state.move_caret_left();
        assert_eq!(state.selection_range(), 1..2);
        state.end_key_selection();
        assert_eq!(state.selected_text(), "e");
    }

    #[test]
    fn test_mouse_selection_keeps_range_after_release() {
        let mut state = TextEditState::with_text("hello");
        state.begin_mouse_selection(4);
        state.drag_caret_to(1);
        state.end_mouse_selection();
        assert_eq!(state.selection_range(), 1..4);
        assert!(state.drag_caret_to(0).is_empty());
    }

    #[test]
    fn test_insert_advances_caret() {
        let mut state = TextEditState::with_text("hllo");
        state.set_caret_position(1).unwrap();
        let changes = state.insert_char('e');
        assert!(changes.contains(Changes::TEXT | Changes::CARET));
        assert_eq!(state.text(), "hello");
        assert_eq!(state.caret_position(), 2);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut state = TextEditState::with_text("hello");
        state.set_caret_position(5).unwrap();
        state.backspace();
        assert_eq!((state.text(), state.caret_position()), ("hell", 4));

        state.set_caret_position(0).unwrap();
        assert!(state.backspace().is_empty());
        state.delete_forward();
        assert_eq!((state.text(), state.caret_position()), ("ell", 0));
    }

    #[test]
    fn test_delete_selection_is_idempotent() {
        let mut state = TextEditState::with_text("hello");
        state.select(1, 2).unwrap();
        state.delete_selection();
        assert_eq!(state.text(), "hlo");
        assert_eq!(state.caret_position(), 1);
        assert!(state.delete_selection().is_empty());
        assert_eq!(state.text(), "hlo");
    }

    #[test]
    fn test_set_text_clamps_caret_and_selection() {
        let mut state = TextEditState::with_text("hello world");
        state.select(6, 5).unwrap();
        let changes = state.set_text("hi");
        assert!(changes.contains(Changes::TEXT | Changes::CARET | Changes::SELECTION));
        assert_eq!(state.caret_position(), 2);
        assert_eq!(state.selection_range(), 2..2);
    }

    #[test]
    fn test_multibyte_chars_use_char_indices() {
        let mut state = TextEditState::with_text("héllo");
        state.select(1, 2).unwrap();
        assert_eq!(state.selected_text(), "él");
        state.delete_selection();
        assert_eq!(state.text(), "hlo");
        state.insert_char('ü');
        assert_eq!(state.text(), "hülo");
    }

    #[test]
    fn test_select_rejects_overflow() {
        let mut state = TextEditState::with_text("abc");
        assert!(state.select(2, 2).is_err());
        assert!(state.select(usize::MAX, 2).is_err());
        assert_eq!(state.selection_length(), 0);
    }
}
