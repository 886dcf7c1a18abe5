//! Virtual row addressing, selection and scroll-into-view for the list
//!
//! Rows are never stored. Row `i` spans
//! `padding.top + i * item_height - scroll_offset` .. `+ item_height`
//! in viewport coordinates, and is as wide as the viewport minus padding.

use std::ops::Range;

use crate::changes::Changes;
use crate::config::ToolkitConfig;
use crate::error::ToolkitError;
use crate::geometry::{scroll_into_view_delta, Orientation, Padding, Point, Rect, Size};
use crate::scroll::ScrollViewport;

/// Direction for keyboard selection movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct SelectionNavigator {
    item_count: usize,
    item_height: i32,
    border_width: i32,
    padding: Padding,
    selected: Option<usize>,
    viewport: ScrollViewport,
}

impl SelectionNavigator {
    pub fn new(config: &ToolkitConfig) -> Self {
        Self {
            item_count: 0,
            item_height: config.list.item_height,
            border_width: config.list.border_width,
            padding: Padding::default(),
            selected: None,
            viewport: ScrollViewport::new(&config.scrollbar),
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn item_height(&self) -> i32 {
        self.item_height
    }

    pub fn border_width(&self) -> i32 {
        self.border_width
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn viewport(&self) -> &ScrollViewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ScrollViewport {
        &mut self.viewport
    }

    // =========================================================================
    // Layout
    // =========================================================================

    pub fn set_client_size(&mut self, size: Size) -> Changes {
        let changes = self.viewport.set_client_size(size);
        changes | self.update_content_size()
    }

    pub fn set_padding(&mut self, padding: Padding) -> Changes {
        if self.padding == padding {
            return Changes::NONE;
        }
        self.padding = padding;
        self.update_content_size() | Changes::ITEMS
    }

    pub fn set_item_height(&mut self, item_height: i32) -> Changes {
        if self.item_height == item_height {
            return Changes::NONE;
        }
        self.item_height = item_height;
        self.update_content_size() | Changes::ITEMS
    }

    /// Change the number of rows. A selection past the new end is dropped.
    pub fn set_item_count(&mut self, count: usize) -> Changes {
        if self.item_count == count {
            return Changes::NONE;
        }
        self.item_count = count;
        let mut changes = Changes::ITEMS | self.update_content_size();
        if self.selected.is_some_and(|i| i >= count) {
            self.selected = None;
            changes |= Changes::SELECTION;
        }
        changes
    }

    fn content_height(&self) -> i32 {
        let rows = i32::try_from(self.item_count).unwrap_or(i32::MAX);
        rows.saturating_mul(self.item_height)
            .saturating_add(self.padding.vertical())
    }

    /// Rows stretch to the viewport width, so content never overflows
    /// horizontally; only the height scrolls.
    fn update_content_size(&mut self) -> Changes {
        let client = self.viewport.client_size();
        let height = self.content_height();
        let width = if height > client.height {
            client.width - self.viewport.bar_thickness(Orientation::Vertical)
        } else {
            client.width
        };
        self.viewport.set_content_size(Size::new(width.max(0), height))
    }

    // =========================================================================
    // Geometry queries
    // =========================================================================

    /// Bounds of row `index` in viewport coordinates
    pub fn item_bounds(&self, index: usize) -> Rect {
        let offset = self.viewport.scroll_offset();
        let view = self.viewport.viewport_rect();
        let index = i32::try_from(index).unwrap_or(i32::MAX);
        Rect::new(
            view.x + self.padding.left - offset.x,
            view.y + self.padding.top + index.saturating_mul(self.item_height) - offset.y,
            view.width - self.padding.horizontal(),
            self.item_height,
        )
    }

    /// Indices of rows that intersect the viewport
    pub fn visible_range(&self) -> Range<usize> {
        if self.item_count == 0 || self.item_height <= 0 {
            return 0..0;
        }
        let offset = self.viewport.scroll_offset();
        let view = self.viewport.viewport_rect();
        let top = (offset.y - self.padding.top).max(0);
        let bottom = (offset.y + view.height - self.padding.top).max(0);

        let first = (top / self.item_height) as usize;
        let last = ((bottom + self.item_height - 1) / self.item_height) as usize;
        first.min(self.item_count)..last.min(self.item_count)
    }

    /// First visible row containing `point`
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        if !self.viewport.viewport_rect().contains(point) {
            return None;
        }
        self.visible_range()
            .find(|&i| self.item_bounds(i).contains(point))
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select a row (or nothing). An index past the last row is rejected.
    pub fn set_selection(&mut self, index: Option<usize>) -> Result<Changes, ToolkitError> {
        if let Some(i) = index {
            if i >= self.item_count {
                return Err(ToolkitError::IndexOutOfRange {
                    index: i,
                    count: self.item_count,
                });
            }
        }
        Ok(self.select_unchecked(index))
    }

    fn select_unchecked(&mut self, index: Option<usize>) -> Changes {
        if self.selected == index {
            return Changes::NONE;
        }
        tracing::debug!(target: "selection", from = ?self.selected, to = ?index, "select");
        self.selected = index;
        let mut changes = Changes::SELECTION;
        if let Some(i) = index {
            changes |= self.scroll_into_view(i);
        }
        changes
    }

    /// Select the row at `point`; a miss leaves the selection as it is
    pub fn select_at(&mut self, point: Point) -> (Option<usize>, Changes) {
        match self.hit_test(point) {
            Some(i) => (Some(i), self.select_unchecked(Some(i))),
            None => (None, Changes::NONE),
        }
    }

    /// Move the selection one row. No-op at either end; with nothing selected
    /// the first row is selected.
    pub fn move_selection(&mut self, direction: Direction) -> Changes {
        if self.item_count == 0 {
            return Changes::NONE;
        }
        let target = match (self.selected, direction) {
            (None, _) => 0,
            (Some(0), Direction::Up) => return Changes::NONE,
            (Some(i), Direction::Up) => i - 1,
            (Some(i), Direction::Down) if i + 1 >= self.item_count => return Changes::NONE,
            (Some(i), Direction::Down) => i + 1,
        };
        self.select_unchecked(Some(target))
    }

    /// Scroll by the minimal amount that makes row `index`, padded by the
    /// border width, fully visible
    pub fn scroll_into_view(&mut self, index: usize) -> Changes {
        let target = self.item_bounds(index).inflate(self.border_width);
        let (dx, dy) = scroll_into_view_delta(target, self.viewport.viewport_rect());
        if dx != 0 || dy != 0 {
            tracing::trace!(target: "scroll", index, dx, dy, "scroll into view");
        }
        self.viewport.scroll_by(dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator(count: usize, client: Size) -> SelectionNavigator {
        let mut nav = SelectionNavigator::new(&ToolkitConfig::default());
        nav.set_client_size(client);
        nav.set_item_count(count);
        nav
    }

    #[test]
    fn test_item_bounds_are_arithmetic() {
        let nav = navigator(5, Size::new(300, 400));
        assert_eq!(nav.item_bounds(0), Rect::new(0, 0, 300, 50));
        assert_eq!(nav.item_bounds(3), Rect::new(0, 150, 300, 50));
    }

    #[test]
    fn test_padding_offsets_rows_and_grows_content() {
        let mut nav = navigator(3, Size::new(300, 400));
        let padding = Padding {
            left: 5,
            top: 8,
            right: 7,
            bottom: 2,
        };
        assert!(nav.set_padding(padding).contains(Changes::ITEMS));
        assert!(nav.set_padding(padding).is_empty());
        assert_eq!(nav.item_bounds(1), Rect::new(5, 58, 288, 50));
        assert_eq!(nav.viewport().content_size(), Size::new(300, 160));
    }

    #[test]
    fn test_item_height_reflows_rows_and_scrollbar() {
        let mut nav = navigator(6, Size::new(300, 200));
        assert!(nav.viewport().is_bar_visible(Orientation::Vertical));
        assert!(nav.set_item_height(20).contains(Changes::ITEMS));
        assert!(!nav.viewport().is_bar_visible(Orientation::Vertical));
        assert_eq!(nav.item_bounds(5), Rect::new(0, 100, 300, 20));
        assert_eq!(nav.hit_test(Point::new(10, 45)), Some(2));
        assert!(nav.set_item_height(20).is_empty());
    }

    #[test]
    fn test_visible_range_follows_scroll() {
        let mut nav = navigator(20, Size::new(300, 200));
        assert_eq!(nav.visible_range(), 0..4);
        nav.viewport_mut().scroll_by(0, 75);
        assert_eq!(nav.visible_range(), 1..6);
    }

    #[test]
    fn test_hit_test() {
        let nav = navigator(3, Size::new(300, 400));
        assert_eq!(nav.hit_test(Point::new(10, 0)), Some(0));
        assert_eq!(nav.hit_test(Point::new(10, 149)), Some(2));
        assert_eq!(nav.hit_test(Point::new(10, 150)), None);
    }

    #[test]
    fn test_move_selection_boundaries() {
        let mut nav = navigator(3, Size::new(300, 400));
        assert_eq!(nav.move_selection(Direction::Up), Changes::SELECTION);
        assert_eq!(nav.selected(), Some(0));
        assert!(nav.move_selection(Direction::Up).is_empty());
        nav.move_selection(Direction::Down);
        nav.move_selection(Direction::Down);
        assert_eq!(nav.selected(), Some(2));
        assert!(nav.move_selection(Direction::Down).is_empty());
    }

    #[test]
    fn test_set_selection_rejects_out_of_range() {
        let mut nav = navigator(3, Size::new(300, 400));
        let err = nav.set_selection(Some(3)).unwrap_err();
        assert_eq!(err, ToolkitError::IndexOutOfRange { index: 3, count: 3 });
        assert_eq!(nav.selected(), None);
    }

    #[test]
    fn test_shrinking_count_drops_selection() {
        let mut nav = navigator(5, Size::new(300, 400));
        nav.set_selection(Some(4)).unwrap();
        let changes = nav.set_item_count(2);
        assert!(changes.contains(Changes::SELECTION));
        assert_eq!(nav.selected(), None);
    }

    #[test]
    fn test_selecting_up_scrolls_back() {
        let mut nav = navigator(20, Size::new(300, 200));
        nav.set_selection(Some(10)).unwrap();
        let bottom = nav.viewport().scroll_offset().y;
        assert!(bottom >= 552 - 200);
        nav.set_selection(Some(1)).unwrap();
        // Row 1 starts at 50, padded by the border: 48
        assert_eq!(nav.viewport().scroll_offset().y, 48);
    }
}
