//! Two scrollbars composed over a content area
//!
//! The vertical bar docks to the right edge, the horizontal bar to the
//! bottom. A bar is shown only while the content exceeds the client along its
//! axis; a hidden bar is pinned to 0. Each axis ranges over `0..=content
//! extent`, and the pixel offset of the content is derived from that value.

use std::time::Instant;

use crate::changes::Changes;
use crate::config::ScrollbarConfig;
use crate::geometry::{Orientation, Point, Rect, Size};
use crate::input::MouseButton;
use crate::timer::earliest;

use super::axis::ScrollAxis;

#[derive(Debug, Clone)]
pub struct ScrollViewport {
    client: Size,
    content: Size,
    horizontal: ScrollAxis,
    vertical: ScrollAxis,
    horizontal_visible: bool,
    vertical_visible: bool,
    /// Bar that received the last pointer press; gets moves and the release
    captured: Option<Orientation>,
}

impl ScrollViewport {
    pub fn new(config: &ScrollbarConfig) -> Self {
        Self {
            client: Size::default(),
            content: Size::default(),
            horizontal: ScrollAxis::new(Orientation::Horizontal, config),
            vertical: ScrollAxis::new(Orientation::Vertical, config),
            horizontal_visible: false,
            vertical_visible: false,
            captured: None,
        }
    }

    pub fn client_size(&self) -> Size {
        self.client
    }

    pub fn content_size(&self) -> Size {
        self.content
    }

    pub fn axis(&self, orientation: Orientation) -> &ScrollAxis {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }

    pub fn axis_mut(&mut self, orientation: Orientation) -> &mut ScrollAxis {
        match orientation {
            Orientation::Horizontal => &mut self.horizontal,
            Orientation::Vertical => &mut self.vertical,
        }
    }

    pub fn is_bar_visible(&self, orientation: Orientation) -> bool {
        match orientation {
            Orientation::Horizontal => self.horizontal_visible,
            Orientation::Vertical => self.vertical_visible,
        }
    }

    /// Bar thickness along the cross axis
    pub fn bar_thickness(&self, orientation: Orientation) -> i32 {
        self.axis(orientation).thickness()
    }

    pub fn set_client_size(&mut self, client: Size) -> Changes {
        if self.client == client {
            return Changes::NONE;
        }
        self.client = client;
        self.adjust_scrollbars()
    }

    /// Set the scrollable content size. Each axis maximum follows the
    /// content extent, rescaling its value.
    pub fn set_content_size(&mut self, content: Size) -> Changes {
        if self.content == content {
            return Changes::NONE;
        }
        self.content = content;
        let mut changes = self.horizontal.set_maximum(content.width.max(0));
        changes |= self.vertical.set_maximum(content.height.max(0));
        changes | self.adjust_scrollbars()
    }

    /// Recompute bar visibility and lay the bars out
    fn adjust_scrollbars(&mut self) -> Changes {
        let mut changes = Changes::NONE;

        self.horizontal_visible = self.content.width > self.client.width;
        if !self.horizontal_visible {
            changes |= self.horizontal.set_value(0);
        }
        self.vertical_visible = self.content.height > self.client.height;
        if !self.vertical_visible {
            changes |= self.vertical.set_value(0);
        }

        if let Some(bounds) = self.bar_bounds(Orientation::Horizontal) {
            changes |= self.horizontal.set_size(Size::new(bounds.width, bounds.height));
        }
        if let Some(bounds) = self.bar_bounds(Orientation::Vertical) {
            changes |= self.vertical.set_size(Size::new(bounds.width, bounds.height));
        }
        changes
    }

    /// Where a visible bar sits in client coordinates
    pub fn bar_bounds(&self, orientation: Orientation) -> Option<Rect> {
        if !self.is_bar_visible(orientation) {
            return None;
        }
        let h_thickness = self.bar_thickness(Orientation::Horizontal);
        let v_thickness = self.bar_thickness(Orientation::Vertical);
        Some(match orientation {
            Orientation::Vertical => {
                let height = self.client.height
                    - if self.horizontal_visible { h_thickness } else { 0 };
                Rect::new(self.client.width - v_thickness, 0, v_thickness, height)
            }
            Orientation::Horizontal => {
                let width =
                    self.client.width - if self.vertical_visible { v_thickness } else { 0 };
                Rect::new(0, self.client.height - h_thickness, width, h_thickness)
            }
        })
    }

    /// Visible content area: the client minus visible bars
    pub fn viewport_rect(&self) -> Rect {
        let width = self.client.width
            - if self.vertical_visible {
                self.bar_thickness(Orientation::Vertical)
            } else {
                0
            };
        let height = self.client.height
            - if self.horizontal_visible {
                self.bar_thickness(Orientation::Horizontal)
            } else {
                0
            };
        Rect::new(0, 0, width.max(0), height.max(0))
    }

    // =========================================================================
    // Pixel offset mapping
    // =========================================================================

    /// How far the content is scrolled, in pixels (non-negative)
    pub fn scroll_offset(&self) -> Point {
        let view = self.viewport_rect();
        Point::new(
            offset_for_value(self.horizontal.value(), self.content.width, view.width),
            offset_for_value(self.vertical.value(), self.content.height, view.height),
        )
    }

    pub fn set_scroll_offset(&mut self, offset: Point) -> Changes {
        let view = self.viewport_rect();
        let x = value_for_offset(offset.x, self.content.width, view.width);
        let y = value_for_offset(offset.y, self.content.height, view.height);
        self.horizontal.set_value(x) | self.vertical.set_value(y)
    }

    /// Shift the content offset by `(dx, dy)`, clamped by the axes
    pub fn scroll_by(&mut self, dx: i32, dy: i32) -> Changes {
        if dx == 0 && dy == 0 {
            return Changes::NONE;
        }
        let current = self.scroll_offset();
        self.set_scroll_offset(Point::new(
            current.x.saturating_add(dx),
            current.y.saturating_add(dy),
        ))
    }

    // =========================================================================
    // Pointer routing to the bars
    // =========================================================================

    /// Visible bar under `pos`, if any
    pub fn bar_at(&self, pos: Point) -> Option<Orientation> {
        [Orientation::Vertical, Orientation::Horizontal]
            .into_iter()
            .find(|&o| self.bar_bounds(o).is_some_and(|r| r.contains(pos)))
    }

    fn to_bar_local(&self, orientation: Orientation, pos: Point) -> Point {
        let origin = self
            .bar_bounds(orientation)
            .map(|r| r.origin())
            .unwrap_or_default();
        pos.relative_to(origin)
    }

    /// Route a press to the bar under it. Returns None when no bar was hit.
    pub fn pointer_down(
        &mut self,
        pos: Point,
        button: MouseButton,
        now: Instant,
    ) -> Option<Changes> {
        let orientation = self.bar_at(pos)?;
        let local = self.to_bar_local(orientation, pos);
        self.captured = Some(orientation);
        Some(self.axis_mut(orientation).pointer_down(local, button, now))
    }

    /// Route a move to the bar holding the pointer. None when no bar holds it.
    pub fn pointer_move(&mut self, pos: Point) -> Option<Changes> {
        let orientation = self.captured?;
        let local = self.to_bar_local(orientation, pos);
        Some(self.axis_mut(orientation).pointer_move(local))
    }

    /// Release the bar holding the pointer. None when no bar holds it.
    pub fn pointer_up(&mut self) -> Option<Changes> {
        let orientation = self.captured.take()?;
        Some(self.axis_mut(orientation).pointer_up())
    }

    pub fn pointer_leave(&mut self) -> Changes {
        self.horizontal.pointer_leave() | self.vertical.pointer_leave()
    }

    pub fn tick(&mut self, now: Instant) -> Changes {
        self.horizontal.tick(now) | self.vertical.tick(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([
            self.horizontal.next_deadline(),
            self.vertical.next_deadline(),
        ])
    }
}

/// `value * (content - view) / content`, floored; 0 when the content fits
fn offset_for_value(value: i32, content: i32, view: i32) -> i32 {
    if content <= view || content <= 0 {
        return 0;
    }
    let scrollable = content as i64 - view as i64;
    (value as i64 * scrollable / content as i64) as i32
}

/// Inverse of [`offset_for_value`], rounded up so that the resulting offset
/// is never short of the requested one
fn value_for_offset(offset: i32, content: i32, view: i32) -> i32 {
    if content <= view || offset <= 0 {
        return 0;
    }
    let scrollable = content as i64 - view as i64;
    let numerator = offset as i64 * content as i64;
    ((numerator + scrollable - 1) / scrollable).min(content as i64) as i32
}
