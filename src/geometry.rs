//! Centralized geometry helpers for painting and hit-testing
//!
//! Pure value types and functions shared by the scrollbar, the list and the
//! text box. Nothing here owns widget state; every function can be tested
//! without a host.

use serde::Serialize;

/// Axis a scrollbar (or any one-dimensional control) runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A point in control-local pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate along the given axis
    #[inline]
    pub const fn along(self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    /// Translate into the coordinate space whose origin is `origin`
    #[inline]
    pub const fn relative_to(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Extent along the given axis
    #[inline]
    pub const fn along(self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }
}

/// Per-side padding in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub const fn all(value: i32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    #[inline]
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    #[inline]
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Integer rectangle. `right`/`bottom` are exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Grow every side by `amount` (shrink when negative)
    pub fn inflate(&self, amount: i32) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + 2 * amount,
            self.height + 2 * amount,
        )
    }

    /// Shrink by padding
    pub fn deflate(&self, padding: Padding) -> Rect {
        Rect::new(
            self.x + padding.left,
            self.y + padding.top,
            self.width - padding.horizontal(),
            self.height - padding.vertical(),
        )
    }
}

/// Float rectangle, used where the geometry is fractional (scrollbar thumb)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        let (px, py) = (p.x as f32, p.y as f32);
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

// ============================================================================
// Scroll-into-view
// ============================================================================

/// Minimal signed shift of one axis that brings `[start, end)` inside
/// `[view_start, view_end)`.
///
/// Far-edge overflow wins over near-edge deficit when the target is larger
/// than the view.
#[inline]
pub fn scroll_delta_1d(start: i32, end: i32, view_start: i32, view_end: i32) -> i32 {
    if end > view_end {
        end - view_end
    } else if start < view_start {
        start - view_start
    } else {
        0
    }
}

/// Scroll offset change `(dx, dy)` that makes `target` fully visible in
/// `viewport`. Both rects are in the same coordinate space; axes are
/// independent and may both be non-zero.
pub fn scroll_into_view_delta(target: Rect, viewport: Rect) -> (i32, i32) {
    (
        scroll_delta_1d(target.x, target.right(), viewport.x, viewport.right()),
        scroll_delta_1d(target.y, target.bottom(), viewport.y, viewport.bottom()),
    )
}
