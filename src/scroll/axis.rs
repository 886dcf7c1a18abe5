//! One scrollbar: value range, thumb geometry, drag and paging
//!
//! Coordinates are local to the scrollbar control. The near button sits at
//! the origin, the far button at the end of the main axis, and the thumb
//! travels over the track in between.

use std::time::Instant;

use crate::changes::Changes;
use crate::config::ScrollbarConfig;
use crate::geometry::{Orientation, Point, Rect, RectF, Size};
use crate::input::MouseButton;
use crate::timer::{earliest, RepeatTimer};

/// Pointer-down on the thumb, alive until release or leave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    /// Last pointer position the value was synced to
    pub origin: Point,
}

/// Mutually exclusive hit regions of a scrollbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPart {
    Thumb,
    NearButton,
    FarButton,
}

#[derive(Debug, Clone)]
pub struct ScrollAxis {
    orientation: Orientation,
    minimum: i32,
    maximum: i32,
    value: i32,
    thickness: i32,
    page_step: i32,
    /// Current control size, updated by layout
    size: Size,
    drag: Option<DragState>,
    near_timer: RepeatTimer,
    far_timer: RepeatTimer,
}

impl ScrollAxis {
    pub fn new(orientation: Orientation, config: &ScrollbarConfig) -> Self {
        let thickness = config.thickness;
        let size = match orientation {
            Orientation::Horizontal => Size::new(0, thickness),
            Orientation::Vertical => Size::new(thickness, 0),
        };
        Self {
            orientation,
            minimum: 0,
            maximum: 100,
            value: 0,
            thickness,
            page_step: config.page_step,
            size,
            drag: None,
            near_timer: RepeatTimer::from_millis(config.repeat_interval_ms),
            far_timer: RepeatTimer::from_millis(config.repeat_interval_ms),
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn minimum(&self) -> i32 {
        self.minimum
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// `maximum - minimum`, widened so that any valid range fits
    pub fn distance(&self) -> i64 {
        self.maximum as i64 - self.minimum as i64
    }

    pub fn thickness(&self) -> i32 {
        self.thickness
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn drag(&self) -> Option<DragState> {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether a paging button is currently held
    pub fn is_paging(&self) -> bool {
        self.near_timer.is_running() || self.far_timer.is_running()
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Set the control size (called by layout)
    pub fn set_size(&mut self, size: Size) -> Changes {
        if self.size == size {
            return Changes::NONE;
        }
        self.size = size;
        Changes::SCROLL
    }

    /// Set the cross-axis thickness; the control's cross extent follows
    pub fn set_thickness(&mut self, thickness: i32) -> Changes {
        if self.thickness == thickness {
            return Changes::NONE;
        }
        self.thickness = thickness;
        match self.orientation {
            Orientation::Horizontal => self.size.height = thickness,
            Orientation::Vertical => self.size.width = thickness,
        }
        Changes::SCROLL
    }

    /// Extent of one paging button along the main axis
    #[inline]
    fn button_extent(&self) -> i32 {
        self.thickness
    }

    /// Draggable track length: control extent minus both paging buttons.
    /// Always derived from the current size.
    pub fn track_length(&self) -> i32 {
        self.size
            .along(self.orientation)
            .saturating_sub(self.button_extent().saturating_mul(2))
    }

    pub fn near_button_bounds(&self) -> Rect {
        Rect::new(0, 0, self.thickness, self.thickness)
    }

    pub fn far_button_bounds(&self) -> Rect {
        match self.orientation {
            Orientation::Horizontal => Rect::new(
                self.size.width - self.thickness,
                0,
                self.thickness,
                self.thickness,
            ),
            Orientation::Vertical => Rect::new(
                0,
                self.size.height - self.thickness,
                self.thickness,
                self.thickness,
            ),
        }
    }

    /// Thumb rectangle, or None when there is nothing to scroll or no track.
    ///
    /// Thumb length is `track² / distance`, capped at the track length.
    /// The quadratic formula shrinks the thumb faster than the conventional
    /// `track² / (track + distance)`; existing layouts depend on it.
    pub fn thumb_bounds(&self) -> Option<RectF> {
        let distance = self.distance();
        let track = self.track_length();
        if distance <= 0 || track <= 0 {
            return None;
        }

        let track = track as f32;
        let thumb_length = (track * track / distance as f32).min(track);
        let position = (self.value as i64 - self.minimum as i64) as f32 / distance as f32;
        let offset = position * (track - thumb_length) + self.button_extent() as f32;
        let thickness = self.thickness as f32;

        Some(match self.orientation {
            Orientation::Horizontal => RectF::new(offset, 0.0, thumb_length, thickness),
            Orientation::Vertical => RectF::new(0.0, offset, thickness, thumb_length),
        })
    }

    /// Which region contains `p`. The thumb is checked first.
    pub fn hit_test(&self, p: Point) -> Option<ScrollPart> {
        if self.thumb_bounds().is_some_and(|thumb| thumb.contains(p)) {
            Some(ScrollPart::Thumb)
        } else if self.near_button_bounds().contains(p) {
            Some(ScrollPart::NearButton)
        } else if self.far_button_bounds().contains(p) {
            Some(ScrollPart::FarButton)
        } else {
            None
        }
    }

    // =========================================================================
    // Range and value
    // =========================================================================

    /// Set both range ends, rescaling the value to keep its relative
    /// position (`value' = (value - min) / oldDistance * newDistance + min'`,
    /// truncated).
    ///
    /// `max < min` is unsupported: the call is ignored and state is kept.
    pub fn set_range(&mut self, minimum: i32, maximum: i32) -> Changes {
        if maximum < minimum {
            tracing::warn!(
                target: "scroll",
                minimum,
                maximum,
                "ignoring scroll range with maximum below minimum"
            );
            return Changes::NONE;
        }
        if minimum == self.minimum && maximum == self.maximum {
            return Changes::NONE;
        }

        let old_minimum = self.minimum;
        let old_distance = self.distance();
        self.minimum = minimum;
        self.maximum = maximum;

        let new_distance = self.distance();
        let rescaled = if old_distance > 0 {
            let relative = (self.value as i64 - old_minimum as i64) as f64 / old_distance as f64;
            (relative * new_distance as f64) as i64 + minimum as i64
        } else {
            minimum as i64
        };
        self.value = rescaled.clamp(minimum as i64, maximum as i64) as i32;

        tracing::trace!(
            target: "scroll",
            minimum,
            maximum,
            value = self.value,
            "range changed"
        );
        // The thumb changes with the range even if the value does not.
        Changes::SCROLL
    }

    pub fn set_minimum(&mut self, minimum: i32) -> Changes {
        self.set_range(minimum, self.maximum)
    }

    pub fn set_maximum(&mut self, maximum: i32) -> Changes {
        self.set_range(self.minimum, maximum)
    }

    /// Set the value, clamped into the range. Reports a change only if the
    /// stored value actually moved.
    pub fn set_value(&mut self, value: i32) -> Changes {
        let value = value.clamp(self.minimum, self.maximum);
        if value == self.value {
            return Changes::NONE;
        }
        self.value = value;
        tracing::trace!(target: "scroll", value, "value changed");
        Changes::SCROLL
    }

    /// Step toward the minimum
    pub fn page_near(&mut self) -> Changes {
        self.set_value(self.value.saturating_sub(self.page_step))
    }

    /// Step toward the maximum
    pub fn page_far(&mut self) -> Changes {
        self.set_value(self.value.saturating_add(self.page_step))
    }

    // =========================================================================
    // Dragging
    // =========================================================================

    pub fn begin_drag(&mut self, p: Point) -> Changes {
        self.drag = Some(DragState { origin: p });
        Changes::INTERACTION
    }

    /// Convert the pixel delta since the last drag point into a value delta:
    /// `pixelDelta / trackLength * distance`, truncated.
    pub fn continue_drag(&mut self, p: Point) -> Changes {
        let Some(drag) = self.drag else {
            return Changes::NONE;
        };
        let track = self.track_length();
        if track <= 0 {
            return Changes::NONE;
        }

        let pixel_delta =
            p.along(self.orientation) as i64 - drag.origin.along(self.orientation) as i64;
        let scroll_delta = (pixel_delta as f64 / track as f64 * self.distance() as f64) as i32;
        self.drag = Some(DragState { origin: p });
        self.set_value(self.value.saturating_add(scroll_delta))
    }

    pub fn end_drag(&mut self) -> Changes {
        Changes::when(self.drag.take().is_some(), Changes::INTERACTION)
    }

    // =========================================================================
    // Pointer handling
    // =========================================================================

    /// Left press dispatches to exactly one of: thumb drag, near paging,
    /// far paging.
    pub fn pointer_down(&mut self, p: Point, button: MouseButton, now: Instant) -> Changes {
        if button != MouseButton::Left {
            return Changes::NONE;
        }
        match self.hit_test(p) {
            Some(ScrollPart::Thumb) => self.begin_drag(p),
            Some(ScrollPart::NearButton) => {
                self.near_timer.start(now);
                Changes::INTERACTION
            }
            Some(ScrollPart::FarButton) => {
                self.far_timer.start(now);
                Changes::INTERACTION
            }
            None => Changes::NONE,
        }
    }

    pub fn pointer_move(&mut self, p: Point) -> Changes {
        if self.is_dragging() {
            self.continue_drag(p)
        } else {
            Changes::NONE
        }
    }

    /// Release ends the drag and any paging. A tap shorter than the repeat
    /// interval still pages once.
    pub fn pointer_up(&mut self) -> Changes {
        let mut changes = self.end_drag();
        let was_paging = self.is_paging();
        for _ in 0..self.near_timer.stop() {
            changes |= self.page_near();
        }
        for _ in 0..self.far_timer.stop() {
            changes |= self.page_far();
        }
        if was_paging {
            changes |= Changes::INTERACTION;
        }
        changes
    }

    pub fn pointer_leave(&mut self) -> Changes {
        self.end_drag()
    }

    /// Apply paging ticks that came due
    pub fn tick(&mut self, now: Instant) -> Changes {
        let mut changes = Changes::NONE;
        for _ in 0..self.near_timer.poll(now) {
            changes |= self.page_near();
        }
        for _ in 0..self.far_timer.poll(now) {
            changes |= self.page_far();
        }
        changes
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([
            self.near_timer.next_deadline(),
            self.far_timer.next_deadline(),
        ])
    }
}
