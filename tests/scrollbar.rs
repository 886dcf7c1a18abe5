//! Scrollbar tests - range, thumb geometry, drag and paging

mod common;

use std::time::Instant;

use common::{ms, vertical_axis};
use visual_toolkit::config::ScrollbarConfig;
use visual_toolkit::geometry::{Orientation, Point, Size};
use visual_toolkit::input::{InputEvent, MouseButton};
use visual_toolkit::scroll::ScrollPart;
use visual_toolkit::{Changes, Interactive, ScrollAxis, ScrollViewport};

// ========================================================================
// Range and value
// ========================================================================

#[test]
fn test_set_range_keeps_value_inside_and_relative() {
    for (min, max) in [(0, 100), (-50, 50), (10, 11), (0, 1000)] {
        for value_step in 0..=10 {
            let mut axis = vertical_axis(230, 0);
            axis.set_range(min, max);
            let value = min + (max - min) * value_step / 10;
            axis.set_value(value);

            for (min2, max2) in [(0, 10), (-20, 300), (5, 6), (0, 999)] {
                let mut rescaled = axis.clone();
                rescaled.set_range(min2, max2);
                let v = rescaled.value();
                assert!(min2 <= v && v <= max2, "{} outside {}..={}", v, min2, max2);

                let before = (value - min) as f64 / (max - min) as f64;
                let after = (v - min2) as f64 / (max2 - min2) as f64;
                let one_unit = 1.0 / (max2 - min2) as f64;
                assert!(
                    (before - after).abs() <= one_unit + f64::EPSILON,
                    "relative position {} became {}",
                    before,
                    after
                );
            }
        }
    }
}

#[test]
fn test_set_range_to_empty_distance() {
    let mut axis = vertical_axis(230, 100);
    axis.set_value(60);
    assert_eq!(axis.set_range(0, 0), Changes::SCROLL);
    assert_eq!(axis.value(), 0);
    assert!(axis.thumb_bounds().is_none());
}

#[test]
fn test_inverted_range_leaves_state_untouched() {
    let mut axis = vertical_axis(230, 400);
    axis.set_value(120);
    assert!(axis.set_range(50, 10).is_empty());
    assert_eq!(axis.minimum(), 0);
    assert_eq!(axis.maximum(), 400);
    assert_eq!(axis.value(), 120);
}

#[test]
fn test_page_steps_clamp() {
    let mut axis = vertical_axis(230, 20);
    assert_eq!(axis.page_far(), Changes::SCROLL);
    assert_eq!(axis.value(), 15);
    axis.page_far();
    assert_eq!(axis.value(), 20);
    assert!(axis.page_far().is_empty());
    axis.page_near();
    axis.page_near();
    assert_eq!(axis.value(), 0);
}

// ========================================================================
// Thumb geometry
// ========================================================================

#[test]
fn test_thumb_offset_monotonic_in_value() {
    for maximum in [1, 50, 200, 400, 5000] {
        let mut axis = vertical_axis(230, maximum);
        let mut last = f32::MIN;
        for value in 0..=maximum {
            axis.set_value(value);
            let offset = axis.thumb_bounds().unwrap().y;
            assert!(offset >= last, "offset fell at value {}", value);
            last = offset;
        }
    }
}

#[test]
fn test_thumb_stays_on_track() {
    let mut axis = vertical_axis(230, 4000);
    axis.set_value(4000);
    let thumb = axis.thumb_bounds().unwrap();
    assert!(thumb.y >= 15.0);
    assert!(thumb.y + thumb.height <= 215.0 + 0.001);
}

#[test]
fn test_thumb_follows_current_size() {
    let mut axis = vertical_axis(230, 400);
    assert_eq!(axis.thumb_bounds().unwrap().height, 100.0);
    axis.set_size(Size::new(15, 430));
    // 400² / 400
    assert_eq!(axis.thumb_bounds().unwrap().height, 400.0);
}

#[test]
fn test_horizontal_thumb_runs_along_x() {
    let mut axis = ScrollAxis::new(Orientation::Horizontal, &ScrollbarConfig::default());
    axis.set_size(Size::new(230, 15));
    axis.set_range(0, 400);
    axis.set_value(200);
    let thumb = axis.thumb_bounds().unwrap();
    assert_eq!((thumb.x, thumb.width, thumb.height), (65.0, 100.0, 15.0));
    assert_eq!(
        axis.hit_test(Point::new(225, 5)),
        Some(ScrollPart::FarButton)
    );
}

// ========================================================================
// Pointer interaction
// ========================================================================

#[test]
fn test_press_dispatches_to_one_region() {
    let now = Instant::now();
    let mut axis = vertical_axis(230, 400);

    axis.handle_event(&InputEvent::left_down(5, 50), now);
    assert!(axis.is_dragging());
    assert!(!axis.is_paging());
    axis.handle_event(&InputEvent::left_up(5, 50), now);

    axis.handle_event(&InputEvent::left_down(5, 5), now);
    assert!(!axis.is_dragging());
    assert!(axis.is_paging());
}

#[test]
fn test_drag_round_trip() {
    let now = Instant::now();
    let mut axis = vertical_axis(230, 400);
    axis.handle_event(&InputEvent::left_down(5, 40), now);
    let changes = axis.handle_event(&InputEvent::pointer_move(5, 90), now);
    assert!(changes.contains(Changes::SCROLL));
    assert_eq!(axis.value(), 100);
    axis.handle_event(&InputEvent::pointer_move(5, 40), now);
    assert_eq!(axis.value(), 0);
    let changes = axis.handle_event(&InputEvent::left_up(5, 40), now);
    assert_eq!(changes, Changes::INTERACTION);
}

#[test]
fn test_leave_ends_drag() {
    let now = Instant::now();
    let mut axis = vertical_axis(230, 400);
    axis.handle_event(&InputEvent::left_down(5, 40), now);
    axis.handle_event(&InputEvent::PointerLeave, now);
    assert!(!axis.is_dragging());
    assert!(axis
        .handle_event(&InputEvent::pointer_move(5, 140), now)
        .is_empty());
}

#[test]
fn test_held_far_button_pages_at_cadence() {
    let t0 = Instant::now();
    let mut axis = vertical_axis(230, 400);
    axis.handle_event(&InputEvent::left_down(5, 225), t0);
    assert_eq!(axis.next_deadline(), Some(t0 + ms(40)));

    axis.tick(t0 + ms(130));
    assert_eq!(axis.value(), 45);
    axis.handle_event(&InputEvent::left_up(5, 225), t0 + ms(140));
    assert_eq!(axis.value(), 45);
    assert_eq!(axis.next_deadline(), None);
}

#[test]
fn test_middle_button_does_nothing() {
    let now = Instant::now();
    let mut axis = vertical_axis(230, 400);
    let changes = axis.handle_event(
        &InputEvent::PointerDown {
            pos: Point::new(5, 5),
            button: MouseButton::Middle,
        },
        now,
    );
    assert!(changes.is_empty());
}

// ========================================================================
// Viewport
// ========================================================================

#[test]
fn test_viewport_shows_both_bars_when_needed() {
    let mut viewport = ScrollViewport::new(&ScrollbarConfig::default());
    viewport.set_client_size(Size::new(300, 200));
    viewport.set_content_size(Size::new(600, 900));
    assert!(viewport.is_bar_visible(Orientation::Horizontal));
    assert!(viewport.is_bar_visible(Orientation::Vertical));
    assert_eq!(viewport.viewport_rect().width, 285);
    assert_eq!(viewport.viewport_rect().height, 185);
    assert_eq!(viewport.axis(Orientation::Vertical).size(), Size::new(15, 185));
    assert_eq!(
        viewport.axis(Orientation::Horizontal).size(),
        Size::new(285, 15)
    );
}

#[test]
fn test_viewport_scroll_by_both_axes() {
    let mut viewport = ScrollViewport::new(&ScrollbarConfig::default());
    viewport.set_client_size(Size::new(300, 200));
    viewport.set_content_size(Size::new(600, 900));
    let changes = viewport.scroll_by(40, 70);
    assert!(changes.contains(Changes::SCROLL));
    assert_eq!(viewport.scroll_offset(), Point::new(40, 70));
}
