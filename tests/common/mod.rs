//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::time::{Duration, Instant};

use visual_toolkit::config::{ScrollbarConfig, ToolkitConfig};
use visual_toolkit::geometry::{Orientation, Size};
use visual_toolkit::input::{InputEvent, Key};
use visual_toolkit::{Changes, ListItem, ListView, ScrollAxis, TextBox};

/// A vertical scrollbar `height` pixels tall with range `0..=maximum`
pub fn vertical_axis(height: i32, maximum: i32) -> ScrollAxis {
    let mut axis = ScrollAxis::new(Orientation::Vertical, &ScrollbarConfig::default());
    axis.set_size(Size::new(15, height));
    axis.set_range(0, maximum);
    axis
}

/// A list of `count` rows sized to `width` x `height`
pub fn test_list(count: usize, width: i32, height: i32) -> ListView {
    let mut list = ListView::new(&ToolkitConfig::default());
    list.set_client_size(Size::new(width, height));
    list.set_items(
        (0..count)
            .map(|i| ListItem::new(format!("Item {}", i)))
            .collect(),
    );
    list
}

/// A text box holding `text` with the caret at `caret`
pub fn test_text_box(text: &str, caret: usize) -> TextBox {
    let mut text_box = TextBox::new(&ToolkitConfig::default());
    text_box.set_size(Size::new(300, 40));
    text_box.set_text(text);
    text_box
        .set_caret_position(caret)
        .expect("caret within test text");
    text_box
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Press and release `key` `hold` apart, returning the combined changes
pub fn tap_key(text_box: &mut TextBox, key: Key, at: Instant, hold: Duration) -> Changes {
    text_box.handle_event(&InputEvent::key_down(key), at)
        | text_box.handle_event(&InputEvent::key_up(key), at + hold)
}

/// Press and release `key` on a list `hold` apart
pub fn tap_list_key(list: &mut ListView, key: Key, at: Instant, hold: Duration) -> Changes {
    list.handle_event(&InputEvent::key_down(key), at)
        | list.handle_event(&InputEvent::key_up(key), at + hold)
}
