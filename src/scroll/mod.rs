//! Scrolling: a single scrollbar axis and a two-axis viewport over content

mod axis;
mod viewport;

pub use axis::{DragState, ScrollAxis, ScrollPart};
pub use viewport::ScrollViewport;
