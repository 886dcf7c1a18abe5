//! Visual Toolkit - interactive navigation and editing engine
//!
//! This crate provides the state machines behind a scrollbar, a virtualized
//! list and a single-line text box. Widgets take host input events and timer
//! ticks, return [`Changes`] flags, and leave painting to the host.

pub mod changes;
pub mod config;
pub mod config_paths;
pub mod debug_dump;
pub mod error;
pub mod geometry;
pub mod input;
pub mod list;
pub mod notify;
pub mod scroll;
pub mod text_box;
pub mod timer;
pub mod tracing;
pub mod widget;

// Re-export commonly used types
pub use changes::Changes;
pub use config::ToolkitConfig;
pub use error::ToolkitError;
pub use input::InputEvent;
pub use list::{ListItem, ListView, SelectionNavigator};
pub use notify::{Dispatcher, Notification, WidgetId};
pub use scroll::{ScrollAxis, ScrollViewport};
pub use text_box::{TextBox, TextEditState};
pub use timer::RepeatTimer;
pub use widget::Interactive;
