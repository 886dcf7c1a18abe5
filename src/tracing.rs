//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging scroll,
//! selection and caret state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=caret=trace,selection=debug` - scoped filtering
//! - `RUST_LOG=timer=trace,scroll=trace` - repeat timers and scrollbars
//!
//! # Log Files
//!
//! Logs are written to `~/.config/visual-toolkit/logs/visual-toolkit.log` with
//! daily rotation. File logging uses debug level by default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::list::ListView;
use crate::text_box::TextEditState;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes to
/// the config logs directory with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "visual-toolkit.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A host may already have installed a subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of caret/selection state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSnapshot {
    pub len: usize,
    pub caret: usize,
    pub selection_start: usize,
    pub selection_length: usize,
}

impl TextSnapshot {
    pub fn from_state(state: &TextEditState) -> Self {
        Self {
            len: state.len(),
            caret: state.caret_position(),
            selection_start: state.selection_start(),
            selection_length: state.selection_length(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &TextSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.len != other.len {
            changes.push(format!("len: {} → {}", self.len, other.len));
        }
        if self.caret != other.caret {
            changes.push(format!("caret: {} → {}", self.caret, other.caret));
        }
        if (self.selection_start, self.selection_length)
            != (other.selection_start, other.selection_length)
        {
            let status = if other.selection_length == 0 {
                "cleared".to_string()
            } else {
                format!(
                    "{}..{}",
                    other.selection_start,
                    other.selection_start + other.selection_length
                )
            };
            changes.push(format!("selection {}", status));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

/// Lightweight snapshot of list selection and scroll state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot {
    pub item_count: usize,
    pub selected: Option<usize>,
    pub scroll_y: i32,
}

impl ListSnapshot {
    pub fn from_list(list: &ListView) -> Self {
        Self {
            item_count: list.items().len(),
            selected: list.selected(),
            scroll_y: list.navigator().viewport().scroll_offset().y,
        }
    }

    pub fn diff(&self, other: &ListSnapshot) -> Option<String> {
        if self.item_count != other.item_count {
            return Some(format!(
                "item count: {} → {}",
                self.item_count, other.item_count
            ));
        }

        let mut changes = Vec::new();
        if self.selected != other.selected {
            changes.push(format!(
                "selected: {:?} → {:?}",
                self.selected, other.selected
            ));
        }
        if self.scroll_y != other.scroll_y {
            changes.push(format!("scroll: {} → {}", self.scroll_y, other.scroll_y));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
