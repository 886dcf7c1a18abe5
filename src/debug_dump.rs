//! Debug state dump for development diagnostics
//!
//! Serializes a snapshot of widget state to JSON so a host can attach it to a
//! bug report or print it from a debug key binding.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::geometry::{Orientation, Rect, RectF, Size};
use crate::list::ListView;
use crate::scroll::{ScrollAxis, ScrollViewport};
use crate::text_box::{TextBox, TextMeasure};

#[derive(Debug, Serialize)]
pub struct ScrollAxisDump {
    pub orientation: Orientation,
    pub minimum: i32,
    pub maximum: i32,
    pub value: i32,
    pub size: Size,
    pub track_length: i32,
    pub thumb: Option<RectF>,
    pub dragging: bool,
    pub paging: bool,
}

impl ScrollAxisDump {
    pub fn from_axis(axis: &ScrollAxis) -> Self {
        Self {
            orientation: axis.orientation(),
            minimum: axis.minimum(),
            maximum: axis.maximum(),
            value: axis.value(),
            size: axis.size(),
            track_length: axis.track_length(),
            thumb: axis.thumb_bounds(),
            dragging: axis.is_dragging(),
            paging: axis.is_paging(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ViewportDump {
    pub client: Size,
    pub content: Size,
    pub viewport: Rect,
    pub scroll_x: i32,
    pub scroll_y: i32,
    /// Only the visible bars
    pub bars: Vec<ScrollAxisDump>,
}

impl ViewportDump {
    pub fn from_viewport(viewport: &ScrollViewport) -> Self {
        let offset = viewport.scroll_offset();
        Self {
            client: viewport.client_size(),
            content: viewport.content_size(),
            viewport: viewport.viewport_rect(),
            scroll_x: offset.x,
            scroll_y: offset.y,
            bars: [Orientation::Horizontal, Orientation::Vertical]
                .into_iter()
                .filter(|&o| viewport.is_bar_visible(o))
                .map(|o| ScrollAxisDump::from_axis(viewport.axis(o)))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListDump {
    pub item_count: usize,
    pub item_height: i32,
    pub selected: Option<usize>,
    pub selected_title: Option<String>,
    pub hovered: Option<usize>,
    pub visible_rows: (usize, usize),
    pub viewport: ViewportDump,
}

impl ListDump {
    pub fn from_list(list: &ListView) -> Self {
        let navigator = list.navigator();
        let visible = navigator.visible_range();
        Self {
            item_count: navigator.item_count(),
            item_height: navigator.item_height(),
            selected: list.selected(),
            selected_title: list.selected_item().map(|item| item.title.clone()),
            hovered: list.hovered(),
            visible_rows: (visible.start, visible.end),
            viewport: ViewportDump::from_viewport(navigator.viewport()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TextBoxDump {
    pub text: String,
    pub len: usize,
    pub caret: usize,
    pub selection_start: usize,
    pub selection_length: usize,
    pub caret_selection_active: bool,
    pub editable: bool,
    pub focused: bool,
    pub caret_visible: bool,
    pub char_positions: Vec<i32>,
}

impl TextBoxDump {
    pub fn from_text_box<M: TextMeasure>(text_box: &TextBox<M>) -> Self {
        let state = text_box.state();
        Self {
            text: state.text().to_string(),
            len: state.len(),
            caret: state.caret_position(),
            selection_start: state.selection_start(),
            selection_length: state.selection_length(),
            caret_selection_active: state.is_caret_selection_active(),
            editable: text_box.is_editable(),
            focused: text_box.is_focused(),
            caret_visible: text_box.is_caret_visible(),
            char_positions: text_box.char_positions(),
        }
    }
}

/// A named collection of widget dumps
#[derive(Debug, Default, Serialize)]
pub struct StateDump {
    pub timestamp: u64,
    pub lists: Vec<(String, ListDump)>,
    pub text_boxes: Vec<(String, TextBoxDump)>,
    pub scrollbars: Vec<(String, ScrollAxisDump)>,
}

impl StateDump {
    pub fn new() -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self {
            timestamp,
            ..Default::default()
        }
    }

    pub fn with_list(mut self, name: impl Into<String>, list: &ListView) -> Self {
        self.lists.push((name.into(), ListDump::from_list(list)));
        self
    }

    pub fn with_text_box<M: TextMeasure>(
        mut self,
        name: impl Into<String>,
        text_box: &TextBox<M>,
    ) -> Self {
        self.text_boxes
            .push((name.into(), TextBoxDump::from_text_box(text_box)));
        self
    }

    pub fn with_scrollbar(mut self, name: impl Into<String>, axis: &ScrollAxis) -> Self {
        self.scrollbars
            .push((name.into(), ScrollAxisDump::from_axis(axis)));
        self
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    /// Write to `<dir>/<timestamp>-state-dump.json`, creating `dir`
    pub fn save_to_dir(&self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}-state-dump.json", self.timestamp));
        std::fs::write(&path, self.to_json())?;
        Ok(path)
    }
}
