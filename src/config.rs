//! Toolkit configuration
//!
//! Stored in `~/.config/visual-toolkit/config.yaml`. Every field has a
//! default, so a partial file (or none at all) is fine. The loaded value is
//! passed explicitly to each widget constructor; nothing reads it globally.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::list::InvocationMode;

/// Configuration for all widgets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolkitConfig {
    #[serde(default)]
    pub scrollbar: ScrollbarConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub text_box: TextBoxConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollbarConfig {
    /// Cross-axis size of the bar; also the side of each paging button
    pub thickness: i32,
    /// Value change per near/far button tick
    pub page_step: i32,
    /// Repeat cadence while a paging button is held
    pub repeat_interval_ms: u64,
}

impl Default for ScrollbarConfig {
    fn default() -> Self {
        Self {
            thickness: 15,
            page_step: 15,
            repeat_interval_ms: 40,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub item_height: i32,
    /// Border around each row; also the scroll-into-view padding
    pub border_width: i32,
    /// Repeat cadence while an arrow key is held
    pub repeat_interval_ms: u64,
    pub invocation: InvocationMode,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            item_height: 50,
            border_width: 2,
            repeat_interval_ms: 300,
            invocation: InvocationMode::NONE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextBoxConfig {
    pub padding: i32,
    pub border_width: i32,
    /// Repeat cadence for held Left/Right/Backspace/Delete
    pub repeat_interval_ms: u64,
    pub caret_blink_ms: u64,
}

impl Default for TextBoxConfig {
    fn default() -> Self {
        Self {
            padding: 10,
            border_width: 2,
            repeat_interval_ms: 500,
            caret_blink_ms: 500,
        }
    }
}

impl ToolkitConfig {
    /// Load config from the default location, or return defaults if missing
    /// or unreadable
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Save config to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        let path = crate::config_paths::config_file()
            .context("No config directory available")?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_widget_constants() {
        let config = ToolkitConfig::default();
        assert_eq!(config.scrollbar.thickness, 15);
        assert_eq!(config.scrollbar.page_step, 15);
        assert_eq!(config.list.item_height, 50);
        assert_eq!(config.list.repeat_interval_ms, 300);
        assert_eq!(config.text_box.repeat_interval_ms, 500);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = ToolkitConfig::from_yaml("list:\n  item_height: 32\n").unwrap();
        assert_eq!(config.list.item_height, 32);
        assert_eq!(config.list.border_width, 2);
        assert_eq!(config.scrollbar, ScrollbarConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(ToolkitConfig::from_yaml("list: [1, 2").is_err());
    }
}
