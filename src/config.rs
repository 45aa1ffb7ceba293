use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::model::CornerPosition;

/// Locally supplied widget options. Each field overrides the matching
/// server-provided value when set; unset fields fall back to the remote
/// configuration or a built-in default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetOptions {
    /// Bearer credential for the chatbot API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Corner to dock the widget to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<CornerPosition>,

    /// Accent color as a hex string, e.g. "#007bff".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,

    /// Chatbot API endpoint override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl WidgetOptions {
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".chatdock").join("config.toml"))
    }

    /// Load options from ~/.chatdock/config.toml, or defaults when no
    /// file exists.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save options to ~/.chatdock/config.toml.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create .chatdock directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Layer these options over a fallback set: every unset field takes
    /// the fallback's value. Used to put CLI flags above the file.
    pub fn merged_over(mut self, fallback: Self) -> Self {
        self.api_key = self.api_key.or(fallback.api_key);
        self.position = self.position.or(fallback.position);
        self.primary_color = self.primary_color.or(fallback.primary_color);
        self.base_url = self.base_url.or(fallback.base_url);
        self
    }
}
