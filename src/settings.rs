//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/blockfall/settings.toml (or platform equivalent).
//! Gameplay rules and key bindings are fixed; only presentation options and
//! an optional piece seed live here.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Visual settings
    pub visual: VisualSettings,
    /// Audio settings
    pub audio: AudioSettings,
    /// Gameplay settings
    pub gameplay: GameplaySettings,
}

/// Visual settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Block style: "solid", "bracket", "round"
    pub block_style: String,
    /// Show the next-piece preview box
    pub show_next: bool,
    /// Show the hold box
    pub show_hold: bool,
}

/// Audio settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub music_enabled: bool,
    /// Music volume (0-100)
    pub music_volume: u32,
    /// Looping background track, relative to the working directory
    pub music_file: PathBuf,
}

/// Gameplay settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Fixed piece seed; random when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            block_style: "solid".to_string(),
            show_next: true,
            show_hold: true,
        }
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            music_volume: 50,
            music_file: PathBuf::from("background.mp3"),
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Whether a settings file already exists
    pub fn exists() -> bool {
        Self::settings_path().is_some_and(|path| path.exists())
    }

    /// Load settings from file, or fall back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("Could not determine config directory, using default settings");
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid settings at {}: {:#}", path.display(), e);
                Self::default()
            }),
            Err(_) => {
                tracing::debug!("No settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Parse settings from TOML text; missing fields take defaults
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse settings")
    }

    /// Save settings to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir().context("Could not determine config directory")?;
        let path = dir.join("settings.toml");

        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config dir {}", dir.display()))?;

        let contents = toml::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;

        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Music volume as a 0.0 to 1.0 gain
    pub fn music_gain(&self) -> f32 {
        self.audio.music_volume.min(100) as f32 / 100.0
    }
}

impl VisualSettings {
    /// Get the block characters based on style
    pub fn block_chars(&self) -> &'static str {
        match self.block_style.as_str() {
            "bracket" => "[]",
            "round" => "()",
            _ => "██", // "solid" or default
        }
    }
}
