//! User settings persistence.
//!
//! Remembers the chosen sticker style and model between sessions.
//! Generated images and uploads are never persisted.

use crate::config::Config;
use crate::error::Result;
use crate::style::StickerStyle;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User-configurable settings persisted between sessions.
///
/// Stored as JSON in the user's config directory
/// (e.g., `~/.config/sticker-maker/settings.json` on Linux).
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Sticker style used for the next upload.
    pub style: StickerStyle,
    /// Model name fallback; empty means use the configured model. There is
    /// no UI control for this field: it is set by editing `settings.json`
    /// directly, and an explicit env or `--model` choice always wins.
    #[serde(default)]
    pub model: String,
}

impl Settings {
    /// Returns the path to the settings file.
    ///
    /// Creates the config directory if it doesn't exist.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "sticker-maker").map(|dirs| {
            let config_dir = dirs.config_dir();
            if !config_dir.exists() {
                let _ = fs::create_dir_all(config_dir);
            }
            config_dir.join("settings.json")
        })
    }

    /// Loads settings from disk, falling back to defaults if not found.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(&path).ok())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Resolves which model to use for generation.
    ///
    /// The persisted model is only a fallback: it applies when the config
    /// still carries the built-in default. An explicit choice (env var,
    /// CLI flag) is never shadowed.
    pub fn effective_model(&self, config: &Config) -> String {
        if config.model_overridden || self.model.is_empty() {
            config.model_name.clone()
        } else {
            self.model.clone()
        }
    }

    /// Persists settings to disk.
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            let json = serde_json::to_string_pretty(self)?;
            fs::write(path, json)?;
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: StickerStyle::default(),
            model: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaulted_config() -> Config {
        let mut config = Config::new("test-key", "default-model").unwrap();
        config.model_overridden = false;
        config
    }

    #[test]
    fn explicit_model_choice_beats_the_persisted_one() {
        let settings = Settings {
            style: StickerStyle::Redraw,
            model: "persisted-model".to_string(),
        };
        // Config::new marks the model as explicitly chosen
        let config = Config::new("test-key", "cli-model").unwrap();

        assert_eq!(settings.effective_model(&config), "cli-model");
    }

    #[test]
    fn persisted_model_applies_when_only_the_default_is_configured() {
        let settings = Settings {
            style: StickerStyle::Redraw,
            model: "persisted-model".to_string(),
        };

        assert_eq!(settings.effective_model(&defaulted_config()), "persisted-model");
    }

    #[test]
    fn empty_persisted_model_keeps_the_configured_one() {
        let settings = Settings::default();

        assert_eq!(settings.effective_model(&defaulted_config()), "default-model");
    }
}
