//! Configuration schema for fileicons
//!
//! Configuration is stored at `~/.config/fileicons/config.toml`

use crate::icons::ColourMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// How resolved icons are turned into classes
    pub display: DisplayConfig,

    /// Resolved-icon cache settings
    pub cache: CacheConfig,

    /// Icon table settings
    pub icons: IconsConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
        }
    }
}

/// Display options consulted when computing icon classes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Which colour variant to apply
    pub colour_mode: ColourMode,

    /// Only colour resources that carry a VCS status
    pub colour_changed_only: bool,

    /// Classes used for files without any icon (space separated)
    pub default_icon_class: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colour_mode: ColourMode::Dark,
            colour_changed_only: true,
            default_icon_class: "default-icon".to_string(),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Load and save the icon cache (default: true)
    pub enabled: bool,

    /// Treat the cache as read-only
    pub frozen: bool,

    /// Cache file location (defaults to the user cache directory)
    pub path: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            frozen: false,
            path: None,
        }
    }
}

/// Icon table configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IconsConfig {
    /// Custom icon table (TOML); the built-in table is used when unset
    pub table: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[display]"));
        assert!(toml.contains("colour_mode = \"dark\""));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.display, DisplayConfig::default());
        assert!(config.cache.enabled);
        assert!(!config.cache.frozen);
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [display]
            colour_mode = "light"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.display.colour_mode, ColourMode::Light);
        assert!(config.display.colour_changed_only); // default preserved
        assert_eq!(config.display.default_icon_class, "default-icon");
    }

    #[test]
    fn colour_mode_none() {
        let config: Config = toml::from_str("[display]\ncolour_mode = \"none\"").unwrap();
        assert_eq!(config.display.colour_mode, ColourMode::None);
    }
}
