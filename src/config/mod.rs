use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_tick_rate_ms() -> u64 {
    100
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// How long the event loop waits for input before redrawing
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// kitty.conf-style color file to take the theme from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_path: Option<PathBuf>,

    /// Show a desktop notification when the form is submitted
    #[serde(default)]
    pub notifications: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            theme_path: None,
            notifications: false,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("contact-form");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location, or create it with defaults
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if !path.exists() {
            let config = AppConfig::default();
            if let Err(e) = config.save_to(&path) {
                tracing::warn!("Failed to write default config: {}", e);
            }
            return Ok(config);
        }

        Ok(Self::load_from(&path))
    }

    /// Load config from an explicit file. Unreadable or malformed files
    /// fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Failed to parse config {}: {}", path.display(), e),
            },
            Err(e) => tracing::warn!("Failed to read config {}: {}", path.display(), e),
        }
        AppConfig::default()
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(content)?;
        // A zero poll interval would spin the event loop
        if config.tick_rate_ms == 0 {
            config.tick_rate_ms = default_tick_rate_ms();
        }
        Ok(config)
    }

    /// Save config to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
