//! Application configuration
//!
//! Loaded once at startup from a TOML file in the user's config directory:
//! - Linux: ~/.config/pixseek/config.toml
//! - macOS: ~/Library/Application Support/pixseek/config.toml
//! - Windows: %APPDATA%\pixseek\config.toml
//!
//! A missing file is fine (defaults apply); a malformed file logs a warning
//! and falls back to defaults rather than refusing to start.

use serde::Deserialize;
use std::path::PathBuf;

/// Runtime configuration for the client
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the image-search API, no trailing slash
    pub api_base_url: String,
    /// Public hostname used to resolve s3:// storage references
    pub storage_domain: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: "http://localhost:8999".to_string(),
            storage_domain: "s3.us-east-1.amazonaws.com".to_string(),
        }
    }
}

impl Config {
    /// Load the configuration, falling back to defaults when the file is
    /// absent or unreadable
    pub fn load() -> Self {
        let path = Self::config_path();

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(_) => {
                println!("📁 No config at {}, using defaults", path.display());
                return Config::default();
            }
        };

        match Self::parse(&contents) {
            Ok(config) => {
                println!("📁 Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                eprintln!("⚠️  Ignoring malformed config {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    /// Parse a TOML document into a Config
    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(contents)?;
        // Keep URL joining simple everywhere else
        while config.api_base_url.ends_with('/') {
            config.api_base_url.pop();
        }
        Ok(config)
    }

    /// Where the config file is expected to live
    fn config_path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        path.push("pixseek");
        path.push("config.toml");
        path
    }
}
