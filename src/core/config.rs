//! Application configuration management
//!
//! Handles loading and saving application settings including:
//! - Screening API base URL
//! - Number of top results requested per screening run

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreenError};

/// Address of a locally running screening backend
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Environment variable that overrides the configured API base URL
pub const API_BASE_ENV: &str = "CV_SCREEN_API_BASE";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the screening API
    #[serde(default = "default_api_base")]
    pub api_base_url: String,

    /// How many ranked resumes a screening run asks for
    #[serde(default = "default_top_n")]
    pub top_n: u32,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_top_n() -> u32 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base(),
            top_n: default_top_n(),
        }
    }
}

impl Config {
    /// Load configuration from file, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "cv-screen", "cv-screen")
            .ok_or_else(|| ScreenError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Set the API base URL, rejecting values that do not parse as URLs
    pub fn set_api_base(&mut self, value: &str) -> Result<()> {
        let parsed = url::Url::parse(value.trim())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScreenError::InvalidInput(format!(
                "API base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        self.api_base_url = value.trim().to_string();
        Ok(())
    }

    /// Set the number of results per screening run
    pub fn set_top_n(&mut self, value: &str) -> Result<()> {
        let top_n: u32 = value.trim().parse().map_err(|_| {
            ScreenError::InvalidInput(format!("top-n must be a positive number, got '{}'", value))
        })?;
        if top_n == 0 {
            return Err(ScreenError::InvalidInput(
                "top-n must be at least 1".to_string(),
            ));
        }
        self.top_n = top_n;
        Ok(())
    }

    /// Apply a command-line/environment override of the base URL
    pub fn with_api_base_override(mut self, api_base: Option<String>) -> Self {
        if let Some(base) = api_base.filter(|b| !b.trim().is_empty()) {
            self.api_base_url = base.trim().to_string();
        }
        self
    }
}
