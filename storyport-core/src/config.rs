//! Configuration management for storyport
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (STORYPORT_*)
//! 3. Config file (~/.config/storyport/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Where the stories document lives
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path to the stories markdown file
    pub path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("USER_STORIES.md"),
        }
    }
}

/// Tracker-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Path to the gh executable
    pub gh_path: String,

    /// Target repository (owner/repo); inferred when unset
    pub repo: Option<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            gh_path: "gh".to_string(),
            repo: None,
        }
    }
}

/// Issue creation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Pause between consecutive issue creations
    #[serde(with = "humantime_serde")]
    pub delay: Duration,

    /// Extra labels added to every created issue
    pub labels: Vec<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
            labels: Vec::new(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Stories document
    pub source: SourceConfig,

    /// Tracker client
    pub tracker: TrackerConfig,

    /// Issue creation
    pub publish: PublishConfig,
}

/// Values given on the command line, applied last
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub stories_file: Option<PathBuf>,
    pub gh_path: Option<String>,
    pub repo: Option<String>,
    pub delay: Option<Duration>,
    pub labels: Vec<String>,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/storyport/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("storyport").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - STORYPORT_STORIES_FILE: Path to the stories document
    /// - STORYPORT_GH_PATH: Path to gh executable
    /// - STORYPORT_REPO: Target repository
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var("STORYPORT_STORIES_FILE") {
            self.source.path = PathBuf::from(path);
        }

        if let Ok(gh_path) = std::env::var("STORYPORT_GH_PATH") {
            self.tracker.gh_path = gh_path;
        }

        if let Ok(repo) = std::env::var("STORYPORT_REPO") {
            if !repo.trim().is_empty() {
                self.tracker.repo = Some(repo);
            }
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, overrides: CliOverrides) -> Self {
        if let Some(path) = overrides.stories_file {
            self.source.path = path;
        }

        if let Some(gh_path) = overrides.gh_path {
            self.tracker.gh_path = gh_path;
        }

        if let Some(repo) = overrides.repo {
            self.tracker.repo = Some(repo);
        }

        if let Some(delay) = overrides.delay {
            self.publish.delay = delay;
        }

        for label in overrides.labels {
            if !self.publish.labels.contains(&label) {
                self.publish.labels.push(label);
            }
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(overrides: CliOverrides) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(overrides))
    }
}
