//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\goear-search\config.toml
//! - macOS: ~/Library/Application Support/goear-search/config.toml
//! - Linux: ~/.config/goear-search/config.toml
//!
//! The config file is human-readable and editable. Command-line flags
//! override whatever it says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::search::{EnrichmentFailurePolicy, SearchConfig, SearchOptions};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where and how to reach the catalog
    pub source: SourceConfig,

    /// Default search options
    pub search: SearchDefaults,
}

/// Catalog connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Catalog root URL
    pub base_url: String,

    /// User-Agent header for all requests
    pub user_agent: String,

    /// Per-request transport timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        let defaults = SearchConfig::default();
        Self {
            base_url: defaults.base_url,
            user_agent: defaults.user_agent,
            request_timeout_secs: defaults.request_timeout.as_secs(),
        }
    }
}

/// Default search options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    /// Minimum bitrate in kbps
    pub min_quality: u32,

    /// Number of tracks to return
    pub results_count: usize,

    /// Always look up artist/link per track
    pub extended_info: bool,

    /// Time budget in milliseconds (0 = unbounded)
    pub timeout_ms: u64,

    /// Concurrent detail lookups per page
    pub enrich_concurrency: usize,

    /// "drop" or "abort"
    pub enrichment_failure: EnrichmentFailurePolicy,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        let defaults = SearchOptions::default();
        Self {
            min_quality: defaults.min_quality,
            results_count: defaults.results_count,
            extended_info: defaults.extended_info,
            timeout_ms: 0,
            enrich_concurrency: defaults.enrich_concurrency,
            enrichment_failure: defaults.enrichment_failure,
        }
    }
}

impl SourceConfig {
    pub fn to_search_config(&self) -> SearchConfig {
        SearchConfig {
            base_url: self.base_url.clone(),
            user_agent: self.user_agent.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

impl SearchDefaults {
    pub fn to_options(&self) -> SearchOptions {
        SearchOptions {
            min_quality: self.min_quality,
            results_count: self.results_count,
            offset: 0,
            extended_info: self.extended_info,
            timeout: (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms)),
            enrich_concurrency: self.enrich_concurrency,
            enrichment_failure: self.enrichment_failure,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("goear-search"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from a specific file, falling back to defaults
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to the default location
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to a specific file
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
