//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\beatport2flac\config.toml
//! - macOS: ~/Library/Application Support/beatport2flac/config.toml
//! - Linux: ~/.config/beatport2flac/config.toml
//!
//! Every setting has a default, so the file is optional. Command-line
//! flags and environment variables override whatever the file says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::artwork::ArtworkPolicy;
use crate::catalog::DEFAULT_BASE_URL;
use crate::encoder::DEFAULT_PROGRAM;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog API settings
    pub catalog: CatalogConfig,

    /// Cover art settings
    pub artwork: ArtworkConfig,

    /// External encoder settings
    pub encoder: EncoderConfig,
}

/// Catalog API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Track lookup endpoint
    pub base_url: String,

    /// Per-request timeout, also applied to artwork downloads
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Cover art settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkConfig {
    /// Download and embed cover art when the catalog has one
    pub enabled: bool,

    /// What a failed download does to the file being converted
    pub policy: ArtworkPolicy,

    /// Where downloaded artwork is staged (system temp dir when unset)
    pub temp_dir: Option<PathBuf>,
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            policy: ArtworkPolicy::default(),
            temp_dir: None,
        }
    }
}

/// External encoder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Encoder executable, looked up in PATH unless absolute
    pub program: String,

    /// Kill the encoder after this many seconds (no limit when unset)
    pub timeout_secs: Option<u64>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            timeout_secs: None,
        }
    }
}

impl EncoderConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Reject values that parse but cannot work.
    pub fn validate(&self) -> Result<(), String> {
        if self.catalog.timeout_secs == 0 {
            return Err("catalog.timeout_secs must be at least 1".to_string());
        }
        if self.encoder.timeout_secs == Some(0) {
            return Err("encoder.timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("beatport2flac"))
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

    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Load configuration from an explicit path.
///
/// Unlike [`load`], a missing or malformed file is an error: the user
/// asked for this file specifically.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    let config: Config =
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    config
        .validate()
        .map_err(|reason| ConfigError::Invalid(path.to_path_buf(), reason))?;
    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Invalid config file {0}: {1}")]
    Invalid(PathBuf, String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[catalog]"));
        assert!(toml.contains("[artwork]"));
        assert!(toml.contains("[encoder]"));
        assert!(toml.contains("policy = \"fail-soft\""));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.catalog.base_url, "http://api.beatport.com/catalog/tracks");
        assert_eq!(config.catalog.timeout(), Duration::from_secs(30));
        assert!(config.artwork.enabled);
        assert_eq!(config.artwork.policy, ArtworkPolicy::FailSoft);
        assert_eq!(config.encoder.program, "flac");
        assert!(config.encoder.timeout().is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[artwork]
policy = "strict"

[encoder]
timeout_secs = 600
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.artwork.policy, ArtworkPolicy::Strict);
        assert_eq!(config.encoder.timeout(), Some(Duration::from_secs(600)));

        // Other fields use defaults
        assert!(config.artwork.enabled);
        assert_eq!(config.encoder.program, "flac");
        assert_eq!(config.catalog.timeout_secs, 30);
    }

    #[test]
    fn test_load_from_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let result = load_from(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Read(_, _))));
    }

    #[test]
    fn test_load_from_malformed_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[artwork]\npolicy = \"sometimes\"\n").unwrap();

        let result = load_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_, _))));
    }

    #[test]
    fn test_zero_timeouts_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "[catalog]\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(load_from(&path), Err(ConfigError::Invalid(_, _))));

        std::fs::write(&path, "[encoder]\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(load_from(&path), Err(ConfigError::Invalid(_, _))));

        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog]\nbase_url = \"http://localhost:9000/tracks\"\n").unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.catalog.base_url, "http://localhost:9000/tracks");
    }
}
