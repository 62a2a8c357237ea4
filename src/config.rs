//! Configuration loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. explicit path (e.g. `--config <path>`)
//! 2. `~/.sightseer/config.toml` (user)
//! 3. `/etc/sightseer/config.toml` (system)
//!
//! Every section is optional. The API key is loaded separately with mandatory
//! permission checks:
//! 1. `~/.sightseer/secrets.toml` (user, must be 0600)
//! 2. `/etc/sightseer/secrets.toml` (system, must be 0600)
//! 3. `GOOGLE_PLACES_API_KEY` environment variable

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::providers::RetryConfig;
use crate::providers::google::DEFAULT_BASE_URL;
use crate::types::PhotoSize;
use crate::{Result, SightseerError};

/// Environment variable consulted when no secrets file holds the key.
pub const API_KEY_ENV_VAR: &str = "GOOGLE_PLACES_API_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub cache: CacheSection,
    #[serde(default)]
    pub retry: RetrySection,
    #[serde(default)]
    pub photos: PhotoSection,
}

/// Places API endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// API base URL (default: https://places.googleapis.com).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Cache bounds.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSection {
    /// Maximum cached places (default: 500).
    #[serde(default = "default_place_max_entries")]
    pub place_max_entries: u64,
    /// Image cache budget in megabytes (default: 64).
    #[serde(default = "default_image_max_mb")]
    pub image_max_mb: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            place_max_entries: default_place_max_entries(),
            image_max_mb: default_image_max_mb(),
        }
    }
}

fn default_place_max_entries() -> u64 {
    500
}

fn default_image_max_mb() -> u64 {
    64
}

/// Place-resolution retry policy.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySection {
    /// Attempts including the first (default: 3).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Base backoff delay in milliseconds (default: 100).
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Backoff cap in milliseconds (default: 5000).
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetrySection {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    100
}

fn default_max_delay_ms() -> u64 {
    5_000
}

/// Photo size tiers, in pixels.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSection {
    #[serde(default = "default_compact_px")]
    pub compact_px: u32,
    #[serde(default = "default_expanded_px")]
    pub expanded_px: u32,
}

impl Default for PhotoSection {
    fn default() -> Self {
        Self {
            compact_px: default_compact_px(),
            expanded_px: default_expanded_px(),
        }
    }
}

fn default_compact_px() -> u32 {
    400
}

fn default_expanded_px() -> u32 {
    1600
}

/// Secrets configuration (API key).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub google_places: Option<ApiKeySecret>,
}

/// A single API key secret.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySecret {
    pub api_key: String,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// An explicit path must exist. Without one, the first file found is
    /// used; if there is none, defaults apply.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a config file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SightseerError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            SightseerError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(SightseerError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".sightseer").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/sightseer/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new()
            .max_attempts(self.retry.max_attempts)
            .initial_delay(Duration::from_millis(self.retry.initial_delay_ms))
            .max_delay(Duration::from_millis(self.retry.max_delay_ms))
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new()
            .place_max_entries(self.cache.place_max_entries)
            .image_max_bytes(self.cache.image_max_mb.saturating_mul(1024 * 1024))
    }

    pub fn compact_size(&self) -> PhotoSize {
        PhotoSize::new(self.photos.compact_px, self.photos.compact_px)
    }

    pub fn expanded_size(&self) -> PhotoSize {
        PhotoSize::new(self.photos.expanded_px, self.photos.expanded_px)
    }
}

impl Secrets {
    /// Load secrets from the standard locations with permission checks.
    ///
    /// Resolution order:
    /// 1. `~/.sightseer/secrets.toml` (if exists, must be 0600)
    /// 2. `/etc/sightseer/secrets.toml` (if exists, must be 0600)
    ///
    /// Returns empty secrets if no file exists (the key may come from the
    /// environment).
    pub fn load() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let user_secrets = home.join(".sightseer").join("secrets.toml");
            if user_secrets.exists() {
                Self::check_permissions(&user_secrets)?;
                return Self::load_from_file(&user_secrets);
            }
        }

        let system_secrets = PathBuf::from("/etc/sightseer/secrets.toml");
        if system_secrets.exists() {
            Self::check_permissions(&system_secrets)?;
            return Self::load_from_file(&system_secrets);
        }

        Ok(Secrets::default())
    }

    /// Parse a secrets file without the permission check.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SightseerError::Configuration(format!("Failed to read secrets file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            SightseerError::Configuration(format!("Failed to parse secrets file {path:?}: {e}"))
        })
    }

    /// Check that the secrets file has secure permissions (0600 or 0400).
    #[cfg(unix)]
    pub fn check_permissions(path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(path).map_err(|e| {
            SightseerError::Configuration(format!("Failed to stat secrets file {path:?}: {e}"))
        })?;

        let mode = metadata.permissions().mode();
        // Reject if group or other bits are set
        if mode & 0o077 != 0 {
            return Err(SightseerError::Configuration(format!(
                "Secrets file {path:?} has insecure permissions {:o}. Must be 0600 or 0400.",
                mode & 0o777
            )));
        }

        Ok(())
    }

    #[cfg(not(unix))]
    pub fn check_permissions(_path: &Path) -> Result<()> {
        Ok(())
    }

    /// The Places API key, falling back to [`API_KEY_ENV_VAR`].
    pub fn api_key(&self) -> Option<String> {
        self.google_places
            .as_ref()
            .map(|s| s.api_key.clone())
            .or_else(|| std::env::var(API_KEY_ENV_VAR).ok())
            .filter(|k| !k.is_empty())
    }
}
