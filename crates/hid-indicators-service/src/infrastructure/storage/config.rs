//! TOML-based configuration for the indicator service.
//!
//! Reads `IndicatorConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\HidIndicators\config.toml`
//! - Linux:    `~/.config/hid-indicators/config.toml`
//! - macOS:    `~/Library/Application Support/HidIndicators/config.toml`
//!
//! ```toml
//! [device]
//! wired = true
//! wireless_profiles = 5
//! preferred_transport = "wired"
//!
//! [split]
//! role = "central"
//! forward_timeout_ms = 50
//! ```
//!
//! Every field has a `#[serde(default = "...")]` helper, so an empty file (or
//! no file at all) yields a working single-keyboard setup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use hid_indicators_core::{SlotLayout, Transport};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::notify_changes::SplitRole;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IndicatorConfig {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub split: SplitConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Which host transports the keyboard supports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceConfig {
    /// Whether the wired (USB) transport is present.
    #[serde(default = "default_true")]
    pub wired: bool,
    /// Number of wireless pairing profiles; 0 disables wireless.
    #[serde(default = "default_wireless_profiles")]
    pub wireless_profiles: u8,
    /// Transport selected at startup.
    #[serde(default = "default_preferred_transport")]
    pub preferred_transport: Transport,
}

/// Split-keyboard settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SplitConfig {
    #[serde(default)]
    pub role: SplitRole,
    /// Upper bound on a single forward to the peripheral half.
    #[serde(default = "default_forward_timeout_ms")]
    pub forward_timeout_ms: u64,
    /// Pending updates the peripheral link may queue.
    #[serde(default = "default_link_capacity")]
    pub link_capacity: usize,
}

/// Runtime settings for the service process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    /// `tracing` log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Events each status subscriber may buffer.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_wireless_profiles() -> u8 {
    5
}
fn default_preferred_transport() -> Transport {
    Transport::Wired
}
fn default_forward_timeout_ms() -> u64 {
    50
}
fn default_link_capacity() -> usize {
    8
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_event_capacity() -> usize {
    16
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            wired: default_true(),
            wireless_profiles: default_wireless_profiles(),
            preferred_transport: default_preferred_transport(),
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            role: SplitRole::default(),
            forward_timeout_ms: default_forward_timeout_ms(),
            link_capacity: default_link_capacity(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl DeviceConfig {
    /// The indicator table layout for this device.
    pub fn slot_layout(&self) -> SlotLayout {
        SlotLayout::new(self.wired, self.wireless_profiles)
    }
}

impl SplitConfig {
    pub fn forward_timeout(&self) -> Duration {
        Duration::from_millis(self.forward_timeout_ms)
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads the config from the platform config file, returning defaults if the
/// file does not exist yet.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<IndicatorConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads the config from `path`, returning defaults if the file is absent.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<IndicatorConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(IndicatorConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &IndicatorConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the default config to `path` unless a file is already there.
///
/// Returns `true` if a file was written.
///
/// # Errors
///
/// See [`save_config`].
pub fn write_default_if_missing(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }
    save_config(&IndicatorConfig::default(), path)?;
    Ok(true)
}

/// Resolves the platform config directory for this service.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("HidIndicators"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("hid-indicators"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("HidIndicators")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
