//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.courier/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CourierConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub composer: ComposerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ViewerConfig {
    pub auto_refresh: Option<bool>,
    pub refresh_interval_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ComposerConfig {
    pub prompt_switch_after_send: Option<bool>,
    pub switch_prompt_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub queue_label: Option<String>,
    pub queue_ui_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8089";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_SWITCH_PROMPT_DELAY_MS: u64 = 500;
/// Longest auto-refresh period accepted (one day).
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 86_400;
pub const DEFAULT_QUEUE_LABEL: &str = "Kafka";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub auto_refresh: bool,
    pub refresh_interval: Duration,
    pub prompt_switch_after_send: bool,
    pub switch_prompt_delay: Duration,
    pub queue_label: String,
    pub queue_ui_url: Option<String>,
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub auto_refresh: Option<bool>,
    pub refresh_secs: Option<u64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    InvalidBaseUrl(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::InvalidBaseUrl(url) => {
                write!(f, "invalid backend base URL: {url:?} (expected http:// or https://)")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.courier/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".courier").join("config.toml"))
}

/// Load config from `~/.courier/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `CourierConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<CourierConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(CourierConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(CourierConfig::default());
    }

    load_config_from(&path)
}

/// Load and parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<CourierConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: CourierConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Courier Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [backend]
# base_url = "http://localhost:8089"   # Or set COURIER_BASE_URL env var

# [viewer]
# auto_refresh = false                 # Start the list with auto-refresh on
# refresh_interval_secs = 5   # 1..=86400

# [composer]
# prompt_switch_after_send = true      # Offer to open the list after a send
# switch_prompt_delay_ms = 500

# [display]
# queue_label = "Kafka"
# queue_ui_url = "http://localhost:8090"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &CourierConfig, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    resolve_with_env(config, cli, std::env::var("COURIER_BASE_URL").ok())
}

/// Same as [`resolve`], with the environment lookup passed in.
pub fn resolve_with_env(
    config: &CourierConfig,
    cli: &CliOverrides,
    env_base_url: Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or(env_base_url)
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = normalize_base_url(&base_url)?;

    let auto_refresh = cli
        .auto_refresh
        .or(config.viewer.auto_refresh)
        .unwrap_or(false);

    // Zero would spin the timer; fall back to the default
    let refresh_secs = cli
        .refresh_secs
        .or(config.viewer.refresh_interval_secs)
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS)
        .min(MAX_REFRESH_INTERVAL_SECS);

    Ok(ResolvedConfig {
        base_url,
        auto_refresh,
        refresh_interval: Duration::from_secs(refresh_secs),
        prompt_switch_after_send: config.composer.prompt_switch_after_send.unwrap_or(true),
        switch_prompt_delay: Duration::from_millis(
            config
                .composer
                .switch_prompt_delay_ms
                .unwrap_or(DEFAULT_SWITCH_PROMPT_DELAY_MS),
        ),
        queue_label: config
            .display
            .queue_label
            .clone()
            .unwrap_or_else(|| DEFAULT_QUEUE_LABEL.to_string()),
        queue_ui_url: config.display.queue_ui_url.clone(),
    })
}

/// Validate an http(s) base URL and strip any trailing slash.
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let url = reqwest::Url::parse(trimmed)
        .map_err(|_| ConfigError::InvalidBaseUrl(trimmed.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidBaseUrl(trimmed.to_string()));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
