//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.helpdesk/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::state::Theme;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HelpdeskConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub platforms: Vec<PlatformEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub theme: Option<Theme>,
    pub default_platform: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
}

/// One option in the platform selector. `name` is what gets sent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlatformEntry {
    pub name: String,
    pub label: Option<String>,
}

impl PlatformEntry {
    pub fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: Some(label.to_string()),
        }
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

pub const BASE_URL_ENV: &str = "HELPDESK_BASE_URL";
pub const PLATFORM_ENV: &str = "HELPDESK_PLATFORM";

pub fn default_platforms() -> Vec<PlatformEntry> {
    vec![
        PlatformEntry::new("segment", "Segment"),
        PlatformEntry::new("mparticle", "mParticle"),
        PlatformEntry::new("lytics", "Lytics"),
        PlatformEntry::new("zeotap", "Zeotap"),
    ]
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub theme: Theme,
    pub platforms: Vec<PlatformEntry>,
    /// Index into `platforms` selected at startup.
    pub selected_platform: usize,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides<'a> {
    pub base_url: Option<&'a str>,
    pub platform: Option<&'a str>,
    pub dark: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.helpdesk/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".helpdesk").join("config.toml"))
}

/// Load config from `~/.helpdesk/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HelpdeskConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<HelpdeskConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(HelpdeskConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(HelpdeskConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<HelpdeskConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: HelpdeskConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Helpdesk Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults -> this file -> env vars -> CLI flags.

# [general]
# theme = "light"                    # "light" or "dark"
# default_platform = "segment"       # Or set HELPDESK_PLATFORM env var

# [backend]
# base_url = "http://127.0.0.1:5000" # Or set HELPDESK_BASE_URL env var

# [[platforms]]
# name = "segment"                   # Value sent to the backend
# label = "Segment"                  # Shown in the selector

# [[platforms]]
# name = "mparticle"
# label = "mParticle"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `env` looks up an environment variable; pass `|k| std::env::var(k).ok()`.
pub fn resolve(
    config: &HelpdeskConfig,
    cli: CliOverrides<'_>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .map(|s| s.to_string())
        .or_else(|| env(BASE_URL_ENV))
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Theme: --dark flag → config → default
    let theme = if cli.dark {
        Theme::Dark
    } else {
        config.general.theme.unwrap_or_default()
    };

    let mut platforms = if config.platforms.is_empty() {
        default_platforms()
    } else {
        config.platforms.clone()
    };

    // Platform: CLI → env → config → first option
    let requested = cli
        .platform
        .map(|s| s.to_string())
        .or_else(|| env(PLATFORM_ENV));
    let explicit = requested.is_some();
    let requested = requested.or_else(|| config.general.default_platform.clone());

    let selected_platform = match requested {
        Some(name) => match platforms.iter().position(|p| p.name == name) {
            Some(idx) => idx,
            None if explicit => {
                // Not in the list but asked for by name: offer it as-is
                info!("Adding ad-hoc platform option '{}'", name);
                platforms.push(PlatformEntry { name, label: None });
                platforms.len() - 1
            }
            None => {
                warn!("Default platform '{}' is not configured, using first option", name);
                0
            }
        },
        None => 0,
    };

    ResolvedConfig {
        base_url,
        theme,
        platforms,
        selected_platform,
    }
}
