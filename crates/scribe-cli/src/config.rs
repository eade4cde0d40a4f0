//! Configuration file management for scribe.
//!
//! Provides a TOML-based config file at `~/.config/scribe/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use scribe_core::config::{DEFAULT_HOST, DEFAULT_MODEL};

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub model: ModelSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelSection {
    /// Ollama server base URL.
    pub host: String,
    /// Model name to generate with.
    pub name: String,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the scribe config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/scribe` or `~/.config/scribe`.
/// We intentionally ignore the platform-specific `dirs::config_dir()`
/// (which returns `~/Library/Application Support` on macOS).
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("scribe");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("scribe")
}

/// Return the path to the scribe config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    // Set permissions to 0600 (owner read/write only) on Unix.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved model settings, ready for use.
#[derive(Debug)]
pub struct ScribeConfig {
    pub host: String,
    pub model: String,
}

impl ScribeConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Host: `cli_host` > `SCRIBE_HOST` env > `config_file.model.host` > `DEFAULT_HOST`
    /// - Model: `cli_model` > `SCRIBE_MODEL` env > `config_file.model.name` > `DEFAULT_MODEL`
    pub fn resolve(cli_host: Option<&str>, cli_model: Option<&str>) -> Self {
        let file_config = load_config().ok();

        let host = if let Some(host) = cli_host {
            host.to_string()
        } else if let Ok(host) = std::env::var("SCRIBE_HOST") {
            host
        } else if let Some(ref cfg) = file_config {
            cfg.model.host.clone()
        } else {
            DEFAULT_HOST.to_string()
        };

        let model = if let Some(model) = cli_model {
            model.to_string()
        } else if let Ok(model) = std::env::var("SCRIBE_MODEL") {
            model
        } else if let Some(ref cfg) = file_config {
            cfg.model.name.clone()
        } else {
            DEFAULT_MODEL.to_string()
        };

        Self { host, model }
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
