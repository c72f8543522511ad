//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the environment if one exists
//! 2. Attempts to load from environment variables
//! 3. If incomplete, falls back to loading from file
//! 4. Probes multiple paths for config files
//! 5. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `RESPONSYS_SERVER_URL`: Base URL for API calls
//! - `RESPONSYS_LOGIN_URL`: Base URL for the token endpoint
//! - `RESPONSYS_TIMEOUT_SECS`: Request timeout in seconds
//! - `RESPONSYS_CONTACT_LIST_DATABASE`: Database id written on merges
//! - `RESPONSYS_USERNAME`: API user name
//! - `RESPONSYS_PASSWORD`: API password
//! - `RESPONSYS_VERIFY_TLS`: Verify certificates (optional, default `true`)
//! - `RESPONSYS_LIST_FOLDER`: Contacts list folder (optional)
//! - `RESPONSYS_USER_AGENT`: `User-Agent` header (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./responsys.toml` or `./responsys.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. The same names in the parent directory
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use responsys_domain::{ResponsysConfig, ResponsysError, Result};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["responsys.toml", "responsys.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// Reads `.env`, then tries environment variables. If any required
/// variable is missing, falls back to a config file.
///
/// # Errors
/// Returns `ResponsysError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing or fail validation
pub fn load() -> Result<ResponsysConfig> {
    load_dotenv();

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Read `.env` into the process environment if present.
///
/// Variables already set are left untouched.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to read .env file"),
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `ResponsysError::Config` if required variables are missing,
/// have invalid values, or the result fails validation.
pub fn load_from_env() -> Result<ResponsysConfig> {
    let timeout_secs = env_var("RESPONSYS_TIMEOUT_SECS").and_then(|s| {
        s.trim()
            .parse::<u64>()
            .map_err(|e| ResponsysError::Config(format!("Invalid timeout: {e}")))
    })?;

    let mut config = ResponsysConfig::new(
        env_var("RESPONSYS_SERVER_URL")?,
        env_var("RESPONSYS_LOGIN_URL")?,
        timeout_secs,
        env_var("RESPONSYS_CONTACT_LIST_DATABASE")?,
        env_var("RESPONSYS_USERNAME")?,
        env_var("RESPONSYS_PASSWORD")?,
    );

    config.verify_tls = env_bool("RESPONSYS_VERIFY_TLS", config.verify_tls)?;
    if let Ok(folder) = std::env::var("RESPONSYS_LIST_FOLDER") {
        config.list_folder = folder;
    }
    if let Ok(agent) = std::env::var("RESPONSYS_USER_AGENT") {
        config.user_agent = agent;
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. JSON and TOML are
/// supported, detected by file extension.
///
/// # Errors
/// Returns `ResponsysError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing or fail validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<ResponsysConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ResponsysError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ResponsysError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ResponsysError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ResponsysConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ResponsysError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ResponsysError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ResponsysError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// Searches the current working directory and its parent, then the
/// executable's directory and its parent.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.clone());
        roots.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
            roots.push(exe_dir.join(".."));
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        ResponsysError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
/// Returns `default` when unset and `ResponsysError::Config` for anything else.
fn env_bool(key: &str, default: bool) -> Result<bool> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ResponsysError::Config(format!(
            "Invalid boolean for {key}: '{raw}' (expected 1/0, true/false, yes/no, on/off)"
        ))),
    }
}
