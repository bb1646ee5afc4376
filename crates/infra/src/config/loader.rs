//! Configuration loader
//!
//! Loads telemetry configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `CAMPUSTRACE_API_BASE_URL`: Portal API base URL (required)
//! - `CAMPUSTRACE_API_TIMEOUT`: Request timeout in seconds
//! - `CAMPUSTRACE_QUEUE_CAPACITY`: Delivery queue capacity
//! - `CAMPUSTRACE_DRAIN_TIMEOUT`: Shutdown drain timeout in seconds
//!
//! ## File Locations
//! The loader probes `config.{json,toml}` and `campustrace.{json,toml}` in
//! the current working directory, its parent, and next to the executable.

use std::path::{Path, PathBuf};

use campustrace_domain::constants::{
    DEFAULT_API_TIMEOUT_SECS, DEFAULT_DRAIN_TIMEOUT_SECS, DEFAULT_QUEUE_CAPACITY,
};
use campustrace_domain::{ApiConfig, DeliveryConfig, Result, TelemetryConfig, TelemetryError};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `TelemetryError::Config` if configuration cannot be loaded from
/// either source.
pub fn load() -> Result<TelemetryConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "environment incomplete; trying config file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `CAMPUSTRACE_API_BASE_URL` is required; the remaining variables fall
/// back to defaults.
///
/// # Errors
/// Returns `TelemetryError::Config` if the base URL is missing or any set
/// variable has an invalid value.
pub fn load_from_env() -> Result<TelemetryConfig> {
    let base_url = std::env::var("CAMPUSTRACE_API_BASE_URL").map_err(|_| {
        TelemetryError::Config(
            "Missing required environment variable: CAMPUSTRACE_API_BASE_URL".to_string(),
        )
    })?;

    let timeout_seconds = env_u64("CAMPUSTRACE_API_TIMEOUT", DEFAULT_API_TIMEOUT_SECS)?;
    let queue_capacity = env_u64("CAMPUSTRACE_QUEUE_CAPACITY", DEFAULT_QUEUE_CAPACITY as u64)?;
    let drain_timeout_seconds = env_u64("CAMPUSTRACE_DRAIN_TIMEOUT", DEFAULT_DRAIN_TIMEOUT_SECS)?;

    Ok(TelemetryConfig {
        api: ApiConfig { base_url, timeout_seconds },
        delivery: DeliveryConfig {
            queue_capacity: queue_capacity as usize,
            drain_timeout_seconds,
        },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Supports both JSON
/// and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `TelemetryError::Config` if no file is found, the format is
/// unsupported, or parsing fails.
pub fn load_from_file(path: Option<PathBuf>) -> Result<TelemetryConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TelemetryError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            TelemetryError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| TelemetryError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<TelemetryConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TelemetryError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TelemetryError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(TelemetryError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    candidate_paths().into_iter().find(|path| path.exists())
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("campustrace.json"),
            cwd.join("campustrace.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../campustrace.json"),
            cwd.join("../campustrace.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("campustrace.json"),
                exe_dir.join("campustrace.toml"),
            ]);
        }
    }

    candidates
}

fn env_u64(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|e| TelemetryError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    // Env vars are process-global; serialize the tests that touch them
    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn clear_env() {
        std::env::remove_var("CAMPUSTRACE_API_BASE_URL");
        std::env::remove_var("CAMPUSTRACE_API_TIMEOUT");
        std::env::remove_var("CAMPUSTRACE_QUEUE_CAPACITY");
        std::env::remove_var("CAMPUSTRACE_DRAIN_TIMEOUT");
    }

    #[test]
    fn load_from_env_with_all_vars() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CAMPUSTRACE_API_BASE_URL", "https://portal.test.edu/api");
        std::env::set_var("CAMPUSTRACE_API_TIMEOUT", "20");
        std::env::set_var("CAMPUSTRACE_QUEUE_CAPACITY", "512");
        std::env::set_var("CAMPUSTRACE_DRAIN_TIMEOUT", "8");

        let config = load_from_env().unwrap();
        assert_eq!(config.api.base_url, "https://portal.test.edu/api");
        assert_eq!(config.api.timeout_seconds, 20);
        assert_eq!(config.delivery.queue_capacity, 512);
        assert_eq!(config.delivery.drain_timeout_seconds, 8);

        clear_env();
    }

    #[test]
    fn load_from_env_applies_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CAMPUSTRACE_API_BASE_URL", "https://portal.test.edu/api");

        let config = load_from_env().unwrap();
        assert_eq!(config.api.timeout_seconds, DEFAULT_API_TIMEOUT_SECS);
        assert_eq!(config.delivery.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert_eq!(config.delivery.drain_timeout_seconds, DEFAULT_DRAIN_TIMEOUT_SECS);

        clear_env();
    }

    #[test]
    fn load_from_env_requires_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let result = load_from_env();
        assert!(matches!(result, Err(TelemetryError::Config(_))));
    }

    #[test]
    fn load_from_env_rejects_invalid_numbers() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CAMPUSTRACE_API_BASE_URL", "https://portal.test.edu/api");
        std::env::set_var("CAMPUSTRACE_API_TIMEOUT", "not-a-number");

        let result = load_from_env();
        assert!(matches!(result, Err(TelemetryError::Config(_))));

        clear_env();
    }

    #[test]
    fn load_from_json_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(
            file,
            r#"{{
                "api": {{ "base_url": "https://portal.test.edu/api", "timeout_seconds": 15 }},
                "delivery": {{ "queue_capacity": 128, "drain_timeout_seconds": 3 }}
            }}"#
        )
        .unwrap();

        let config = load_from_file(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.api.timeout_seconds, 15);
        assert_eq!(config.delivery.queue_capacity, 128);
    }

    #[test]
    fn load_from_toml_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        write!(
            file,
            r#"
[api]
base_url = "https://portal.test.edu/api"
timeout_seconds = 15

[delivery]
queue_capacity = 128
drain_timeout_seconds = 3
"#
        )
        .unwrap();

        let config = load_from_file(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.api.base_url, "https://portal.test.edu/api");
        assert_eq!(config.delivery.drain_timeout_seconds, 3);
    }

    #[test]
    fn probe_covers_cwd_and_executable_locations() {
        let candidates = candidate_paths();

        let cwd = std::env::current_dir().unwrap();
        assert!(candidates.contains(&cwd.join("config.json")));
        assert!(candidates.contains(&cwd.join("campustrace.toml")));

        let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert!(candidates.contains(&exe_dir.join("config.json")));
        assert!(candidates.contains(&exe_dir.join("campustrace.toml")));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(TelemetryError::Config(_))));
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(file, "not json").unwrap();

        let result = load_from_file(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(TelemetryError::Config(_))));
    }
}
