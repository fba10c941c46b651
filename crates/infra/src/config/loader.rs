//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, when `BOMWRIGHT_API_BASE_URL` is set
//! 2. Otherwise the first config file found by [`probe_config_paths`]
//! 3. Otherwise built-in defaults
//!
//! ## Environment Variables
//! - `BOMWRIGHT_API_BASE_URL`: backend base URL (selects env loading)
//! - `BOMWRIGHT_API_TIMEOUT_SECS`: per-attempt timeout
//! - `BOMWRIGHT_API_MAX_ATTEMPTS`: attempts per request
//! - `BOMWRIGHT_API_BACKOFF_MS`: base retry backoff
//! - `BOMWRIGHT_MISSING_STOCK_POLICY`: `skip` or `assume_zero`
//! - `BOMWRIGHT_SCRAP_CATALOG_ENABLED`: load the scrap catalog snapshot
//! - `BOMWRIGHT_SCRAP_CATALOG_LIMIT`: snapshot page size
//! - `BOMWRIGHT_LOG_LEVEL`, `BOMWRIGHT_LOG_FORMAT` (`pretty` / `json`)
//! - `BOMWRIGHT_API_TOKEN`: bearer token, see [`load_api_token`]
//!
//! ## File Locations
//! `config.{json,toml}` and `bomwright.{json,toml}` in the working directory,
//! then `config.{json,toml}` one and two levels up; the same set next to the
//! executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use bomwright_domain::{
    ApiConfig, BomwrightError, Config, LogFormat, LoggingConfig, MissingStockPolicy,
    RescaleConfig, Result,
};

const ENV_BASE_URL: &str = "BOMWRIGHT_API_BASE_URL";
const ENV_API_TOKEN: &str = "BOMWRIGHT_API_TOKEN";

/// Load configuration with the fallback strategy described above.
///
/// # Errors
/// `BomwrightError::Config` when an env variable has an invalid value or a
/// config file exists but cannot be read or parsed.
pub fn load() -> Result<Config> {
    if std::env::var_os(ENV_BASE_URL).is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No configuration found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from `BOMWRIGHT_*` environment variables.
///
/// `BOMWRIGHT_API_BASE_URL` is required; every other variable falls back to
/// its default.
pub fn load_from_env() -> Result<Config> {
    let api_defaults = ApiConfig::default();
    let rescale_defaults = RescaleConfig::default();
    let logging_defaults = LoggingConfig::default();

    Ok(Config {
        api: ApiConfig {
            base_url: env_var(ENV_BASE_URL)?,
            timeout_secs: env_parse("BOMWRIGHT_API_TIMEOUT_SECS")?
                .unwrap_or(api_defaults.timeout_secs),
            max_attempts: env_parse("BOMWRIGHT_API_MAX_ATTEMPTS")?
                .unwrap_or(api_defaults.max_attempts),
            base_backoff_ms: env_parse("BOMWRIGHT_API_BACKOFF_MS")?
                .unwrap_or(api_defaults.base_backoff_ms),
        },
        rescale: RescaleConfig {
            missing_stock_policy: env_parse::<MissingStockPolicy>(
                "BOMWRIGHT_MISSING_STOCK_POLICY",
            )?
            .unwrap_or(rescale_defaults.missing_stock_policy),
            scrap_catalog_enabled: env_bool(
                "BOMWRIGHT_SCRAP_CATALOG_ENABLED",
                rescale_defaults.scrap_catalog_enabled,
            ),
            scrap_catalog_limit: env_parse("BOMWRIGHT_SCRAP_CATALOG_LIMIT")?
                .unwrap_or(rescale_defaults.scrap_catalog_limit),
        },
        logging: LoggingConfig {
            level: std::env::var("BOMWRIGHT_LOG_LEVEL").unwrap_or(logging_defaults.level),
            format: env_parse::<LogFormat>("BOMWRIGHT_LOG_FORMAT")?
                .unwrap_or(logging_defaults.format),
        },
    })
}

/// Load configuration from a file, probing the standard locations when
/// `path` is `None`. JSON or TOML, by extension.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) if !p.exists() => {
            return Err(BomwrightError::Config(format!("Config file not found: {}", p.display())))
        }
        Some(p) => p,
        None => probe_config_paths().ok_or_else(|| {
            BomwrightError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| BomwrightError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Bearer token from `BOMWRIGHT_API_TOKEN`; blank counts as unset.
///
/// Tokens are never read from config files.
pub fn load_api_token() -> Option<String> {
    std::env::var(ENV_API_TOKEN).ok().map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| BomwrightError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| BomwrightError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(BomwrightError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file among the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    let mut push_candidates = |dir: &Path| {
        for name in ["config.json", "config.toml", "bomwright.json", "bomwright.toml"] {
            candidates.push(dir.join(name));
        }
        for up in ["..", "../.."] {
            candidates.push(dir.join(up).join("config.json"));
            candidates.push(dir.join(up).join("config.toml"));
        }
    };

    if let Ok(cwd) = std::env::current_dir() {
        push_candidates(&cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().as_deref().and_then(Path::parent) {
        push_candidates(exe_dir);
    }

    candidates.into_iter().find(|path| path.is_file())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| BomwrightError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse an optional variable; unset or blank is `None`, garbage is an error.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| BomwrightError::Config(format!("Invalid value for {key}: {e}"))),
        _ => Ok(None),
    }
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: &[&str] = &[
        "BOMWRIGHT_API_BASE_URL",
        "BOMWRIGHT_API_TIMEOUT_SECS",
        "BOMWRIGHT_API_MAX_ATTEMPTS",
        "BOMWRIGHT_API_BACKOFF_MS",
        "BOMWRIGHT_MISSING_STOCK_POLICY",
        "BOMWRIGHT_SCRAP_CATALOG_ENABLED",
        "BOMWRIGHT_SCRAP_CATALOG_LIMIT",
        "BOMWRIGHT_LOG_LEVEL",
        "BOMWRIGHT_LOG_FORMAT",
        "BOMWRIGHT_API_TOKEN",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn temp_config(contents: &str, extension: &str) -> (NamedTempFile, PathBuf) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let path = file.path().with_extension(extension);
        std::fs::copy(file.path(), &path).unwrap();
        (file, path)
    }

    #[test]
    fn env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        for value in ["1", "true", "YES", " on "] {
            std::env::set_var("BOMWRIGHT_TEST_BOOL", value);
            assert!(env_bool("BOMWRIGHT_TEST_BOOL", false), "{value}");
        }
        for value in ["0", "false", "no", "off"] {
            std::env::set_var("BOMWRIGHT_TEST_BOOL", value);
            assert!(!env_bool("BOMWRIGHT_TEST_BOOL", true), "{value}");
        }
        std::env::remove_var("BOMWRIGHT_TEST_BOOL");
        assert!(env_bool("BOMWRIGHT_TEST_BOOL", true));
    }

    #[test]
    fn load_from_env_reads_all_sections() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("BOMWRIGHT_API_BASE_URL", "https://erp.example.com/api");
        std::env::set_var("BOMWRIGHT_API_MAX_ATTEMPTS", "5");
        std::env::set_var("BOMWRIGHT_MISSING_STOCK_POLICY", "assume_zero");
        std::env::set_var("BOMWRIGHT_SCRAP_CATALOG_ENABLED", "off");
        std::env::set_var("BOMWRIGHT_LOG_FORMAT", "json");

        let config = load().unwrap();
        clear_env();

        assert_eq!(config.api.base_url, "https://erp.example.com/api");
        assert_eq!(config.api.max_attempts, 5);
        assert_eq!(config.api.timeout_secs, ApiConfig::default().timeout_secs);
        assert_eq!(config.rescale.missing_stock_policy, MissingStockPolicy::AssumeZero);
        assert!(!config.rescale.scrap_catalog_enabled);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn load_from_env_requires_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        assert!(matches!(load_from_env(), Err(BomwrightError::Config(_))));
    }

    #[test]
    fn invalid_env_values_are_config_errors() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("BOMWRIGHT_API_BASE_URL", "http://localhost:8085/api");
        std::env::set_var("BOMWRIGHT_API_TIMEOUT_SECS", "soon");
        let timeout = load_from_env();
        std::env::set_var("BOMWRIGHT_API_TIMEOUT_SECS", "10");
        std::env::set_var("BOMWRIGHT_MISSING_STOCK_POLICY", "guess");
        let policy = load_from_env();
        clear_env();

        assert!(matches!(timeout, Err(BomwrightError::Config(msg)) if msg.contains("TIMEOUT")));
        assert!(matches!(policy, Err(BomwrightError::Config(_))));
    }

    #[test]
    fn api_token_comes_from_env_only() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        assert_eq!(load_api_token(), None);
        std::env::set_var("BOMWRIGHT_API_TOKEN", "   ");
        assert_eq!(load_api_token(), None);
        std::env::set_var("BOMWRIGHT_API_TOKEN", " abc ");
        assert_eq!(load_api_token().as_deref(), Some("abc"));
        clear_env();
    }

    #[test]
    fn load_from_file_json() {
        let (_file, path) = temp_config(
            r#"{
                "api": { "base_url": "https://erp.example.com/api", "timeout_secs": 10 },
                "rescale": { "scrap_catalog_limit": 100 }
            }"#,
            "json",
        );

        let config = load_from_file(Some(path.clone())).unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.rescale.scrap_catalog_limit, 100);
        assert_eq!(config.rescale.missing_stock_policy, MissingStockPolicy::Skip);
    }

    #[test]
    fn load_from_file_toml() {
        let (_file, path) = temp_config(
            r#"
[api]
base_url = "https://erp.example.com/api"
max_attempts = 1

[rescale]
missing_stock_policy = "assume_zero"

[logging]
level = "debug"
format = "json"
"#,
            "toml",
        );

        let config = load_from_file(Some(path.clone())).unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(config.api.max_attempts, 1);
        assert_eq!(config.rescale.missing_stock_policy, MissingStockPolicy::AssumeZero);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn load_from_file_errors() {
        let missing = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(missing, Err(BomwrightError::Config(_))));

        let (_file, path) = temp_config(r#"{ "api": "#, "json");
        let invalid = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();
        assert!(matches!(invalid, Err(BomwrightError::Config(msg)) if msg.contains("JSON")));
    }

    #[test]
    fn parse_config_rejects_unknown_extension() {
        assert!(parse_config("api: {}", Path::new("config.yaml")).is_err());
    }
}
