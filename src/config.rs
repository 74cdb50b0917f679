//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. A `.env` file in the working directory is honoured (loaded by
//! `dotenvy` in `main.rs` and the admin CLI).
//!
//! ```bash
//! export LISTEN="127.0.0.1:8080"
//! export ICE_AND_FIRE_MAX_PAGES="10"
//! export LOG_FORMAT="json"
//! ```
//!
//! ## Variables
//!
//! All variables are optional.
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `THRONES_API_URL` - ThronesAPI character list endpoint
//! - `ICE_AND_FIRE_API_URL` - Ice and Fire character list endpoint
//! - `ICE_AND_FIRE_PAGE_SIZE` - Records per page (default: 50, range 1..=50)
//! - `ICE_AND_FIRE_MAX_PAGES` - Page cap per fetch (default: 100, range 1..=1000)
//! - `HTTP_TIMEOUT_SECONDS` - Timeout of each upstream request (default: 10)
//! - `CACHE_EMPTY_RESULTS` - Keep an empty merge in the cache (default: false)
//! - `PRELOAD` - Warm the cache right after binding (default: true)
//! - `RATE_LIMIT_ENABLED` - Per-IP rate limiting (default: true)
//! - `STATIC_DIR` - Directory served under `/static` (default: `static`)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use url::Url;

use crate::infrastructure::sources::{
    DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE, ICE_AND_FIRE_API_URL, THRONES_API_URL,
};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub thrones_api_url: String,
    pub ice_and_fire_api_url: String,
    pub ice_and_fire_page_size: u32,
    pub ice_and_fire_max_pages: u32,
    /// Applies to each request, so a full Ice and Fire crawl may take up to
    /// `max_pages` times this long.
    pub http_timeout_seconds: u64,
    /// When false, a merge with no characters is returned but not stored, so
    /// the next request retries the upstream APIs.
    pub cache_empty_results: bool,
    pub preload: bool,
    pub rate_limit_enabled: bool,
    pub static_dir: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let thrones_api_url =
            env::var("THRONES_API_URL").unwrap_or_else(|_| THRONES_API_URL.to_string());
        let ice_and_fire_api_url =
            env::var("ICE_AND_FIRE_API_URL").unwrap_or_else(|_| ICE_AND_FIRE_API_URL.to_string());

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            thrones_api_url,
            ice_and_fire_api_url,
            ice_and_fire_page_size: parse_var("ICE_AND_FIRE_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            ice_and_fire_max_pages: parse_var("ICE_AND_FIRE_MAX_PAGES", DEFAULT_MAX_PAGES)?,
            http_timeout_seconds: parse_var("HTTP_TIMEOUT_SECONDS", 10)?,
            cache_empty_results: parse_flag("CACHE_EMPTY_RESULTS", false)?,
            preload: parse_flag("PRELOAD", true)?,
            rate_limit_enabled: parse_flag("RATE_LIMIT_ENABLED", true)?,
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - an API URL is not an absolute `http`/`https` URL
    /// - page size, page cap or timeout are out of range
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        self.thrones_api_endpoint()?;
        self.ice_and_fire_api_endpoint()?;

        if !(1..=50).contains(&self.ice_and_fire_page_size) {
            anyhow::bail!(
                "ICE_AND_FIRE_PAGE_SIZE must be between 1 and 50, got {}",
                self.ice_and_fire_page_size
            );
        }

        if !(1..=1000).contains(&self.ice_and_fire_max_pages) {
            anyhow::bail!(
                "ICE_AND_FIRE_MAX_PAGES must be between 1 and 1000, got {}",
                self.ice_and_fire_max_pages
            );
        }

        if self.http_timeout_seconds == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECONDS must be greater than 0");
        }

        Ok(())
    }

    /// Parsed ThronesAPI endpoint.
    pub fn thrones_api_endpoint(&self) -> Result<Url> {
        parse_endpoint("THRONES_API_URL", &self.thrones_api_url)
    }

    /// Parsed Ice and Fire endpoint.
    pub fn ice_and_fire_api_endpoint(&self) -> Result<Url> {
        parse_endpoint("ICE_AND_FIRE_API_URL", &self.ice_and_fire_api_url)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  ThronesAPI: {}", self.thrones_api_url);
        tracing::info!(
            "  Ice and Fire: {} (page size {}, max {} pages)",
            self.ice_and_fire_api_url,
            self.ice_and_fire_page_size,
            self.ice_and_fire_max_pages
        );
        tracing::info!("  HTTP timeout: {}s", self.http_timeout_seconds);
        tracing::info!("  Cache empty results: {}", self.cache_empty_results);
        tracing::info!("  Preload: {}", self.preload);
        tracing::info!("  Rate limiting: {}", self.rate_limit_enabled);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_endpoint(name: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value).with_context(|| format!("{name} is not a valid URL: '{value}'"))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("{name} must use http or https, got '{value}'");
    }

    Ok(url)
}

/// Reads a numeric variable, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a number, got '{value}'")),
        Err(_) => Ok(default),
    }
}

/// Reads a boolean variable: `true`/`1`/`yes` or `false`/`0`/`no`.
fn parse_flag(name: &str, default: bool) -> Result<bool> {
    let Ok(value) = env::var(name) else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => anyhow::bail!("{name} must be true or false, got '{value}'"),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "LISTEN",
        "LOG_FORMAT",
        "THRONES_API_URL",
        "ICE_AND_FIRE_API_URL",
        "ICE_AND_FIRE_PAGE_SIZE",
        "ICE_AND_FIRE_MAX_PAGES",
        "HTTP_TIMEOUT_SECONDS",
        "CACHE_EMPTY_RESULTS",
        "PRELOAD",
        "RATE_LIMIT_ENABLED",
        "STATIC_DIR",
    ];

    fn clear_env() {
        // SAFETY: callers are #[serial], so no concurrent env access
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    fn valid_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            thrones_api_url: THRONES_API_URL.to_string(),
            ice_and_fire_api_url: ICE_AND_FIRE_API_URL.to_string(),
            ice_and_fire_page_size: 50,
            ice_and_fire_max_pages: 100,
            http_timeout_seconds: 10,
            cache_empty_results: false,
            preload: true,
            rate_limit_enabled: true,
            static_dir: "static".to_string(),
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "0.0.0.0:3000".to_string();

        config.ice_and_fire_page_size = 51;
        assert!(config.validate().is_err());
        config.ice_and_fire_page_size = 0;
        assert!(config.validate().is_err());
        config.ice_and_fire_page_size = 50;

        config.ice_and_fire_max_pages = 0;
        assert!(config.validate().is_err());
        config.ice_and_fire_max_pages = 100;

        config.http_timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_must_be_http() {
        let mut config = valid_config();

        config.thrones_api_url = "ftp://thronesapi.com/api/v2/Characters".to_string();
        assert!(config.validate().is_err());

        config.thrones_api_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.thrones_api_url = "http://127.0.0.1:8080/Characters".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.thrones_api_url, THRONES_API_URL);
        assert_eq!(config.ice_and_fire_api_url, ICE_AND_FIRE_API_URL);
        assert_eq!(config.ice_and_fire_page_size, 50);
        assert_eq!(config.ice_and_fire_max_pages, 100);
        assert_eq!(config.http_timeout_seconds, 10);
        assert!(!config.cache_empty_results);
        assert!(config.preload);
        assert!(config.rate_limit_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_values_from_env() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("ICE_AND_FIRE_PAGE_SIZE", "25");
            env::set_var("ICE_AND_FIRE_MAX_PAGES", " 7 ");
            env::set_var("CACHE_EMPTY_RESULTS", "TRUE");
            env::set_var("PRELOAD", "0");
            env::set_var("RATE_LIMIT_ENABLED", "no");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.ice_and_fire_page_size, 25);
        assert_eq!(config.ice_and_fire_max_pages, 7);
        assert!(config.cache_empty_results);
        assert!(!config.preload);
        assert!(!config.rate_limit_enabled);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unparsable_values_are_errors() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("HTTP_TIMEOUT_SECONDS", "ten");
        }
        assert!(Config::from_env().is_err());

        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("PRELOAD", "maybe");
        }
        assert!(Config::from_env().is_err());

        clear_env();
    }
}
