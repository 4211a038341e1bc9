//! Configuration management for `CityScout`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::CityScoutError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `CityScout` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CityScoutConfig {
    /// Restaurant search API settings
    #[serde(default)]
    pub restaurants: RestaurantsConfig,
    /// Public art CSV settings
    #[serde(default)]
    pub art: ArtConfig,
    /// Event page scraping settings
    #[serde(default)]
    pub events: EventsConfig,
    /// HTTP client settings shared by all fetchers
    #[serde(default)]
    pub http: HttpConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Rendered output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// What to do with a raw restaurant entry that cannot be normalized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Abort the whole dataset
    #[default]
    Fail,
    /// Drop the entry and keep going
    Skip,
}

/// Restaurant search API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantsConfig {
    /// Business search endpoint
    #[serde(default = "default_restaurants_base_url")]
    pub base_url: String,
    /// Bearer token for the search API
    pub api_key: Option<String>,
    /// Location passed to the search
    #[serde(default = "default_restaurants_location")]
    pub location: String,
    /// Number of businesses fetched in the single request
    #[serde(default = "default_restaurants_limit")]
    pub limit: u32,
    /// Reaction to entries without categories or coordinates
    #[serde(default)]
    pub on_malformed: MalformedPolicy,
}

/// Public art dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtConfig {
    /// Path of the art installations CSV file
    #[serde(default = "default_art_csv_path")]
    pub csv_path: PathBuf,
}

/// Event listing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Events listing page
    #[serde(default = "default_events_url")]
    pub url: String,
    /// Year assumed for listing dates that omit it (defaults to the current year)
    pub reference_year: Option<i32>,
}

/// HTTP client configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_http_max_retries")]
    pub max_retries: u32,
    /// User agent sent with every request
    #[serde(default = "default_http_user_agent")]
    pub user_agent: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Output configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory that receives rendered map pages
    #[serde(default = "default_map_dir")]
    pub map_dir: PathBuf,
}

// Default value functions
fn default_restaurants_base_url() -> String {
    "https://api.yelp.com/v3/businesses/search".to_string()
}

fn default_restaurants_location() -> String {
    "Pittsburgh".to_string()
}

fn default_restaurants_limit() -> u32 {
    50
}

fn default_art_csv_path() -> PathBuf {
    PathBuf::from("art_data.csv")
}

fn default_events_url() -> String {
    "https://downtownpittsburgh.com/events/".to_string()
}

fn default_http_timeout() -> u32 {
    30
}

fn default_http_max_retries() -> u32 {
    3
}

fn default_http_user_agent() -> String {
    format!("CityScout/{}", crate::VERSION)
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_map_dir() -> PathBuf {
    PathBuf::from("maps")
}

impl Default for RestaurantsConfig {
    fn default() -> Self {
        Self {
            base_url: default_restaurants_base_url(),
            api_key: None,
            location: default_restaurants_location(),
            limit: default_restaurants_limit(),
            on_malformed: MalformedPolicy::default(),
        }
    }
}

impl Default for ArtConfig {
    fn default() -> Self {
        Self {
            csv_path: default_art_csv_path(),
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            url: default_events_url(),
            reference_year: None,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
            max_retries: default_http_max_retries(),
            user_agent: default_http_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            map_dir: default_map_dir(),
        }
    }
}

impl CityScoutConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // CITYSCOUT_RESTAURANTS__API_KEY -> restaurants.api_key
        builder = builder.add_source(
            Environment::with_prefix("CITYSCOUT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: CityScoutConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cityscout").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.restaurants.base_url.is_empty() {
            self.restaurants.base_url = default_restaurants_base_url();
        }
        if self.restaurants.location.is_empty() {
            self.restaurants.location = default_restaurants_location();
        }
        if self.restaurants.limit == 0 {
            self.restaurants.limit = default_restaurants_limit();
        }
        if self.art.csv_path.as_os_str().is_empty() {
            self.art.csv_path = default_art_csv_path();
        }
        if self.events.url.is_empty() {
            self.events.url = default_events_url();
        }
        if self.http.timeout_seconds == 0 {
            self.http.timeout_seconds = default_http_timeout();
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_http_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.output.map_dir.as_os_str().is_empty() {
            self.output.map_dir = default_map_dir();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        // The key is optional until the restaurant search is actually used
        if let Some(api_key) = &self.restaurants.api_key {
            if api_key.trim().is_empty() {
                return Err(CityScoutError::config(
                    "Restaurant API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }

            if api_key.len() < 16 {
                return Err(CityScoutError::config(
                    "Restaurant API key appears to be invalid (too short). Please check your API key.",
                )
                .into());
            }

            if api_key.len() > 512 {
                return Err(CityScoutError::config(
                    "Restaurant API key appears to be invalid (too long). Please check your API key.",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.restaurants.limit > 50 {
            return Err(CityScoutError::config("Restaurant search limit cannot exceed 50").into());
        }

        if self.http.timeout_seconds > 300 {
            return Err(CityScoutError::config("HTTP timeout cannot exceed 300 seconds").into());
        }

        if self.http.max_retries > 10 {
            return Err(CityScoutError::config("HTTP max retries cannot exceed 10").into());
        }

        if let Some(year) = self.events.reference_year {
            if !(1900..=2200).contains(&year) {
                return Err(CityScoutError::config(format!(
                    "Event reference year {year} is out of range (1900-2200)"
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(CityScoutError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(CityScoutError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Restaurant API base URL", &self.restaurants.base_url),
            ("Events URL", &self.events.url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(
                    CityScoutError::config(format!("{name} must be a valid HTTP or HTTPS URL"))
                        .into(),
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = CityScoutConfig::default();
        assert_eq!(
            config.restaurants.base_url,
            "https://api.yelp.com/v3/businesses/search"
        );
        assert_eq!(config.restaurants.location, "Pittsburgh");
        assert_eq!(config.restaurants.limit, 50);
        assert_eq!(config.restaurants.on_malformed, MalformedPolicy::Fail);
        assert_eq!(config.art.csv_path, PathBuf::from("art_data.csv"));
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.logging.level, "warn");
        assert!(config.restaurants.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_short_api_key() {
        let mut config = CityScoutConfig::default();
        config.restaurants.api_key = Some("short".to_string());
        let result = config.validate_api_keys();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = CityScoutConfig::default();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = CityScoutConfig::default();
        config.restaurants.limit = 200;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("limit cannot exceed"));
    }

    #[test]
    fn test_config_validation_rejects_bad_url() {
        let mut config = CityScoutConfig::default();
        config.events.url = "ftp://example.com/events".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_repairs_empty_values() {
        let mut config = CityScoutConfig::default();
        config.restaurants.location = String::new();
        config.http.timeout_seconds = 0;
        config.apply_defaults();
        assert_eq!(config.restaurants.location, "Pittsburgh");
        assert_eq!(config.http.timeout_seconds, 30);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[restaurants]
location = "Philadelphia"
limit = 20
on_malformed = "skip"

[events]
reference_year = 2024

[logging]
level = "debug"
"#
        )
        .unwrap();

        let config = CityScoutConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.restaurants.location, "Philadelphia");
        assert_eq!(config.restaurants.limit, 20);
        assert_eq!(config.restaurants.on_malformed, MalformedPolicy::Skip);
        assert_eq!(config.events.reference_year, Some(2024));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.http.max_retries, 3);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = CityScoutConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("cityscout"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
