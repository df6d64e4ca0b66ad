//! Configuration management for the CEP weather service
//!
//! Handles loading configuration from an optional TOML file and the process
//! environment, and provides validation for all settings.

use crate::CepWeatherError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
///
/// Every field maps to an upper-case environment variable of the same name
/// (`port` ← `PORT`, `weather_api_key` ← `WEATHER_API_KEY`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// TCP port the HTTP server listens on
    #[serde(default = "default_port")]
    pub port: u16,
    /// WeatherAPI key. Not validated; a missing key surfaces as an upstream failure.
    #[serde(default)]
    pub weather_api_key: Option<String>,
    /// Base URL of the ViaCEP address lookup
    #[serde(default = "default_viacep_base_url")]
    pub viacep_base_url: String,
    /// Base URL of the WeatherAPI provider
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,
    /// Timeout for each outbound request in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

// Default value functions
fn default_port() -> u16 {
    8080
}

fn default_viacep_base_url() -> String {
    "https://viacep.com.br".to_string()
}

fn default_weather_base_url() -> String {
    "http://api.weatherapi.com/v1".to_string()
}

fn default_http_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            weather_api_key: None,
            viacep_base_url: default_viacep_base_url(),
            weather_base_url: default_weather_base_url(),
            http_timeout_seconds: default_http_timeout(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// `CONFIG_FILE` selects the file; otherwise the per-user config path is used.
    pub fn load() -> Result<Self> {
        Self::load_from_path(std::env::var_os("CONFIG_FILE").map(PathBuf::from))
    }

    /// Load configuration from specified path and the process environment
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        Self::load_from_sources(config_path, None)
    }

    /// Load configuration from a file plus an explicit environment map.
    ///
    /// Passing `None` for `env` reads the real process environment.
    pub fn load_from_sources(
        config_path: Option<PathBuf>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.or_else(Self::get_config_path);

        if let Some(config_file) = config_file.filter(|path| path.exists()) {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Plain upper-case names: PORT, WEATHER_API_KEY, ...
        builder = builder.add_source(Environment::default().ignore_empty(true).source(env));

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cep-weather").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.viacep_base_url.is_empty() {
            self.viacep_base_url = default_viacep_base_url();
        }
        if self.weather_base_url.is_empty() {
            self.weather_base_url = default_weather_base_url();
        }
        if self.log_level.is_empty() {
            self.log_level = default_log_level();
        }
        if self.log_format.is_empty() {
            self.log_format = default_log_format();
        }
        self.viacep_base_url = self.viacep_base_url.trim_end_matches('/').to_string();
        self.weather_base_url = self.weather_base_url.trim_end_matches('/').to_string();
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Outbound request timeout
    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http_timeout_seconds == 0 {
            return Err(CepWeatherError::config("HTTP timeout must be at least 1 second").into());
        }

        if self.http_timeout_seconds > 300 {
            return Err(CepWeatherError::config("HTTP timeout cannot exceed 300 seconds").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(CepWeatherError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.log_level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.log_format.as_str()) {
            return Err(CepWeatherError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.log_format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("ViaCEP", &self.viacep_base_url),
            ("Weather API", &self.weather_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CepWeatherError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
