use crate::error::{RadiantError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "api.radiant.earth";
pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// URL scheme used to reach the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// Layered configuration for the Radiant client
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub host: ConfigValue<String>,
    pub scheme: ConfigValue<Scheme>,
    pub refresh_token: ConfigValue<Option<String>>,
    pub api_token: ConfigValue<Option<String>>,
    pub timeout_secs: ConfigValue<u64>,
    pub temp_dir: ConfigValue<PathBuf>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            host: ConfigValue::new(DEFAULT_HOST.to_string(), ConfigSource::Default),
            scheme: ConfigValue::new(Scheme::Https, ConfigSource::Default),
            refresh_token: ConfigValue::new(None, ConfigSource::Default),
            api_token: ConfigValue::new(None, ConfigSource::Default),
            timeout_secs: ConfigValue::new(DEFAULT_TIMEOUT_SECS, ConfigSource::Default),
            temp_dir: ConfigValue::new(env::temp_dir().join("radiant"), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| RadiantError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| RadiantError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(host) = file_config.host {
            self.host.update(host, ConfigSource::File);
        }

        if let Some(scheme) = file_config.scheme {
            self.scheme.update(scheme, ConfigSource::File);
        }

        if let Some(token) = file_config.refresh_token {
            self.refresh_token.update(Some(token), ConfigSource::File);
        }

        if let Some(token) = file_config.api_token {
            self.api_token.update(Some(token), ConfigSource::File);
        }

        if let Some(timeout) = file_config.timeout_secs {
            self.timeout_secs.update(timeout, ConfigSource::File);
        }

        if let Some(temp_dir) = file_config.temp_dir {
            self.temp_dir.update(temp_dir, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // RADIANT_HOST
        if let Ok(host) = env::var("RADIANT_HOST") {
            self.host.update(host, ConfigSource::Environment);
        }

        // RADIANT_SCHEME
        if let Ok(scheme_str) = env::var("RADIANT_SCHEME") {
            match parse_scheme(&scheme_str) {
                Ok(scheme) => self.scheme.update(scheme, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid RADIANT_SCHEME value '{}': expected http or https",
                    scheme_str
                ),
            }
        }

        // RADIANT_REFRESH_TOKEN
        if let Ok(token) = env::var("RADIANT_REFRESH_TOKEN") {
            self.refresh_token.update(Some(token), ConfigSource::Environment);
        }

        // RADIANT_API_TOKEN
        if let Ok(token) = env::var("RADIANT_API_TOKEN") {
            self.api_token.update(Some(token), ConfigSource::Environment);
        }

        // RADIANT_TIMEOUT_SECS
        if let Ok(timeout_str) = env::var("RADIANT_TIMEOUT_SECS") {
            match timeout_str.parse::<u64>() {
                Ok(timeout) => self.timeout_secs.update(timeout, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid RADIANT_TIMEOUT_SECS value '{}': expected integer seconds",
                    timeout_str
                ),
            }
        }

        // RADIANT_TEMP_DIR
        if let Ok(dir) = env::var("RADIANT_TEMP_DIR") {
            self.temp_dir.update(PathBuf::from(dir), ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(host) = overrides.host {
            self.host.update(host, ConfigSource::Cli);
        }

        if let Some(scheme) = overrides.scheme {
            self.scheme.update(scheme, ConfigSource::Cli);
        }

        if let Some(token) = overrides.refresh_token {
            self.refresh_token.update(Some(token), ConfigSource::Cli);
        }

        if let Some(token) = overrides.api_token {
            self.api_token.update(Some(token), ConfigSource::Cli);
        }

        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs.update(timeout, ConfigSource::Cli);
        }
    }

    /// `{scheme}://{host}`
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme.value.as_str(), self.host.value)
    }

    /// Host serving tiles and exports: the API host with its first label
    /// replaced by `tiles`.
    pub fn tile_host(&self) -> String {
        tile_host_for(&self.host.value)
    }

    /// Get all configuration values as a map for inspection; tokens are redacted.
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("host".to_string(), (self.host.value.clone(), self.host.source));
        map.insert(
            "scheme".to_string(),
            (self.scheme.value.as_str().to_string(), self.scheme.source),
        );
        map.insert(
            "refresh_token".to_string(),
            (redact(&self.refresh_token.value), self.refresh_token.source),
        );
        map.insert(
            "api_token".to_string(),
            (redact(&self.api_token.value), self.api_token.source),
        );
        map.insert(
            "timeout_secs".to_string(),
            (self.timeout_secs.value.to_string(), self.timeout_secs.source),
        );
        map.insert(
            "temp_dir".to_string(),
            (self.temp_dir.value.display().to_string(), self.temp_dir.source),
        );

        map
    }
}

fn redact(token: &Option<String>) -> String {
    match token {
        Some(_) => "********".to_string(),
        None => "(unset)".to_string(),
    }
}

/// Replace the first label of `host` with `tiles`.
pub fn tile_host_for(host: &str) -> String {
    match host.split_once('.') {
        Some((_, rest)) => format!("tiles.{}", rest),
        None => "tiles".to_string(),
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    host: Option<String>,
    scheme: Option<Scheme>,
    refresh_token: Option<String>,
    api_token: Option<String>,
    timeout_secs: Option<u64>,
    temp_dir: Option<PathBuf>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub host: Option<String>,
    pub scheme: Option<Scheme>,
    pub refresh_token: Option<String>,
    pub api_token: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Parse scheme from string
pub fn parse_scheme(s: &str) -> Result<Scheme> {
    match s.to_lowercase().as_str() {
        "http" => Ok(Scheme::Http),
        "https" => Ok(Scheme::Https),
        _ => Err(RadiantError::ConfigInvalid {
            key: "scheme".to_string(),
            reason: format!("Invalid scheme: {}. Use http or https", s),
        }),
    }
}
