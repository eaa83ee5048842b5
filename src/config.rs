//! Configuration management for ecobee-exporter.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::cli::{Args, ConfigFormat};
use ecobee_exporter::ecobee::DEFAULT_API_BASE_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// Default configuration constants
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 9098;
pub const DEFAULT_METRIC_PREFIX: &str = "ecobee";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Placeholder shown instead of the access token.
const REDACTED: &str = "<redacted>";

/// Exporter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server configuration
    pub port: Option<u16>,
    pub bind: Option<String>,

    // Metrics
    #[serde(alias = "metric-prefix")]
    pub metric_prefix: Option<String>,

    // Ecobee API
    #[serde(alias = "api-base-url")]
    pub api_base_url: Option<String>,
    #[serde(alias = "access-token")]
    pub access_token: Option<String>,
    #[serde(alias = "access-token-file")]
    pub access_token_file: Option<PathBuf>,
    #[serde(alias = "request-timeout-seconds")]
    pub request_timeout_seconds: Option<u64>,

    // Feature flags
    pub enable_health: Option<bool>,

    // Logging
    pub log_level: Option<String>,

    // TLS/SSL Configuration
    #[serde(alias = "enable-tls")]
    pub enable_tls: Option<bool>,
    #[serde(alias = "tls-cert-path")]
    pub tls_cert_path: Option<String>,
    #[serde(alias = "tls-key-path")]
    pub tls_key_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: Some(DEFAULT_BIND_ADDR.to_string()),
            port: Some(DEFAULT_PORT),
            metric_prefix: Some(DEFAULT_METRIC_PREFIX.to_string()),
            api_base_url: Some(DEFAULT_API_BASE_URL.to_string()),
            access_token: None,
            access_token_file: None,
            request_timeout_seconds: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            enable_health: Some(true),
            log_level: Some("info".into()),
            enable_tls: Some(false),
            tls_cert_path: None,
            tls_key_path: None,
        }
    }
}

impl Config {
    pub fn metric_prefix(&self) -> &str {
        self.metric_prefix.as_deref().unwrap_or(DEFAULT_METRIC_PREFIX)
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    /// Copy of the configuration that is safe to display.
    pub fn redacted(&self) -> Config {
        let mut config = self.clone();
        if config.access_token.is_some() {
            config.access_token = Some(REDACTED.to_string());
        }
        config
    }
}

/// Returns true if `prefix` can start a Prometheus metric name.
fn is_valid_metric_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let prefix = cfg.metric_prefix();
    if !is_valid_metric_prefix(prefix) {
        return Err(format!("Invalid metric_prefix '{}'", prefix).into());
    }

    if cfg.access_token.is_none() && cfg.access_token_file.is_none() {
        return Err("No ecobee access token: set access_token, access_token_file \
            or ECOBEE_ACCESS_TOKEN"
            .into());
    }
    if let Some(path) = &cfg.access_token_file {
        if !path.exists() {
            return Err(format!("Access token file not found: {}", path.display()).into());
        }
    }

    if cfg.request_timeout_seconds == Some(0) {
        return Err("request_timeout_seconds must be greater than 0".into());
    }

    url::Url::parse(cfg.api_base_url())
        .map_err(|e| format!("Invalid api_base_url '{}': {}", cfg.api_base_url(), e))?;

    // TLS validation
    if cfg.enable_tls.unwrap_or(false) {
        let cert_path = cfg.tls_cert_path.as_deref();
        let key_path = cfg.tls_key_path.as_deref();

        match (cert_path, key_path) {
            (None, None) => {
                return Err(
                    "TLS is enabled but neither tls_cert_path nor tls_key_path are set".into(),
                );
            }
            (Some(_), None) => {
                return Err("TLS is enabled but tls_key_path is not set".into());
            }
            (None, Some(_)) => {
                return Err("TLS is enabled but tls_cert_path is not set".into());
            }
            (Some(cert), Some(key)) => {
                if !Path::new(cert).exists() {
                    return Err(format!("TLS certificate file not found: {}", cert).into());
                }
                if !Path::new(key).exists() {
                    return Err(format!("TLS private key file not found: {}", key).into());
                }
            }
        }
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(bind_ip) = args.bind {
        config.bind = Some(bind_ip.to_string());
    }
    if let Some(cli_port) = args.port {
        config.port = Some(cli_port);
    }
    if let Some(prefix) = &args.metric_prefix {
        config.metric_prefix = Some(prefix.clone());
    }

    // Ecobee API settings
    if let Some(token) = &args.access_token {
        config.access_token = Some(token.clone());
    }
    if let Some(path) = &args.access_token_file {
        config.access_token_file = Some(path.clone());
    }
    if let Some(url) = &args.api_base_url {
        config.api_base_url = Some(url.clone());
    }
    if let Some(timeout) = args.request_timeout {
        config.request_timeout_seconds = Some(timeout);
    }

    if args.disable_health {
        config.enable_health = Some(false);
    }

    // TLS configuration: CLI wins if provided
    if args.enable_tls {
        config.enable_tls = Some(true);
    }
    if let Some(cert_path) = &args.tls_cert {
        config.tls_cert_path = Some(cert_path.to_string_lossy().to_string());
    }
    if let Some(key_path) = &args.tls_key {
        config.tls_key_path = Some(key_path.to_string_lossy().to_string());
    }

    Ok(config)
}

/// Loads the access token, preferring an inline token over the token file.
pub fn resolve_access_token(cfg: &Config) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(token) = &cfg.access_token {
        return Ok(token.clone());
    }
    match &cfg.access_token_file {
        Some(path) => {
            let token = fs::read_to_string(path)?.trim().to_string();
            if token.is_empty() {
                return Err(format!("Access token file is empty: {}", path.display()).into());
            }
            Ok(token)
        }
        None => Err("No ecobee access token configured".into()),
    }
}

/// Configuration loading with multiple format support
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let defaults = [
                "/etc/ecobee-exporter/config.yaml",
                "/etc/ecobee-exporter/config.yml",
                "/etc/ecobee-exporter/config.json",
                "./ecobee-exporter.yaml",
                "./ecobee-exporter.yml",
                "./ecobee-exporter.json",
            ];

            match defaults.iter().find(|p| Path::new(p).exists()) {
                Some(p) => PathBuf::from(p),
                None => return Ok(Config::default()),
            }
        }
    };

    if !path.exists() {
        return Err(format!("Config file not found: {}", path.display()).into());
    }

    let content = fs::read_to_string(&path)?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => {
            let config: Config = serde_json::from_str(&content)?;
            info!("Loaded JSON configuration from: {}", path.display());
            Ok(config)
        }
        Some("toml") => {
            let config: Config = toml::from_str(&content)?;
            info!("Loaded TOML configuration from: {}", path.display());
            Ok(config)
        }
        _ => {
            // Default to YAML
            let config: Config = serde_yaml::from_str(&content)?;
            info!("Loaded YAML configuration from: {}", path.display());
            Ok(config)
        }
    }
}

/// Serializes configuration in the requested format
pub fn format_config(
    config: &Config,
    format: &ConfigFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    })
}

/// Shows configuration in requested format, with the access token redacted
pub fn show_config(config: &Config, format: ConfigFormat) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", format_config(&config.redacted(), &format)?);
    Ok(())
}
