//! CLI arguments and subcommands for ecobee-exporter.
//!
//! This module defines the command-line interface structure using the clap library,
//! including all flags, options, and subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use std::net::IpAddr;
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Output format for the `test` subcommand
#[derive(Debug, Clone, ValueEnum)]
pub enum SampleFormat {
    /// One line per sample with its labels
    Samples,
    /// Prometheus text exposition format
    Text,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "ecobee-exporter",
    about = "Prometheus exporter for ecobee thermostats",
    long_about = "Prometheus exporter for ecobee thermostats.\n\n\
                  Fetches thermostat runtime, hold events, remote sensor readings and \
                  HVAC equipment status from the ecobee API on every scrape and exposes \
                  them as Prometheus gauges.",
    version,
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// HTTP listen port
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Bind to specific interface/IP
    #[arg(long)]
    pub bind: Option<IpAddr>,

    /// Log level [default: info]
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,

    /// Prefix for all exported metric names
    #[arg(long)]
    pub metric_prefix: Option<String>,

    /// Ecobee API access token
    #[arg(long, env = "ECOBEE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// File containing the ecobee API access token
    #[arg(long)]
    pub access_token_file: Option<PathBuf>,

    /// Ecobee API base URL
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Timeout for each ecobee API request in seconds
    #[arg(long)]
    pub request_timeout: Option<u64>,

    /// Disable /health endpoint
    #[arg(long)]
    pub disable_health: bool,

    /// Enable TLS/SSL for HTTPS
    #[arg(long)]
    pub enable_tls: bool,

    /// Path to TLS certificate file (PEM format)
    #[arg(long)]
    pub tls_cert: Option<PathBuf>,

    /// Path to TLS private key file (PEM format)
    #[arg(long)]
    pub tls_key: Option<PathBuf>,
}

/// Subcommands for additional functionality
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate configuration files
    Config {
        /// Output file path ("-" for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,

        /// Include comments and examples
        #[arg(long)]
        commented: bool,
    },

    /// Run scrapes against the ecobee API and print the samples
    Test {
        /// Number of test iterations
        #[arg(short = 'n', long, default_value_t = 1)]
        iterations: usize,

        /// Output format
        #[arg(long, value_enum, default_value = "samples")]
        format: SampleFormat,
    },
}
