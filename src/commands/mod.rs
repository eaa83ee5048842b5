//! CLI command implementations for ecobee-exporter.
//!
//! This module provides implementations for all CLI subcommands:
//! - `config`: Configuration file generation
//! - `test`: One-off scrapes against the ecobee API

pub mod config;

// Re-export command functions
pub use config::command_config;
pub use test::command_test;
