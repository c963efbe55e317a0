//! CLI module for cv-screen
//!
//! This module contains all CLI command definitions and handlers using clap.

pub mod commands;
pub mod config;
pub mod resumes;
pub mod screen;

pub use commands::{Cli, Commands};

use tracing::warn;

use crate::api::{ApiClient, HttpBackend};
use crate::core::config::Config;
use crate::error::Result;

/// Resolve settings for this run: config file, then the command-line/env override
pub fn resolve_config(api_base: Option<String>) -> Config {
    let config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e.summary(), "could not read configuration, using defaults");
        Config::default()
    });
    config.with_api_base_override(api_base)
}

/// Build the API client for the resolved configuration
pub fn connect(config: &Config) -> Result<ApiClient<HttpBackend>> {
    Ok(ApiClient::new(HttpBackend::new(&config.api_base_url)?))
}
