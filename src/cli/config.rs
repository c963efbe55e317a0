//! Configuration CLI command handlers

use crate::cli::commands::{ConfigCommand, ConfigKey};
use crate::core::config::Config;
use crate::error::Result;

/// Handle configuration commands
pub fn handle_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Set { key, value } => handle_set(key, value),
        ConfigCommand::Get { key } => handle_get(key),
        ConfigCommand::Remove { key } => handle_remove(key),
        ConfigCommand::Path => {
            println!("{}", Config::config_path()?.display());
            Ok(())
        }
    }
}

/// Handle setting a configuration value
fn handle_set(key: ConfigKey, value: String) -> Result<()> {
    let mut config = Config::load()?;
    match key {
        ConfigKey::ApiBase => {
            config.set_api_base(&value)?;
            config.save()?;
            println!("API base URL set to: {}", config.api_base_url);
        }
        ConfigKey::TopN => {
            config.set_top_n(&value)?;
            config.save()?;
            println!("Screening will return the top {} resumes.", config.top_n);
        }
    }
    Ok(())
}

/// Handle getting a configuration value
fn handle_get(key: ConfigKey) -> Result<()> {
    let config = Config::load()?;
    match key {
        ConfigKey::ApiBase => println!("API base URL: {}", config.api_base_url),
        ConfigKey::TopN => println!("Top N: {}", config.top_n),
    }
    Ok(())
}

/// Handle removing a configuration value
fn handle_remove(key: ConfigKey) -> Result<()> {
    let mut config = Config::load()?;
    let defaults = Config::default();
    match key {
        ConfigKey::ApiBase => {
            config.api_base_url = defaults.api_base_url;
            config.save()?;
            println!("API base URL reset to default: {}", config.api_base_url);
        }
        ConfigKey::TopN => {
            config.top_n = defaults.top_n;
            config.save()?;
            println!("Top N reset to default: {}", config.top_n);
        }
    }
    Ok(())
}
