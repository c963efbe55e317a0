//! Core functionality for cv-screen
//!
//! Currently holds the persisted application configuration.

pub mod config;

pub use config::Config;
