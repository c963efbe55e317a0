//! cv-screen - A client for a resume screening service
//!
//! This library provides both CLI and TUI interfaces for uploading resumes,
//! ranking them against a job posting, and requesting per-candidate
//! evaluations and skill tests from the screening backend.

pub mod api;
pub mod cli;
pub mod core;
pub mod error;
pub mod screening;
pub mod tui;

pub use error::{Result, ScreenError};
