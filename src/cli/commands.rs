//! CLI command definitions using clap
//!
//! Defines the command structure for the `cvs` CLI tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::core::config::API_BASE_ENV;

/// cv-screen - resume screening client
///
/// Upload resumes, screen them against a job posting and review
/// AI evaluations. Run without arguments to launch the TUI mode.
#[derive(Parser, Debug)]
#[command(name = "cvs", version, about, long_about = None)]
pub struct Cli {
    /// Screening API base URL (overrides the configuration file)
    #[arg(long, global = true, env = API_BASE_ENV)]
    pub api_base: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List uploaded resumes
    List,

    /// Upload a resume (PDF)
    Upload(UploadArgs),

    /// Rank uploaded resumes against a job posting
    Screen(ScreenArgs),

    /// Evaluate one resume against a job posting
    Evaluate(CandidateArgs),

    /// Generate skill tests for one resume
    Test(CandidateArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Resume Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
pub struct UploadArgs {
    /// Path to the resume file
    pub path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ScreenArgs {
    /// URL of the job posting
    #[arg(short, long)]
    pub job_url: String,

    /// Number of top resumes to return (defaults to the configured value)
    #[arg(short = 'n', long)]
    pub top_n: Option<u32>,

    /// Also evaluate every returned resume
    #[arg(short, long)]
    pub evaluate: bool,

    /// Also generate skill tests for every evaluated resume
    #[arg(short, long, requires = "evaluate")]
    pub tests: bool,
}

#[derive(Parser, Debug)]
pub struct CandidateArgs {
    /// Resume file name as listed by 'cvs list'
    pub resume: String,

    /// URL of the job posting
    #[arg(short, long)]
    pub job_url: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key
        key: ConfigKey,

        /// Configuration value
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: ConfigKey,
    },
    /// Reset a configuration value to its default
    Remove {
        /// Configuration key
        key: ConfigKey,
    },
    /// Print the configuration file location
    Path,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ConfigKey {
    /// Screening API base URL
    ApiBase,
    /// Results per screening run
    TopN,
}
