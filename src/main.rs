//! cv-screen - resume screening client
//!
//! Run without arguments to launch the TUI, or use subcommands for CLI mode.
//!
//! Available as the `cvs` and `cv-screen` commands.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cv_screen::cli::commands::{Cli, Commands};
use cv_screen::cli::{config, resolve_config, resumes, screen};
use cv_screen::core::Config;
use cv_screen::error::Result;
use cv_screen::tui::App;

#[tokio::main]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // No subcommand - launch TUI mode
        None => run_tui(resolve_config(cli.api_base)).await,

        // Config commands work on the file directly
        Some(Commands::Config(args)) => config::handle_config(args.command),

        Some(command) => {
            let settings = resolve_config(cli.api_base);
            match command {
                Commands::List => resumes::handle_list(settings).await,
                Commands::Upload(args) => resumes::handle_upload(settings, args).await,
                Commands::Screen(args) => screen::handle_screen(settings, args).await,
                Commands::Evaluate(args) => screen::handle_evaluate(settings, args).await,
                Commands::Test(args) => screen::handle_test(settings, args).await,
                Commands::Config(_) => unreachable!(),
            }
        }
    }
}

/// Run the TUI application
async fn run_tui(config: Config) -> Result<()> {
    let api = cv_screen::cli::connect(&config)?;
    let mut app = App::new(config, api);
    app.run().await
}
