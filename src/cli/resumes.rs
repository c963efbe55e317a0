//! Resume list and upload CLI command handlers

use std::path::Path;

use crate::cli::commands::UploadArgs;
use crate::core::config::Config;
use crate::error::{Result, ScreenError};
use crate::screening::{display_name, ScreeningSession};

/// Extension accepted by the upload picker
const ACCEPTED_EXTENSION: &str = "pdf";

/// Handle `cvs list`
pub async fn handle_list(config: Config) -> Result<()> {
    let api = super::connect(&config)?;
    let mut session = ScreeningSession::new(config.top_n);
    session.load_resumes(&api).await;

    print_resumes(&session);
    Ok(())
}

/// Handle `cvs upload <PATH>`
pub async fn handle_upload(config: Config, args: UploadArgs) -> Result<()> {
    let file_name = accepted_file_name(&args.path)?;
    let bytes = std::fs::read(&args.path)?;

    let api = super::connect(&config)?;
    let mut session = ScreeningSession::new(config.top_n);

    println!("Uploading {} ({} bytes)...", file_name, bytes.len());
    let outcome = session.upload_resume(&api, &file_name, bytes).await;
    match outcome.error() {
        None => println!("✓ Uploaded {}", file_name),
        Some(e) => println!("✗ Upload failed: {}", e.summary()),
    }
    println!();

    print_resumes(&session);
    Ok(())
}

/// File name to upload, if the path has the accepted extension
pub fn accepted_file_name(path: &Path) -> Result<String> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ACCEPTED_EXTENSION));
    if !is_pdf {
        return Err(ScreenError::InvalidInput(format!(
            "Only PDF resumes can be uploaded: {}",
            path.display()
        )));
    }

    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| ScreenError::InvalidInput(format!("Invalid file name: {}", path.display())))
}

fn print_resumes(session: &ScreeningSession) {
    if let Some(failure) = session.last_failure() {
        println!("{}", failure);
    }

    if session.resumes().is_empty() {
        println!("No resumes available.");
        return;
    }

    println!("Resumes ({}):\n", session.resumes().len());
    for resume in session.resumes() {
        println!("  • {}  ({})", display_name(resume), resume);
    }
}
