//! Screening API integration
//!
//! This module talks to the remote screening service:
//! - `ScreeningBackend`: the five raw remote operations
//! - `HttpBackend`: the reqwest implementation
//! - `ApiClient`: fail-soft wrapper returning [`Outcome`] values

pub mod client;
pub mod http;
pub mod models;

use async_trait::async_trait;

use crate::error::Result;

pub use client::{ApiClient, Outcome};
pub use http::HttpBackend;
pub use models::{Evaluation, Rating, ResumeId, ScreeningResult, SkillTest};

/// Raw operations exposed by the screening backend.
///
/// Implementations report every failure as an error; [`ApiClient`] decides
/// what the caller sees.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScreeningBackend: Send + Sync {
    /// `GET /list-cvs/`
    async fn list_resumes(&self) -> Result<Vec<ResumeId>>;

    /// `POST /upload-cv/` with a multipart `file` field
    async fn upload_resume(&self, file_name: &str, bytes: Vec<u8>) -> Result<()>;

    /// `GET /screen/?job_url=..&top_n=..`
    async fn run_screening(&self, job_url: &str, top_n: u32) -> Result<Vec<ScreeningResult>>;

    /// `GET /evaluate/?cv_name=..&job_url=..`
    async fn evaluate_resume(&self, resume: &str, job_url: &str) -> Result<Evaluation>;

    /// `GET /generate-test/?cv_name=..&job_url=..`
    async fn generate_skill_tests(&self, resume: &str, job_url: &str) -> Result<Vec<SkillTest>>;
}
