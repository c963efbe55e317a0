//! Fail-soft screening API client
//!
//! Nothing fails past this boundary: every operation returns an [`Outcome`]
//! and failures are logged here, once.

use tracing::{info, warn};

use crate::api::models::{Evaluation, ResumeId, ScreeningResult, SkillTest};
use crate::api::ScreeningBackend;
use crate::error::ScreenError;

/// Result of a remote operation after failure normalization
#[derive(Debug)]
pub enum Outcome<T> {
    /// The backend answered and the body decoded
    Success(T),
    /// The request or decode failed; callers substitute a default
    Failed(ScreenError),
}

impl<T> Outcome<T> {
    fn from_result(result: crate::error::Result<T>, operation: &str) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(e) => {
                warn!(operation, category = ?e.category(), error = %e.summary(), "request failed");
                Outcome::Failed(e)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The failure, if any
    pub fn error(&self) -> Option<&ScreenError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failed(e) => Some(e),
        }
    }

    /// The value, dropping any failure
    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failed(_) => None,
        }
    }

    pub fn into_result(self) -> crate::error::Result<T> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failed(e) => Err(e),
        }
    }
}

impl<T: Default> Outcome<T> {
    /// The value, or `T::default()` for a failure
    pub fn unwrap_or_default(self) -> T {
        self.ok().unwrap_or_default()
    }
}

/// Screening API client that never propagates failures
pub struct ApiClient<B> {
    backend: B,
}

impl<B: ScreeningBackend> ApiClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// List uploaded resumes
    pub async fn list_resumes(&self) -> Outcome<Vec<ResumeId>> {
        Outcome::from_result(self.backend.list_resumes().await, "list_resumes")
    }

    /// Upload one resume file
    pub async fn upload_resume(&self, file_name: &str, bytes: Vec<u8>) -> Outcome<()> {
        let outcome = Outcome::from_result(
            self.backend.upload_resume(file_name, bytes).await,
            "upload_resume",
        );
        if outcome.is_success() {
            info!(file_name, "resume uploaded");
        }
        outcome
    }

    /// Rank resumes against a job posting
    pub async fn run_screening(&self, job_url: &str, top_n: u32) -> Outcome<Vec<ScreeningResult>> {
        Outcome::from_result(
            self.backend.run_screening(job_url, top_n).await,
            "run_screening",
        )
    }

    /// Ask for an evaluation of one resume
    pub async fn evaluate_resume(&self, resume: &str, job_url: &str) -> Outcome<Evaluation> {
        Outcome::from_result(
            self.backend.evaluate_resume(resume, job_url).await,
            "evaluate_resume",
        )
    }

    /// Ask for skill tests for one resume
    pub async fn generate_skill_tests(&self, resume: &str, job_url: &str) -> Outcome<Vec<SkillTest>> {
        Outcome::from_result(
            self.backend.generate_skill_tests(resume, job_url).await,
            "generate_skill_tests",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockScreeningBackend;
    use crate::error::ErrorCategory;

    #[tokio::test]
    async fn test_list_failure_defaults_to_empty() {
        let mut backend = MockScreeningBackend::new();
        backend
            .expect_list_resumes()
            .times(1)
            .returning(|| Err(ScreenError::Transport("connection refused".into())));

        let client = ApiClient::new(backend);
        let outcome = client.list_resumes().await;

        assert!(!outcome.is_success());
        assert_eq!(
            outcome.error().map(ScreenError::category),
            Some(ErrorCategory::Transport)
        );
        assert!(outcome.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_screening_success_passes_through() {
        let mut backend = MockScreeningBackend::new();
        backend
            .expect_run_screening()
            .withf(|job, top_n| job == "https://example.com/job/42" && *top_n == 3)
            .times(1)
            .returning(|_, _| {
                Ok(vec![ScreeningResult {
                    resume: "alice.pdf".into(),
                    score: 0.85,
                }])
            });

        let client = ApiClient::new(backend);
        let results = client
            .run_screening("https://example.com/job/42", 3)
            .await
            .into_result()
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].resume, "alice.pdf");
    }

    #[tokio::test]
    async fn test_decode_failure_is_reported_not_raised() {
        let mut backend = MockScreeningBackend::new();
        backend
            .expect_evaluate_resume()
            .returning(|_, _| Err(ScreenError::Decode("expected value".into())));

        let client = ApiClient::new(backend);
        let outcome = client.evaluate_resume("alice.pdf", "https://example.com/job/42").await;
        assert!(matches!(outcome, Outcome::Failed(ScreenError::Decode(_))));
    }
}
