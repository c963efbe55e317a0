//! Top-level screening state: resumes, job URL, results, loading flag
//!
//! Each flow is split into a `begin_*` step that mutates state before the
//! request and a `finish_*` step that applies the settled [`Outcome`]. The TUI
//! runs the request in between on a spawned task; the CLI and tests use the
//! combined async methods.

use crate::api::{ApiClient, Outcome, ResumeId, ScreeningBackend, ScreeningResult};
use crate::error::{Result, ScreenError};

/// Parameters of a screening request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningRequest {
    pub job_url: String,
    pub top_n: u32,
}

/// Orchestrator state for one client session
#[derive(Debug, Clone)]
pub struct ScreeningSession {
    resumes: Vec<ResumeId>,
    job_url: String,
    results: Vec<ScreeningResult>,
    loading: bool,
    top_n: u32,
    /// Most recent remote failure, cleared by the next success of the same kind
    last_failure: Option<(&'static str, String)>,
}

impl ScreeningSession {
    pub fn new(top_n: u32) -> Self {
        Self {
            resumes: Vec::new(),
            job_url: String::new(),
            results: Vec::new(),
            loading: false,
            top_n,
            last_failure: None,
        }
    }

    pub fn resumes(&self) -> &[ResumeId] {
        &self.resumes
    }

    pub fn job_url(&self) -> &str {
        &self.job_url
    }

    pub fn set_job_url(&mut self, job_url: impl Into<String>) {
        self.job_url = job_url.into();
    }

    pub fn results(&self) -> &[ScreeningResult] {
        &self.results
    }

    /// Whether a screening request is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn top_n(&self) -> u32 {
        self.top_n
    }

    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_ref().map(|(_, message)| message.as_str())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Resume list
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the resume list; a failed listing leaves it empty
    pub fn apply_resume_list(&mut self, outcome: Outcome<Vec<ResumeId>>) {
        self.record(&outcome, "Could not load resumes");
        self.resumes = outcome.unwrap_or_default();
    }

    /// Fetch and apply the resume list
    pub async fn load_resumes<B: ScreeningBackend>(&mut self, api: &ApiClient<B>) {
        let outcome = api.list_resumes().await;
        self.apply_resume_list(outcome);
    }

    /// Upload a resume, then refresh the list once whatever the upload outcome
    pub async fn upload_resume<B: ScreeningBackend>(
        &mut self,
        api: &ApiClient<B>,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Outcome<()> {
        let outcome = api.upload_resume(file_name, bytes).await;
        self.finish_upload(&outcome);
        self.load_resumes(api).await;
        outcome
    }

    /// Record the upload outcome. The caller still owes one resume-list refresh.
    pub fn finish_upload(&mut self, outcome: &Outcome<()>) {
        self.record(outcome, "Upload failed");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Screening
    // ─────────────────────────────────────────────────────────────────────────

    /// Validate the job URL and mark screening as loading.
    ///
    /// A blank job URL is rejected before any state changes. Anything else is
    /// sent exactly as entered.
    pub fn begin_screening(&mut self) -> Result<ScreeningRequest> {
        if self.job_url.trim().is_empty() {
            return Err(ScreenError::EmptyJobReference);
        }

        let request = ScreeningRequest {
            job_url: self.job_url.clone(),
            top_n: self.top_n,
        };
        self.loading = true;
        Ok(request)
    }

    /// Replace the results with the settled response and clear the loading flag
    pub fn finish_screening(&mut self, outcome: Outcome<Vec<ScreeningResult>>) {
        self.record(&outcome, "Screening failed");
        self.results = outcome.unwrap_or_default();
        self.loading = false;
    }

    /// Run a full screening round trip.
    ///
    /// Returns an error only for validation; remote failures leave an empty
    /// result list and are visible through [`Self::last_failure`].
    pub async fn run_screening<B: ScreeningBackend>(&mut self, api: &ApiClient<B>) -> Result<()> {
        let request = self.begin_screening()?;
        let outcome = api.run_screening(&request.job_url, request.top_n).await;
        self.finish_screening(outcome);
        Ok(())
    }

    fn record<T>(&mut self, outcome: &Outcome<T>, context: &'static str) {
        match outcome.error() {
            Some(e) => {
                self.last_failure = Some((context, format!("{}: {}", context, e.summary())));
            }
            None => {
                if matches!(&self.last_failure, Some((kind, _)) if *kind == context) {
                    self.last_failure = None;
                }
            }
        }
    }
}

impl Default for ScreeningSession {
    fn default() -> Self {
        Self::new(3)
    }
}
