//! reqwest-backed screening API client

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use crate::api::models::{self, Evaluation, ResumeId, ScreeningResult, SkillTest};
use crate::api::ScreeningBackend;
use crate::error::{Result, ScreenError};

const LIST_PATH: &str = "list-cvs/";
const UPLOAD_PATH: &str = "upload-cv/";
const SCREEN_PATH: &str = "screen/";
const EVALUATE_PATH: &str = "evaluate/";
const GENERATE_TEST_PATH: &str = "generate-test/";

/// Screening API client over HTTP
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    fn with_client(client: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base: normalize_base(base_url)?,
        })
    }

    /// The normalized base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build an endpoint URL with percent-encoded query parameters
    pub fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn get_text(&self, path: &str, query: &[(&str, &str)]) -> Result<String> {
        let url = self.endpoint(path, query)?;
        debug!(%url, "GET");

        let response = self.client.get(url).send().await?;
        read_body(response).await
    }
}

/// Parse the base URL, making sure its path ends in `/` so endpoints nest under it
fn normalize_base(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url.trim())?;
    if base.cannot_be_a_base() {
        return Err(ScreenError::Config(format!(
            "'{}' cannot be used as an API base URL",
            base_url
        )));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

/// Return the body text of a 2xx response, or a status error
async fn read_body(response: Response) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ScreenError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.text().await?)
}

#[async_trait]
impl ScreeningBackend for HttpBackend {
    async fn list_resumes(&self) -> Result<Vec<ResumeId>> {
        let body = self.get_text(LIST_PATH, &[]).await?;
        models::decode_resume_list(&body)
    }

    async fn upload_resume(&self, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        let url = self.endpoint(UPLOAD_PATH, &[])?;
        debug!(%url, file_name, size = bytes.len(), "POST");

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", part);

        let response = self.client.post(url).multipart(form).send().await?;
        // Body is an acknowledgement message we have no use for
        read_body(response).await.map(|_| ())
    }

    async fn run_screening(&self, job_url: &str, top_n: u32) -> Result<Vec<ScreeningResult>> {
        let top_n = top_n.to_string();
        let body = self
            .get_text(SCREEN_PATH, &[("job_url", job_url), ("top_n", &top_n)])
            .await?;
        models::decode_screening(&body)
    }

    async fn evaluate_resume(&self, resume: &str, job_url: &str) -> Result<Evaluation> {
        let body = self
            .get_text(EVALUATE_PATH, &[("cv_name", resume), ("job_url", job_url)])
            .await?;
        models::decode_evaluation(&body)
    }

    async fn generate_skill_tests(&self, resume: &str, job_url: &str) -> Result<Vec<SkillTest>> {
        let body = self
            .get_text(GENERATE_TEST_PATH, &[("cv_name", resume), ("job_url", job_url)])
            .await?;
        models::decode_skill_tests(&body)
    }
}
