//! Stress-testing service HTTP client implementation

use std::path::Path;

use hyper::ext::ReasonPhrase;
use reqwest::{multipart, Client, StatusCode};
use riskdesk_core::{AnalysisResponse, Portfolio};

/// Failures surfaced by the analysis client.
///
/// The `Display` text is what the dashboard shows the user.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure: unreachable host, reset connection, broken body stream.
    #[error("Could not reach the analysis service: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("Analysis failed: {status_text}")]
    Service { status: u16, status_text: String },

    /// Success status, but the body is not a valid payload.
    #[error("Could not read the analysis results: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    /// Build from a failure status, preferring the reason phrase the server sent.
    fn from_status(status: StatusCode, reason_phrase: Option<&str>) -> Self {
        let status_text = reason_phrase
            .map(str::trim)
            .filter(|phrase| !phrase.is_empty())
            .or_else(|| status.canonical_reason())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        ClientError::Service {
            status: status.as_u16(),
            status_text,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

/// Result type for analysis client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// A holdings file picked by the user, read into memory.
///
/// No content checks happen client-side; the service validates the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PortfolioUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, keeping its file name for the upload.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "portfolio.csv".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn into_form(self) -> multipart::Form {
        let part = multipart::Part::bytes(self.bytes).file_name(self.file_name);
        multipart::Form::new().part("file", part)
    }
}

/// HTTP client for the stress-testing service
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    base_url: String,
    client: Client,
}

impl AnalysisClient {
    /// Create a new client with the given base URL, e.g. `http://localhost:8000/api`
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Internal HTTP Methods
    // ========================================================================

    /// POST a file as a multipart upload and return the success body
    async fn post_upload(&self, path: &str, upload: PortfolioUpload) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, file = %upload.file_name, bytes = upload.len(), "Uploading portfolio");

        let response = self
            .client
            .post(&url)
            .multipart(upload.into_form())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // hyper only records the phrase when it differs from the canonical one
            let reason_phrase = response
                .extensions()
                .get::<ReasonPhrase>()
                .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned());
            tracing::warn!(%url, %status, ?reason_phrase, "Analysis service returned an error status");
            return Err(ClientError::from_status(status, reason_phrase.as_deref()));
        }

        Ok(response.bytes().await?.to_vec())
    }

    // ========================================================================
    // Health API
    // ========================================================================

    /// Check if the service answers on its root route
    pub async fn health(&self) -> bool {
        match self.client.get(format!("{}/", self.base_url)).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Health check failed: {}", e);
                false
            }
        }
    }

    // ========================================================================
    // Portfolio API
    // ========================================================================

    /// Run the full analysis: exposure, scenario selection and stress tests.
    ///
    /// One request, no retries.
    pub async fn analyze(&self, upload: PortfolioUpload) -> Result<AnalysisResponse> {
        let body = self.post_upload("/analyze", upload).await?;
        AnalysisResponse::from_json_slice(&body)
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }

    /// Parse the holdings file without running the analysis
    pub async fn preview(&self, upload: PortfolioUpload) -> Result<Portfolio> {
        let body = self.post_upload("/upload_portfolio", upload).await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }
}
