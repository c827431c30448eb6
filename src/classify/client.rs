//! Classifier seam and the remote HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::classify::types::{AnalyzeRequest, AnalyzeResponse, ClassificationResult, ErrorBody};
use crate::error::ClassifyError;
use crate::intake::ClassificationRequest;

/// Trait for classification backends — pure I/O plus verdict, no session
/// logic. The pipeline drives whichever implementation it is given.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify normalized content into a structured verdict.
    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResult, ClassifyError>;
}

/// Client for a remote classification service speaking the wire contract
/// in `classify::types`: JSON for text, multipart upload for PDFs.
pub struct HttpClassifier {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpClassifier {
    /// Create a client for `base_url` (e.g. `http://localhost:5000`) with
    /// a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClassifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifyError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn map_send_error(&self, e: reqwest::Error) -> ClassifyError {
        if e.is_timeout() {
            ClassifyError::Timeout { after: self.timeout }
        } else {
            ClassifyError::Network(e.to_string())
        }
    }

    /// Turn an HTTP response into a verdict, mapping non-2xx statuses to
    /// `Service` errors with the server's error message when present.
    async fn parse_response(
        &self,
        response: reqwest::Response,
    ) -> Result<ClassificationResult, ClassifyError> {
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            return Err(ClassifyError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| ClassifyError::InvalidResponse(e.to_string()))?;

        debug!(
            category = body.category.label(),
            confidence = body.confidence,
            model = %body.analysis.model_used,
            "Received classification verdict"
        );
        Ok(body.into_result())
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResult, ClassifyError> {
        match request {
            ClassificationRequest::Text(text) => {
                let body = AnalyzeRequest { text: text.clone() };
                let response = self
                    .client
                    .post(self.url("/api/analyze"))
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| self.map_send_error(e))?;
                self.parse_response(response).await
            }
            ClassificationRequest::PdfUpload { filename, bytes } => {
                let part = Part::bytes(bytes.clone())
                    .file_name(filename.clone())
                    .mime_str("application/pdf")
                    .map_err(|e| ClassifyError::Network(e.to_string()))?;
                let form = Form::new().part("file", part);

                let response = self
                    .client
                    .post(self.url("/api/analyze/upload"))
                    .multipart(form)
                    .send()
                    .await
                    .map_err(|e| self.map_send_error(e))?;
                self.parse_response(response).await
            }
        }
    }
}
