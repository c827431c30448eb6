//! Classification verdict types and the wire schema shared by the
//! HTTP client and the demo service.

use serde::{Deserialize, Serialize};

// ── Verdict ─────────────────────────────────────────────────────────

/// Email category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Work-relevant; warrants a substantive reply.
    Productive,
    /// Noise (chain mail, spam-like content); warrants no or minimal reply.
    Unproductive,
}

impl Category {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Productive => "productive",
            Self::Unproductive => "unproductive",
        }
    }
}

/// A structured classification verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    /// Heuristic certainty in [0, 1].
    pub confidence: f32,
    /// Suggested reply text for this email.
    pub suggested_response: String,
}

// ── Wire schema ─────────────────────────────────────────────────────
//
// JSON over HTTP. Text goes to POST /api/analyze as `AnalyzeRequest`;
// PDFs go to POST /api/analyze/upload as a multipart `file` field.
// Both come back as `AnalyzeResponse`; errors as `ErrorBody` with a
// non-2xx status.

/// Request body for text analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Successful analysis response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub category: Category,
    pub confidence: f32,
    pub response: String,
    pub analysis: AnalysisMeta,
}

/// Metadata attached to every analysis response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMeta {
    /// Length of the analyzed content in characters.
    pub content_length: usize,
    /// Server-side processing time in milliseconds.
    pub processing_time_ms: u64,
    /// Identifier of the model/heuristic that produced the verdict.
    pub model_used: String,
}

impl AnalyzeResponse {
    pub fn into_result(self) -> ClassificationResult {
        ClassificationResult {
            category: self.category,
            confidence: self.confidence,
            suggested_response: self.response,
        }
    }
}

/// Request body for batch analysis (max 50 emails per call).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    pub emails: Vec<String>,
}

/// Per-item result in a batch response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    pub index: usize,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Batch analysis response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub success: bool,
    pub total_processed: usize,
    pub results: Vec<BatchItem>,
}

/// Error body returned with any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
