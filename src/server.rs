//! Demo classification service — the HTTP surface over the keyword
//! heuristic.
//!
//! Implements the wire contract consumed by `classify::client`:
//! - `GET  /health` — liveness
//! - `GET  /api/models` — heuristic description
//! - `POST /api/analyze` — JSON `{ "text": ... }`
//! - `POST /api/analyze/upload` — multipart `file` field (.txt or .pdf)
//! - `POST /api/analyze/batch` — JSON `{ "emails": [...] }`, max 50

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::classify::KeywordClassifier;
use crate::classify::types::{
    AnalysisMeta, AnalyzeRequest, AnalyzeResponse, BatchItem, BatchRequest, BatchResponse,
    ClassificationResult, ErrorBody,
};
use crate::extract;
use crate::intake::{self, MAX_FILE_BYTES};

/// Server-side cap on analyzed content length, in characters.
pub const MAX_CONTENT_CHARS: usize = 10_000;

/// Maximum emails accepted per batch call.
pub const MAX_BATCH_EMAILS: usize = 50;

/// Slack on top of the file cap for multipart framing overhead.
const BODY_LIMIT_SLACK: usize = 64 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    classifier: Arc<KeywordClassifier>,
}

/// Build the Axum router for the demo service.
pub fn analyze_routes(classifier: Arc<KeywordClassifier>, cors_origins: &[String]) -> Router {
    let state = AppState { classifier };

    Router::new()
        .route("/health", get(health))
        .route("/api/models", get(models_info))
        .route("/api/analyze", post(analyze_text))
        .route("/api/analyze/upload", post(analyze_upload))
        .route("/api/analyze/batch", post(analyze_batch))
        .layer(DefaultBodyLimit::max(MAX_FILE_BYTES + BODY_LIMIT_SLACK))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

fn analyze_response(result: ClassificationResult, content_chars: usize, started: Instant, model: &str) -> Response {
    let body = AnalyzeResponse {
        success: true,
        category: result.category,
        confidence: result.confidence,
        response: result.suggested_response,
        analysis: AnalysisMeta {
            content_length: content_chars,
            processing_time_ms: started.elapsed().as_millis() as u64,
            model_used: model.to_string(),
        },
    };
    (StatusCode::OK, Json(body)).into_response()
}

// ── Health & models ─────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "mail-triage",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn models_info() -> impl IntoResponse {
    Json(serde_json::json!({
        "classification_model": {
            "name": "Keyword heuristic",
            "type": "rule_based",
            "description": "Keyword-presence scoring over fixed productive and unproductive sets",
            "features": [
                "case-insensitive keyword matching",
                "confidence from keyword-count difference",
                "template-based suggested responses",
            ],
        },
        "supported_languages": ["portuguese"],
        "file_formats": ["txt", "pdf"],
        "max_content_length": MAX_CONTENT_CHARS,
        "max_file_bytes": MAX_FILE_BYTES,
    }))
}

// ── Analysis endpoints ──────────────────────────────────────────────

async fn analyze_text(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> Response {
    let request_id = Uuid::new_v4();
    let text = body.text.trim();

    if text.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No email text provided");
    }
    let chars = text.chars().count();
    if chars > MAX_CONTENT_CHARS {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Content too long: maximum {MAX_CONTENT_CHARS} characters"),
        );
    }

    let started = Instant::now();
    let result = state.classifier.classify_text(text);
    info!(
        %request_id,
        chars,
        category = result.category.label(),
        confidence = result.confidence,
        "Analyzed email text"
    );

    analyze_response(result, chars, started, state.classifier.model_name())
}

async fn analyze_upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let request_id = Uuid::new_v4();
    let started = Instant::now();

    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => break field,
            Ok(Some(_)) => continue,
            Ok(None) => {
                return error_response(StatusCode::BAD_REQUEST, "No file provided");
            }
            Err(e) => {
                warn!(%request_id, error = %e, "Failed to read multipart body");
                return error_response(StatusCode::BAD_REQUEST, "Malformed multipart body");
            }
        }
    };

    let filename = field.file_name().unwrap_or("upload").to_string();
    let mime = field.content_type().map(str::to_string);
    let bytes = match field.bytes().await {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => {
            warn!(%request_id, error = %e, "Failed to read upload");
            return error_response(StatusCode::BAD_REQUEST, "Failed to read upload");
        }
    };

    let file = match intake::accept_file(&filename, mime.as_deref(), bytes) {
        Ok(file) => file,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    // Extraction is CPU-bound (PDFs); keep it off the async runtime.
    let extracted = tokio::task::spawn_blocking(move || extract::extract_text(&file)).await;
    let text = match extracted {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!(%request_id, file = %filename, error = %e, "Extraction failed");
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string());
        }
        Err(e) => {
            warn!(%request_id, error = %e, "Extraction task failed");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Extraction task failed",
            );
        }
    };

    let text = text.trim();
    if text.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "File contains no text");
    }
    let chars = text.chars().count();
    if chars > MAX_CONTENT_CHARS {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Content too long: maximum {MAX_CONTENT_CHARS} characters"),
        );
    }

    let result = state.classifier.classify_text(text);
    info!(
        %request_id,
        file = %filename,
        chars,
        category = result.category.label(),
        "Analyzed uploaded file"
    );

    analyze_response(result, chars, started, state.classifier.model_name())
}

async fn analyze_batch(
    State(state): State<AppState>,
    Json(body): Json<BatchRequest>,
) -> Response {
    if body.emails.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No emails provided");
    }
    if body.emails.len() > MAX_BATCH_EMAILS {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Too many emails: maximum {MAX_BATCH_EMAILS} per batch"),
        );
    }

    let results: Vec<BatchItem> = body
        .emails
        .iter()
        .enumerate()
        .map(|(index, content)| {
            let text = content.trim();
            if text.is_empty() {
                return BatchItem {
                    index,
                    success: false,
                    category: None,
                    confidence: None,
                    response: None,
                    error: Some("empty content".into()),
                };
            }
            if text.chars().count() > MAX_CONTENT_CHARS {
                return BatchItem {
                    index,
                    success: false,
                    category: None,
                    confidence: None,
                    response: None,
                    error: Some(format!(
                        "content too long: maximum {MAX_CONTENT_CHARS} characters"
                    )),
                };
            }
            let result = state.classifier.classify_text(text);
            BatchItem {
                index,
                success: true,
                category: Some(result.category),
                confidence: Some(result.confidence),
                response: Some(result.suggested_response),
                error: None,
            }
        })
        .collect();

    info!(total = body.emails.len(), "Analyzed email batch");

    let body = BatchResponse {
        success: true,
        total_processed: results.len(),
        results,
    };
    (StatusCode::OK, Json(body)).into_response()
}
