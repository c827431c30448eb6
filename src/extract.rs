//! Text extraction from accepted files.
//!
//! Plain text is a straight UTF-8 decode. PDFs go through `pdf-extract`;
//! that call is CPU-bound, so async callers wrap it in `spawn_blocking`.

use tracing::debug;

use crate::error::ExtractError;
use crate::intake::{AcquiredFile, FileKind};

/// Decode plain-text bytes as UTF-8.
pub fn decode_text(bytes: &[u8]) -> Result<String, ExtractError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| ExtractError::Encoding(e.to_string()))
}

/// Extract the text content of a PDF from raw bytes.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let text =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?;
    debug!(chars = text.len(), "Extracted text from PDF");
    Ok(text.trim().to_string())
}

/// Extract text from an accepted file, dispatching on its kind.
pub fn extract_text(file: &AcquiredFile) -> Result<String, ExtractError> {
    match file.kind {
        FileKind::PlainText => decode_text(&file.bytes),
        FileKind::Pdf => extract_pdf(&file.bytes),
    }
}
