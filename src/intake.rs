//! Input acquisition — validates user-provided email content and
//! normalizes it into a classification request.
//!
//! Two sources exist and are mutually exclusive: pasted text or a single
//! uploaded file (.txt or .pdf). Validation happens here, before anything
//! touches the network:
//! - MIME allowlist: `text/plain`, `application/pdf` (extension fallback
//!   when the caller supplies no MIME type)
//! - size cap: 5 MiB
//!
//! PDF content is not decoded here — the raw bytes travel inside
//! `ClassificationRequest::PdfUpload` and are extracted by whichever
//! classifier handles the request.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, ValidationError};
use crate::extract;

/// Maximum accepted file size: 5 MiB.
pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

/// Kind of file the acquirer knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    PlainText,
    Pdf,
}

impl FileKind {
    /// Resolve from a MIME type string.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "text/plain" => Some(Self::PlainText),
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Resolve from a file name extension (fallback when no MIME type is given).
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())?;
        match ext.as_str() {
            "txt" => Some(Self::PlainText),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Canonical MIME type for this kind.
    pub fn mime(&self) -> &'static str {
        match self {
            Self::PlainText => "text/plain",
            Self::Pdf => "application/pdf",
        }
    }
}

/// A validated, accepted file with its raw content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquiredFile {
    /// Original file name as supplied by the user.
    pub name: String,
    /// Resolved file kind.
    pub kind: FileKind,
    /// Raw file bytes (≤ `MAX_FILE_BYTES`).
    pub bytes: Vec<u8>,
}

impl AcquiredFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// The single active input — pasted text or an uploaded file.
///
/// Exactly one is active at a time; the pipeline session enforces that
/// selecting one clears the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InputSource {
    Text(String),
    File(AcquiredFile),
}

/// Normalized content handed to a classifier.
#[derive(Debug, Clone)]
pub enum ClassificationRequest {
    /// Decoded text content, trimmed and non-empty.
    Text(String),
    /// A PDF whose text must be extracted by the classifier side.
    PdfUpload { filename: String, bytes: Vec<u8> },
}

impl ClassificationRequest {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::PdfUpload { .. } => "pdf_upload",
        }
    }
}

/// Validate an uploaded file: type allowlist, then size cap.
///
/// `mime` is the caller-supplied content type; when absent or empty the
/// kind is resolved from the file extension instead.
pub fn accept_file(
    name: &str,
    mime: Option<&str>,
    bytes: Vec<u8>,
) -> Result<AcquiredFile, ValidationError> {
    let kind = match mime.filter(|m| !m.is_empty()) {
        Some(m) => FileKind::from_mime(m).ok_or_else(|| ValidationError::UnsupportedType {
            mime: m.to_string(),
        })?,
        None => FileKind::from_name(name).ok_or_else(|| ValidationError::UnsupportedType {
            mime: format!("unknown ({name})"),
        })?,
    };

    if bytes.len() > MAX_FILE_BYTES {
        return Err(ValidationError::TooLarge {
            size: bytes.len(),
            limit: MAX_FILE_BYTES,
        });
    }

    Ok(AcquiredFile {
        name: name.to_string(),
        kind,
        bytes,
    })
}

/// Normalize the active input into a classification request.
///
/// Plain text (pasted or `.txt` file) is decoded and trimmed here; an
/// empty result is `EmptyInput`. PDF bytes pass through untouched.
pub fn normalize(source: &InputSource) -> Result<ClassificationRequest, PipelineError> {
    match source {
        InputSource::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(ValidationError::EmptyInput.into());
            }
            Ok(ClassificationRequest::Text(trimmed.to_string()))
        }
        InputSource::File(file) => match file.kind {
            FileKind::PlainText => {
                let content = extract::decode_text(&file.bytes)
                    .map_err(crate::error::ClassifyError::Extraction)
                    .map_err(PipelineError::Classify)?;
                let trimmed = content.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::EmptyInput.into());
                }
                Ok(ClassificationRequest::Text(trimmed.to_string()))
            }
            FileKind::Pdf => Ok(ClassificationRequest::PdfUpload {
                filename: file.name.clone(),
                bytes: file.bytes.clone(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_text_by_mime() {
        let file = accept_file("mail.txt", Some("text/plain"), b"hello".to_vec()).unwrap();
        assert_eq!(file.kind, FileKind::PlainText);
        assert_eq!(file.size(), 5);
    }

    #[test]
    fn accepts_pdf_by_mime() {
        let file = accept_file("doc.pdf", Some("application/pdf"), vec![0x25, 0x50]).unwrap();
        assert_eq!(file.kind, FileKind::Pdf);
    }

    #[test]
    fn rejects_png() {
        let err = accept_file("pic.png", Some("image/png"), vec![0; 16]).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType { .. }));
    }

    #[test]
    fn extension_fallback_when_no_mime() {
        let file = accept_file("mail.TXT", None, b"hi".to_vec()).unwrap();
        assert_eq!(file.kind, FileKind::PlainText);

        let file = accept_file("report.pdf", None, vec![1, 2, 3]).unwrap();
        assert_eq!(file.kind, FileKind::Pdf);
    }

    #[test]
    fn rejects_unknown_extension_without_mime() {
        let err = accept_file("archive.zip", None, vec![0; 4]).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType { .. }));
    }

    #[test]
    fn empty_mime_falls_back_to_extension() {
        let file = accept_file("mail.txt", Some(""), b"hi".to_vec()).unwrap();
        assert_eq!(file.kind, FileKind::PlainText);
    }

    #[test]
    fn rejects_oversized_file() {
        let err = accept_file(
            "big.txt",
            Some("text/plain"),
            vec![b'a'; MAX_FILE_BYTES + 1],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TooLarge {
                size,
                limit: MAX_FILE_BYTES,
            } if size == MAX_FILE_BYTES + 1
        ));
    }

    #[test]
    fn accepts_file_at_exact_limit() {
        let file = accept_file("max.txt", Some("text/plain"), vec![b'a'; MAX_FILE_BYTES]);
        assert!(file.is_ok());
    }

    #[test]
    fn normalize_trims_text() {
        let req = normalize(&InputSource::Text("  olá  \n".into())).unwrap();
        match req {
            ClassificationRequest::Text(t) => assert_eq!(t, "olá"),
            other => panic!("expected text request, got {}", other.label()),
        }
    }

    #[test]
    fn normalize_rejects_blank_text() {
        let err = normalize(&InputSource::Text("   \n\t".into())).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Validation(ValidationError::EmptyInput)
        ));
    }

    #[test]
    fn normalize_decodes_txt_file() {
        let file = accept_file("mail.txt", Some("text/plain"), "reunião\n".as_bytes().to_vec())
            .unwrap();
        let req = normalize(&InputSource::File(file)).unwrap();
        assert!(matches!(req, ClassificationRequest::Text(ref t) if t == "reunião"));
    }

    #[test]
    fn normalize_rejects_empty_txt_file() {
        let file = accept_file("empty.txt", Some("text/plain"), b"  \n".to_vec()).unwrap();
        let err = normalize(&InputSource::File(file)).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Validation(ValidationError::EmptyInput)
        ));
    }

    #[test]
    fn normalize_passes_pdf_bytes_through() {
        let bytes = vec![0x25, 0x50, 0x44, 0x46];
        let file = accept_file("doc.pdf", Some("application/pdf"), bytes.clone()).unwrap();
        let req = normalize(&InputSource::File(file)).unwrap();
        match req {
            ClassificationRequest::PdfUpload { filename, bytes: b } => {
                assert_eq!(filename, "doc.pdf");
                assert_eq!(b, bytes);
            }
            other => panic!("expected pdf upload, got {}", other.label()),
        }
    }
}
