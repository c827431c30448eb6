//! Keyword-presence heuristic — the reproducible demo classifier.
//!
//! Counts how many keywords from each fixed set appear in the content
//! (case-insensitive substring, each keyword counted once). The email is
//! Productive iff strictly more productive keywords match; confidence is
//! `min(0.95, 0.7 + 0.1 × |productive − unproductive|)`.
//!
//! This is a demo heuristic, not a model. It doubles as the engine of
//! the demo service and as the local fallback when no remote endpoint is
//! configured.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::classify::client::Classifier;
use crate::classify::types::{Category, ClassificationResult};
use crate::error::{ClassifyError, ExtractError};
use crate::extract;
use crate::intake::ClassificationRequest;
use crate::respond;

/// Keywords that mark an email as work-relevant.
pub const PRODUCTIVE_KEYWORDS: &[&str] = &[
    "reunião",
    "projeto",
    "trabalho",
    "negócio",
    "cliente",
    "relatório",
    "deadline",
    "estratégia",
];

/// Keywords that mark an email as noise.
pub const UNPRODUCTIVE_KEYWORDS: &[&str] = &[
    "corrente",
    "sorte",
    "fwd:",
    "reencaminhar",
    "spam",
    "loteria",
    "promoção",
];

const BASE_CONFIDENCE: f32 = 0.7;
const CONFIDENCE_STEP: f32 = 0.1;
const MAX_CONFIDENCE: f32 = 0.95;

/// Count matching keywords from each set. A keyword contributes at most
/// one point no matter how often it occurs.
pub fn keyword_counts(content: &str) -> (usize, usize) {
    let lower = content.to_lowercase();
    let productive = PRODUCTIVE_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .count();
    let unproductive = UNPRODUCTIVE_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .count();
    (productive, unproductive)
}

/// Derive category and confidence from the keyword counts.
///
/// Productive requires strict inequality; equal counts (including 0/0)
/// are Unproductive.
pub fn verdict(productive: usize, unproductive: usize) -> (Category, f32) {
    let category = if productive > unproductive {
        Category::Productive
    } else {
        Category::Unproductive
    };
    let diff = productive.abs_diff(unproductive) as f32;
    let confidence = (BASE_CONFIDENCE + CONFIDENCE_STEP * diff).min(MAX_CONFIDENCE);
    (category, confidence)
}

/// Local classifier backed by the keyword heuristic.
pub struct KeywordClassifier {
    rng: Mutex<StdRng>,
}

impl KeywordClassifier {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Seeded variant for deterministic suggested responses in tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Identifier reported in analysis metadata.
    pub fn model_name(&self) -> &'static str {
        "keyword_heuristic"
    }

    /// Classify decoded text content.
    pub fn classify_text(&self, content: &str) -> ClassificationResult {
        let (productive, unproductive) = keyword_counts(content);
        let (category, confidence) = verdict(productive, unproductive);
        debug!(
            productive,
            unproductive,
            category = category.label(),
            confidence,
            "Keyword heuristic verdict"
        );

        let mut rng = self.rng.lock().expect("rng mutex poisoned");
        let suggested_response = respond::suggest_response(category, content, confidence, &mut *rng);

        ClassificationResult {
            category,
            confidence,
            suggested_response,
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Classifier for KeywordClassifier {
    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResult, ClassifyError> {
        match request {
            ClassificationRequest::Text(content) => Ok(self.classify_text(content)),
            ClassificationRequest::PdfUpload { bytes, .. } => {
                // pdf-extract is CPU-bound; keep it off the async runtime.
                let bytes = bytes.clone();
                let text = tokio::task::spawn_blocking(move || extract::extract_pdf(&bytes))
                    .await
                    .map_err(|e| {
                        ClassifyError::Extraction(ExtractError::Pdf(format!(
                            "extraction task failed: {e}"
                        )))
                    })??;
                Ok(self.classify_text(&text))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeting_email_is_productive() {
        // {reunião, projeto, relatório} = 3 productive, 0 unproductive.
        let (p, u) = keyword_counts("Precisamos agendar uma reunião sobre o projeto e o relatório");
        assert_eq!((p, u), (3, 0));

        let (category, confidence) = verdict(p, u);
        assert_eq!(category, Category::Productive);
        // 0.7 + 0.1 × 3 = 1.0, capped at 0.95.
        assert!((confidence - 0.95).abs() < f32::EPSILON);
    }

    #[test]
    fn lottery_chain_email_is_unproductive() {
        // {loteria, corrente, sorte, fwd:, promoção} = 5 unproductive.
        let (p, u) = keyword_counts("Você ganhou na loteria! Corrente da sorte, fwd: promoção");
        assert_eq!((p, u), (0, 5));

        let (category, confidence) = verdict(p, u);
        assert_eq!(category, Category::Unproductive);
        assert!((confidence - 0.95).abs() < f32::EPSILON);
    }

    #[test]
    fn equal_counts_are_unproductive() {
        let (category, confidence) = verdict(2, 2);
        assert_eq!(category, Category::Unproductive);
        assert!((confidence - 0.7).abs() < f32::EPSILON);

        let (category, _) = verdict(0, 0);
        assert_eq!(category, Category::Unproductive);
    }

    #[test]
    fn confidence_bounds_and_monotonicity() {
        let mut last = 0.0f32;
        for diff in 0..10usize {
            let (_, confidence) = verdict(diff, 0);
            assert!((0.7..=0.95).contains(&confidence));
            assert!(confidence >= last);
            last = confidence;
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        let (p, u) = keyword_counts("REUNIÃO sobre o PROJETO");
        assert_eq!((p, u), (2, 0));
    }

    #[test]
    fn keyword_counted_once_per_set() {
        let (p, _) = keyword_counts("projeto projeto projeto");
        assert_eq!(p, 1);
    }

    #[test]
    fn substring_matches_count() {
        // "spam" inside a larger word still matches — substring semantics.
        let (_, u) = keyword_counts("caixa de spambox");
        assert_eq!(u, 1);
    }

    #[tokio::test]
    async fn classifier_trait_handles_text_request() {
        let classifier = KeywordClassifier::with_seed(42);
        let request = ClassificationRequest::Text("reunião do projeto com o cliente".into());
        let result = classifier.classify(&request).await.unwrap();
        assert_eq!(result.category, Category::Productive);
        assert!((result.confidence - 0.95).abs() < f32::EPSILON);
        assert!(!result.suggested_response.is_empty());
    }

    #[tokio::test]
    async fn classifier_trait_rejects_garbage_pdf() {
        let classifier = KeywordClassifier::with_seed(42);
        let request = ClassificationRequest::PdfUpload {
            filename: "bad.pdf".into(),
            bytes: b"not a pdf".to_vec(),
        };
        let err = classifier.classify(&request).await.unwrap_err();
        assert!(matches!(err, ClassifyError::Extraction(_)));
    }

    #[test]
    fn suggested_response_is_deterministic_with_seed() {
        let a = KeywordClassifier::with_seed(7).classify_text("reunião do projeto");
        let b = KeywordClassifier::with_seed(7).classify_text("reunião do projeto");
        assert_eq!(a.suggested_response, b.suggested_response);
    }
}
