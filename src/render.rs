//! Rendering and notification collaborators.
//!
//! The pipeline only needs two things from the presentation side: a place
//! to display a verdict and a place to surface transient notices. Styling
//! and animation are the collaborator's problem.

use crate::classify::types::ClassificationResult;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Surfaces transient notices (file accepted, validation failed, ...).
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Displays a classification verdict.
pub trait ResultRenderer: Send + Sync {
    fn render(&self, result: &ClassificationResult);
}

/// Notifier that routes notices into the tracing log.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Success | NoticeLevel::Info => tracing::info!("{message}"),
            NoticeLevel::Error => tracing::error!("{message}"),
        }
    }
}

/// Renderer that prints the verdict to stderr, banner-style.
pub struct TerminalRenderer;

impl ResultRenderer for TerminalRenderer {
    fn render(&self, result: &ClassificationResult) {
        let confidence_pct = (result.confidence * 100.0).round() as u32;
        eprintln!("   Category:   {}", result.category.label().to_uppercase());
        eprintln!("   Confidence: {confidence_pct}%");
        eprintln!("   Suggested:  {}\n", result.suggested_response);
    }
}
