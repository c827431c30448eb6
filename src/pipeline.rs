//! Session pipeline — acquire → classify → render, one request at a time.
//!
//! Flow per trigger:
//! 1. normalize the active `InputSource` (no input → `EmptyInput`, nothing
//!    is sent anywhere)
//! 2. submit to the `Classifier` under a timeout, cancellable
//! 3. store the verdict, hand it to the renderer, emit a notice
//!
//! **Core invariant: at most one classification request in flight per
//! session.** A trigger while one is running is a no-op. Any failure
//! releases the guard so the user can retry manually; there is no
//! automatic retry.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, Notify};
use tracing::{debug, info, warn};

use crate::classify::Classifier;
use crate::classify::types::ClassificationResult;
use crate::error::{ClassifyError, PipelineError, ValidationError};
use crate::intake::{self, InputSource};
use crate::render::{NoticeLevel, Notifier, ResultRenderer};

/// Outcome of a trigger invocation.
#[derive(Debug)]
pub enum TriggerOutcome {
    /// The pipeline ran to completion.
    Completed(ClassificationResult),
    /// A request was already in flight; this invocation did nothing.
    Ignored,
}

/// A verdict with the time it was produced.
#[derive(Debug, Clone)]
pub struct ProcessedVerdict {
    pub result: ClassificationResult,
    pub processed_at: DateTime<Utc>,
}

/// Session state owned by the pipeline. Replaced wholesale on new
/// selection, cleared on reset; nothing survives the session.
#[derive(Default)]
struct SessionState {
    input: Option<InputSource>,
    last_verdict: Option<ProcessedVerdict>,
}

/// The classification pipeline for one user session.
pub struct Pipeline {
    classifier: Arc<dyn Classifier>,
    renderer: Arc<dyn ResultRenderer>,
    notifier: Arc<dyn Notifier>,
    request_timeout: Duration,
    state: Mutex<SessionState>,
    in_flight: AtomicBool,
    cancel: Notify,
}

impl Pipeline {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        renderer: Arc<dyn ResultRenderer>,
        notifier: Arc<dyn Notifier>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            classifier,
            renderer,
            notifier,
            request_timeout,
            state: Mutex::new(SessionState::default()),
            in_flight: AtomicBool::new(false),
            cancel: Notify::new(),
        }
    }

    /// Replace the active input with typed text. Clears any attached
    /// file; blank text clears the input entirely.
    pub async fn set_text(&self, text: &str) {
        let mut state = self.state.lock().await;
        if text.trim().is_empty() {
            state.input = None;
        } else {
            state.input = Some(InputSource::Text(text.to_string()));
        }
    }

    /// Validate and attach a file, replacing any typed text.
    ///
    /// On rejection the previous input is left untouched and an error
    /// notice is emitted.
    pub async fn attach_file(
        &self,
        name: &str,
        mime: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<(), ValidationError> {
        match intake::accept_file(name, mime, bytes) {
            Ok(file) => {
                self.notifier.notify(
                    NoticeLevel::Success,
                    &format!("File \"{}\" attached ({} bytes)", file.name, file.size()),
                );
                let mut state = self.state.lock().await;
                state.input = Some(InputSource::File(file));
                Ok(())
            }
            Err(e) => {
                self.notifier.notify(NoticeLevel::Error, &e.to_string());
                Err(e)
            }
        }
    }

    /// Clear input and last verdict, ready for a new analysis.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.input = None;
        state.last_verdict = None;
        drop(state);
        self.notifier.notify(NoticeLevel::Info, "Session reset");
    }

    /// Label of the active input ("text" / "file"), if any.
    pub async fn input_label(&self) -> Option<&'static str> {
        let state = self.state.lock().await;
        state.input.as_ref().map(|s| match s {
            InputSource::Text(_) => "text",
            InputSource::File(_) => "file",
        })
    }

    /// The most recent verdict, if any.
    pub async fn last_verdict(&self) -> Option<ProcessedVerdict> {
        self.state.lock().await.last_verdict.clone()
    }

    /// Whether a classification request is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Cancel the in-flight classification, if any.
    pub fn cancel(&self) {
        self.cancel.notify_waiters();
    }

    /// Run the pipeline once: normalize, classify, render.
    ///
    /// Returns `Ignored` without doing anything when a request is already
    /// in flight.
    pub async fn trigger(&self) -> Result<TriggerOutcome, PipelineError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("Classification already in flight — trigger ignored");
            return Ok(TriggerOutcome::Ignored);
        }

        let outcome = self.run_once().await;
        self.in_flight.store(false, Ordering::SeqCst);

        match outcome {
            Ok(result) => {
                self.notifier.notify(
                    NoticeLevel::Success,
                    &format!(
                        "Email classified as {} ({:.0}% confidence)",
                        result.category.label(),
                        result.confidence * 100.0
                    ),
                );
                self.renderer.render(&result);
                Ok(TriggerOutcome::Completed(result))
            }
            Err(e) => {
                warn!(error = %e, "Classification failed — trigger re-enabled");
                self.notifier.notify(NoticeLevel::Error, &e.to_string());
                Err(e)
            }
        }
    }

    async fn run_once(&self) -> Result<ClassificationResult, PipelineError> {
        // Normalize under the lock, then release it for the slow call.
        let request = {
            let state = self.state.lock().await;
            let source = state
                .input
                .as_ref()
                .ok_or(PipelineError::Validation(ValidationError::EmptyInput))?;
            intake::normalize(source)?
        };

        info!(kind = request.label(), "Submitting classification request");

        let result = tokio::select! {
            res = tokio::time::timeout(self.request_timeout, self.classifier.classify(&request)) => {
                match res {
                    Ok(verdict) => verdict.map_err(PipelineError::Classify)?,
                    Err(_) => {
                        return Err(ClassifyError::Timeout {
                            after: self.request_timeout,
                        }
                        .into());
                    }
                }
            }
            _ = self.cancel.notified() => {
                info!("Classification cancelled by user");
                return Err(ClassifyError::Cancelled.into());
            }
        };

        let mut state = self.state.lock().await;
        state.last_verdict = Some(ProcessedVerdict {
            result: result.clone(),
            processed_at: Utc::now(),
        });
        Ok(result)
    }
}
