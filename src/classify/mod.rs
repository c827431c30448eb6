//! Email classification.
//!
//! One seam, two implementations:
//! 1. `client::HttpClassifier` — talks to a remote classification service
//!    over the JSON/multipart wire contract in `types`
//! 2. `keywords::KeywordClassifier` — the local demo heuristic, also the
//!    engine behind the demo service in `crate::server`
//!
//! Both implement the `Classifier` trait; the pipeline never knows which
//! one it is driving.

pub mod client;
pub mod keywords;
pub mod types;

pub use client::{Classifier, HttpClassifier};
pub use keywords::KeywordClassifier;
pub use types::{Category, ClassificationResult};
