//! mail-triage — email ingestion and classification pipeline.

pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod intake;
pub mod pipeline;
pub mod render;
pub mod respond;
pub mod server;
