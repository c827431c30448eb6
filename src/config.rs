//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Default HTTP port for the demo classification service.
const DEFAULT_PORT: u16 = 5000;

/// Default classification request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Service configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Port for the demo classification service.
    pub port: u16,
    /// Remote classification endpoint, e.g. `http://localhost:5000`.
    /// `None` means classify locally with the keyword heuristic.
    pub endpoint: Option<String>,
    /// Timeout for a single classification request.
    pub request_timeout: Duration,
    /// Allowed CORS origins (`*` for any).
    pub cors_origins: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            endpoint: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl ServiceConfig {
    /// Build configuration from environment variables.
    ///
    /// - `MAIL_TRIAGE_PORT` — demo service port (default 5000)
    /// - `MAIL_TRIAGE_ENDPOINT` — remote classification endpoint (optional)
    /// - `MAIL_TRIAGE_TIMEOUT_SECS` — request timeout (default 30)
    /// - `MAIL_TRIAGE_CORS_ORIGINS` — comma-separated origins (default `*`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let port: u16 = match std::env::var("MAIL_TRIAGE_PORT") {
            Ok(s) => s.parse().map_err(|_| ConfigError::InvalidValue {
                key: "MAIL_TRIAGE_PORT".into(),
                message: format!("not a valid port: {s}"),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let endpoint = std::env::var("MAIL_TRIAGE_ENDPOINT")
            .ok()
            .map(|s| s.trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());

        let timeout_secs: u64 = match std::env::var("MAIL_TRIAGE_TIMEOUT_SECS") {
            Ok(s) => s.parse().map_err(|_| ConfigError::InvalidValue {
                key: "MAIL_TRIAGE_TIMEOUT_SECS".into(),
                message: format!("not a valid number of seconds: {s}"),
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let cors_origins: Vec<String> = std::env::var("MAIL_TRIAGE_CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            port,
            endpoint,
            request_timeout: Duration::from_secs(timeout_secs),
            cors_origins,
        })
    }
}
