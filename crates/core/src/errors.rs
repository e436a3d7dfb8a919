use thiserror::Error;

/// Unified error type for the entire finance-dashboard-core library.
/// Every public function returns `Result<T, DashboardError>`.
#[derive(Debug, Error)]
pub enum DashboardError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({endpoint}, HTTP {status}): {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Not authenticated — please log in")]
    Unauthenticated,

    // ── Payloads ────────────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Forms / Business Logic ──────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File I/O error: {0}")]
    FileIO(String),
}

impl DashboardError {
    /// `true` when the error means the session is missing or expired.
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, DashboardError::Unauthenticated)
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for DashboardError {
    fn from(e: std::io::Error) -> Self {
        DashboardError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self {
        DashboardError::Deserialization(e.to_string())
    }
}

impl From<toml::de::Error> for DashboardError {
    fn from(e: toml::de::Error) -> Self {
        DashboardError::Config(e.to_string())
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(e: reqwest::Error) -> Self {
        // Strip query strings so credentials or tokens in URLs never reach logs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        DashboardError::Network(sanitized)
    }
}
