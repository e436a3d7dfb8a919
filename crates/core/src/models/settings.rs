use serde::{Deserialize, Serialize};

use crate::errors::DashboardError;

/// Default name of the settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "finance-dashboard.toml";

/// Hard cap on rows in the recent-transactions table.
pub const MAX_RECENT_TRANSACTIONS: usize = 5;

/// User-configurable settings. Every field has a default, so a partial
/// (or empty) TOML file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Root URL of the backend, without the `/api` prefix (e.g., "http://localhost:5000").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// The currency in which all amounts are displayed (e.g., "USD", "EUR", "PLN").
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// How many transactions the dashboard table shows (1 to 5).
    #[serde(default = "default_recent_limit")]
    pub recent_transactions_limit: usize,

    /// Per-request timeout in seconds (ignored on wasm32).
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_currency: default_currency(),
            recent_transactions_limit: default_recent_limit(),
            request_timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_recent_limit() -> usize {
    MAX_RECENT_TRANSACTIONS
}

fn default_timeout() -> u64 {
    30
}

impl Settings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, DashboardError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, DashboardError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DashboardError::FileIO(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load settings from `path` if it exists, otherwise fall back to defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: &std::path::Path) -> Result<Self, DashboardError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Render these settings as TOML (for writing a starter config file).
    pub fn to_toml_string(&self) -> Result<String, DashboardError> {
        toml::to_string_pretty(self).map_err(|e| DashboardError::Serialization(e.to_string()))
    }

    /// Set the display currency. Must be a 3-letter alphabetic code.
    pub fn set_default_currency(&mut self, currency: &str) -> Result<(), DashboardError> {
        self.default_currency = normalize_currency(currency)?;
        Ok(())
    }

    /// Check every field; returns the first problem found.
    pub fn validate(&self) -> Result<(), DashboardError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(DashboardError::Config(format!(
                "base_url '{}' must start with http:// or https://",
                self.base_url
            )));
        }
        normalize_currency(&self.default_currency)
            .map_err(|e| DashboardError::Config(e.to_string()))?;
        if self.recent_transactions_limit == 0
            || self.recent_transactions_limit > MAX_RECENT_TRANSACTIONS
        {
            return Err(DashboardError::Config(format!(
                "recent_transactions_limit must be between 1 and {MAX_RECENT_TRANSACTIONS}, got {}",
                self.recent_transactions_limit
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(DashboardError::Config(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

fn normalize_currency(currency: &str) -> Result<String, DashboardError> {
    let trimmed = currency.trim().to_uppercase();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DashboardError::ValidationError(format!(
            "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., USD, EUR, PLN)"
        )));
    }
    Ok(trimmed)
}
