use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analytics::{AnalyticsSummary, CashflowPoint, MonthlySeries, TrendAnalytics};
use super::transaction::Transaction;
use super::user::User;
use crate::errors::DashboardError;

/// Outcome of fetching one dashboard resource.
///
/// Each resource is fetched independently, so one failed call leaves the
/// rest of the snapshot usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Fetched<T> {
    Ready(T),
    Failed(String),
}

impl<T> Fetched<T> {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Fetched::Ready(_))
    }

    /// The fetched value, if the request succeeded.
    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Fetched::Ready(value) => Some(value),
            Fetched::Failed(_) => None,
        }
    }

    /// The failure message, if the request failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Fetched::Ready(_) => None,
            Fetched::Failed(message) => Some(message),
        }
    }
}

impl<T> From<Result<T, DashboardError>> for Fetched<T> {
    fn from(result: Result<T, DashboardError>) -> Self {
        match result {
            Ok(value) => Fetched::Ready(value),
            Err(e) => Fetched::Failed(e.to_string()),
        }
    }
}

/// Everything the dashboard shows, copied from the backend for one render cycle.
///
/// Never edited after assembly: a refresh builds a new snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub user: User,
    pub summary: Fetched<AnalyticsSummary>,
    pub transactions: Fetched<Vec<Transaction>>,
    pub monthly: Fetched<MonthlySeries>,
    pub trends: Fetched<TrendAnalytics>,
    pub cashflow: Fetched<Vec<CashflowPoint>>,
    pub fetched_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// Number of resources that failed to load in this cycle.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        [
            self.summary.is_ready(),
            self.transactions.is_ready(),
            self.monthly.is_ready(),
            self.trends.is_ready(),
            self.cashflow.is_ready(),
        ]
        .iter()
        .filter(|ready| !**ready)
        .count()
    }
}
