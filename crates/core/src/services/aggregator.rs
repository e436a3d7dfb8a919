use chrono::Utc;
use tracing::{info, warn};

use crate::api::traits::FinanceApi;
use crate::errors::DashboardError;
use crate::models::snapshot::{DashboardSnapshot, Fetched};

/// Fetches everything the dashboard shows and assembles a `DashboardSnapshot`.
///
/// Failure policy:
/// - The session check (`current_user`) gates the whole flow. If it fails for
///   any reason, nothing else is fetched and the caller gets `Unauthenticated`.
/// - Every other resource is fetched independently; a failure only marks that
///   resource as `Fetched::Failed` so the rest of the dashboard still renders.
///
/// No caching, no retries: every call re-fetches from zero.
pub struct DataAggregator;

impl DataAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Full load: session check, then the five dashboard resources.
    pub async fn load_dashboard(
        &self,
        api: &dyn FinanceApi,
    ) -> Result<DashboardSnapshot, DashboardError> {
        let user = api.current_user().await.map_err(|e| {
            warn!("Session check failed: {e}");
            DashboardError::Unauthenticated
        })?;

        // Independent reads; run them together after the session check.
        let (summary, transactions, monthly, trends, cashflow) = futures::join!(
            api.summary(),
            api.transactions(),
            api.monthly(),
            api.trends(),
            api.cashflow(),
        );

        let snapshot = DashboardSnapshot {
            user,
            summary: track("summary", summary),
            transactions: track("transactions", transactions),
            monthly: track("monthly analytics", monthly),
            trends: track("trends", trends),
            cashflow: track("cashflow", cashflow),
            fetched_at: Utc::now(),
        };

        info!(
            "Dashboard loaded for {} ({} of 5 resources failed)",
            snapshot.user.username,
            snapshot.failed_count()
        );
        Ok(snapshot)
    }

    /// Partial reload after a successful mutation: transactions and summary
    /// are re-fetched, the other resources are carried over from `previous`.
    pub async fn refresh_after_mutation(
        &self,
        api: &dyn FinanceApi,
        previous: &DashboardSnapshot,
    ) -> DashboardSnapshot {
        let (summary, transactions) = futures::join!(api.summary(), api.transactions());

        DashboardSnapshot {
            user: previous.user.clone(),
            summary: track("summary", summary),
            transactions: track("transactions", transactions),
            monthly: previous.monthly.clone(),
            trends: previous.trends.clone(),
            cashflow: previous.cashflow.clone(),
            fetched_at: Utc::now(),
        }
    }
}

/// Wrap a fetch result, logging failures.
fn track<T>(resource: &str, result: Result<T, DashboardError>) -> Fetched<T> {
    if let Err(e) = &result {
        warn!("Failed to load {resource}: {e}");
    }
    Fetched::from(result)
}

impl Default for DataAggregator {
    fn default() -> Self {
        Self::new()
    }
}
