use async_trait::async_trait;

use crate::errors::DashboardError;
use crate::models::analytics::{AnalyticsSummary, CashflowPoint, MonthlySeries, TrendAnalytics};
use crate::models::transaction::{NewTransaction, Transaction};
use crate::models::user::User;

/// Everything the dashboard needs from the finance backend.
///
/// `HttpFinanceApi` talks to the real REST service; tests and alternative
/// front ends plug in their own implementation. Implementations convert wire
/// payloads into the canonical models before returning.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait FinanceApi: Send + Sync {
    /// Open a session. Returns the logged-in user.
    async fn login(&self, email: &str, password: &str) -> Result<User, DashboardError>;

    /// Create an account. Does not open a session.
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), DashboardError>;

    /// Close the current session.
    async fn logout(&self) -> Result<(), DashboardError>;

    /// The user behind the current session (the session check).
    async fn current_user(&self) -> Result<User, DashboardError>;

    /// Totals and per-category expenses.
    async fn summary(&self) -> Result<AnalyticsSummary, DashboardError>;

    /// All transactions of the current user, in whatever order the backend chose.
    async fn transactions(&self) -> Result<Vec<Transaction>, DashboardError>;

    /// Income/expense per calendar month.
    async fn monthly(&self) -> Result<MonthlySeries, DashboardError>;

    async fn trends(&self) -> Result<TrendAnalytics, DashboardError>;

    /// Cumulative balance series, sorted by date ascending.
    async fn cashflow(&self) -> Result<Vec<CashflowPoint>, DashboardError>;

    /// Create a transaction. `Ok` only when the backend accepted it.
    async fn create_transaction(&self, transaction: &NewTransaction)
        -> Result<(), DashboardError>;
}
