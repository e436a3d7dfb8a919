use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::debug;

use super::traits::FinanceApi;
use crate::errors::DashboardError;
use crate::models::analytics::{
    AnalyticsSummary, CashflowPoint, MonthlySeries, TrendAnalytics, WireCashflowPoint,
};
use crate::models::settings::Settings;
use crate::models::transaction::{NewTransaction, Transaction, WireTransaction};
use crate::models::user::{LoginRequest, RegisterRequest, User};

pub const LOGIN_PATH: &str = "/api/login";
pub const REGISTER_PATH: &str = "/api/register";
pub const LOGOUT_PATH: &str = "/api/logout";
pub const CURRENT_USER_PATH: &str = "/api/current_user";
pub const SUMMARY_PATH: &str = "/api/analytics";
pub const TRANSACTIONS_PATH: &str = "/api/transactions";
pub const MONTHLY_PATH: &str = "/api/analytics/monthly";
pub const TRENDS_PATH: &str = "/api/analytics/trends";
pub const CASHFLOW_PATH: &str = "/api/analytics/cashflow";

/// REST client for the finance backend.
///
/// - **Session**: cookie-based; the client keeps the session cookie set by
///   `/api/login` and sends it on every later request.
/// - **Errors**: 401 → `Unauthenticated`, other non-2xx → `Api` with the
///   backend's `{"error": ...}` message when present.
/// - **No caching, no retries**: every call goes to the network.
pub struct HttpFinanceApi {
    client: Client,
    base_url: String,
}

impl HttpFinanceApi {
    pub fn new(settings: &Settings) -> Result<Self, DashboardError> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .cookie_store(true)
            .timeout(Duration::from_secs(settings.request_timeout_secs));
        Ok(Self {
            client: builder.build()?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DashboardError> {
        debug!("GET {path}");
        let resp = self.client.get(self.url(path)).send().await?;
        let resp = check_status(resp, path).await?;
        resp.json().await.map_err(|e| {
            DashboardError::Deserialization(format!("Failed to parse response from {path}: {e}"))
        })
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, DashboardError> {
        debug!("POST {path}");
        let mut request = self.client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let resp = request.send().await?;
        check_status(resp, path).await
    }
}

// ── Backend response types ──────────────────────────────────────────

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Turn non-2xx responses into errors, keeping the backend's message.
async fn check_status(resp: Response, path: &str) -> Result<Response, DashboardError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(DashboardError::Unauthenticated);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });
    Err(DashboardError::Api {
        endpoint: path.to_string(),
        status: status.as_u16(),
        message,
    })
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl FinanceApi for HttpFinanceApi {
    async fn login(&self, email: &str, password: &str) -> Result<User, DashboardError> {
        let resp = self
            .post(LOGIN_PATH, Some(&LoginRequest { email, password }))
            .await?;
        resp.json().await.map_err(|e| {
            DashboardError::Deserialization(format!("Failed to parse login response: {e}"))
        })
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), DashboardError> {
        self.post(
            REGISTER_PATH,
            Some(&RegisterRequest {
                username,
                email,
                password,
            }),
        )
        .await?;
        Ok(())
    }

    async fn logout(&self) -> Result<(), DashboardError> {
        self.post::<()>(LOGOUT_PATH, None).await?;
        Ok(())
    }

    async fn current_user(&self) -> Result<User, DashboardError> {
        self.get_json(CURRENT_USER_PATH).await
    }

    async fn summary(&self) -> Result<AnalyticsSummary, DashboardError> {
        self.get_json(SUMMARY_PATH).await
    }

    async fn transactions(&self) -> Result<Vec<Transaction>, DashboardError> {
        let wire: Vec<WireTransaction> = self.get_json(TRANSACTIONS_PATH).await?;
        wire.into_iter().map(Transaction::try_from).collect()
    }

    async fn monthly(&self) -> Result<MonthlySeries, DashboardError> {
        self.get_json(MONTHLY_PATH).await
    }

    async fn trends(&self) -> Result<TrendAnalytics, DashboardError> {
        self.get_json(TRENDS_PATH).await
    }

    async fn cashflow(&self) -> Result<Vec<CashflowPoint>, DashboardError> {
        let wire: Vec<WireCashflowPoint> = self.get_json(CASHFLOW_PATH).await?;
        let mut points = wire
            .into_iter()
            .map(CashflowPoint::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        points.sort_by_key(|p| p.date);
        Ok(points)
    }

    async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<(), DashboardError> {
        self.post(TRANSACTIONS_PATH, Some(transaction)).await?;
        Ok(())
    }
}
