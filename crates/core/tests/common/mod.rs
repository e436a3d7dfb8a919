// ═══════════════════════════════════════════════════════════════════
// Shared test doubles: in-memory backend and recording chart surface
// ═══════════════════════════════════════════════════════════════════

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use finance_dashboard_core::api::traits::FinanceApi;
use finance_dashboard_core::errors::DashboardError;
use finance_dashboard_core::models::analytics::{
    AnalyticsSummary, CashflowPoint, MonthlySeries, MonthlyTotals, TrendAnalytics,
};
use finance_dashboard_core::models::chart::{ChartHandle, ChartSlot, ChartSpec};
use finance_dashboard_core::models::transaction::{NewTransaction, Transaction, TransactionKind};
use finance_dashboard_core::models::user::User;
use finance_dashboard_core::services::chart_registry::ChartSurface;

pub const PASSWORD: &str = "secret123";

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn user() -> User {
    User {
        id: 1,
        username: "ann".into(),
        email: "ann@example.com".into(),
    }
}

pub fn tx(id: i64, date: NaiveDate, kind: TransactionKind, amount: f64, category: &str) -> Transaction {
    Transaction {
        id,
        date,
        kind,
        amount,
        category: category.into(),
        description: format!("tx {id}"),
    }
}

pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        tx(1, d(2025, 1, 3), TransactionKind::Income, 3000.0, "Salary"),
        tx(2, d(2025, 1, 5), TransactionKind::Expense, 120.5, "Food"),
        tx(3, d(2025, 2, 1), TransactionKind::Expense, 40.0, "Transport"),
    ]
}

pub fn sample_summary() -> AnalyticsSummary {
    let mut category_expenses = BTreeMap::new();
    category_expenses.insert("Food".to_string(), 120.5);
    category_expenses.insert("Transport".to_string(), 40.0);
    AnalyticsSummary {
        total_income: 3000.0,
        total_expenses: 160.5,
        total_balance: 2839.5,
        category_expenses,
    }
}

pub fn sample_monthly() -> MonthlySeries {
    let mut map = BTreeMap::new();
    map.insert("2025-02".to_string(), MonthlyTotals { income: 0.0, expense: 40.0 });
    map.insert("2025-01".to_string(), MonthlyTotals { income: 3000.0, expense: 120.5 });
    MonthlySeries(map)
}

pub fn sample_trends() -> TrendAnalytics {
    let mut top = HashMap::new();
    top.insert("Food".to_string(), 120.5);
    top.insert("Transport".to_string(), 40.0);
    TrendAnalytics {
        avg_monthly_income: 3000.0,
        avg_monthly_expense: 80.25,
        top_expense_categories: top,
        income_expense_ratio: Some(3000.0 / 160.5),
    }
}

pub fn sample_cashflow() -> Vec<CashflowPoint> {
    vec![
        CashflowPoint { date: d(2025, 1, 3), cumulative_balance: 3000.0, kind: None, amount: None },
        CashflowPoint { date: d(2025, 1, 5), cumulative_balance: 2879.5, kind: None, amount: None },
        CashflowPoint { date: d(2025, 2, 1), cumulative_balance: 2839.5, kind: None, amount: None },
    ]
}

pub fn server_error(endpoint: &str) -> DashboardError {
    DashboardError::Api {
        endpoint: endpoint.into(),
        status: 500,
        message: "Internal Server Error".into(),
    }
}

/// Backend state. `None` for a resource makes that endpoint fail with HTTP 500.
pub struct MockState {
    pub session: bool,
    pub user: User,
    pub summary: Option<AnalyticsSummary>,
    pub transactions: Option<Vec<Transaction>>,
    pub monthly: Option<MonthlySeries>,
    pub trends: Option<TrendAnalytics>,
    pub cashflow: Option<Vec<CashflowPoint>>,
    /// Makes the session check fail with this error even with a live session.
    pub current_user_error: Option<fn() -> DashboardError>,
    pub reject_create: bool,
    pub logout_fails: bool,
    pub created: Vec<NewTransaction>,
    pub registered: Vec<String>,
    pub calls: Vec<&'static str>,
}

impl MockState {
    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            session: true,
            user: user(),
            summary: Some(sample_summary()),
            transactions: Some(sample_transactions()),
            monthly: Some(sample_monthly()),
            trends: Some(sample_trends()),
            cashflow: Some(sample_cashflow()),
            current_user_error: None,
            reject_create: false,
            logout_fails: false,
            created: Vec::new(),
            registered: Vec::new(),
            calls: Vec::new(),
        }
    }
}

/// In-memory backend. Clones share the same state.
#[derive(Clone, Default)]
pub struct MockApi {
    pub state: Arc<Mutex<MockState>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(f: impl FnOnce(&mut MockState)) -> Self {
        let api = Self::new();
        f(&mut api.state.lock().unwrap());
        api
    }

    fn guarded<T>(
        &self,
        call: &'static str,
        pick: impl FnOnce(&MockState) -> Option<T>,
    ) -> Result<T, DashboardError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if !state.session {
            return Err(DashboardError::Unauthenticated);
        }
        pick(&state).ok_or_else(|| server_error(call))
    }
}

#[async_trait]
impl FinanceApi for MockApi {
    async fn login(&self, email: &str, password: &str) -> Result<User, DashboardError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("login");
        if email == state.user.email && password == PASSWORD {
            state.session = true;
            Ok(state.user.clone())
        } else {
            Err(DashboardError::Unauthenticated)
        }
    }

    async fn register(&self, username: &str, email: &str, _password: &str) -> Result<(), DashboardError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("register");
        if email == state.user.email {
            return Err(DashboardError::Api {
                endpoint: "/api/register".into(),
                status: 400,
                message: "Email already registered".into(),
            });
        }
        state.registered.push(username.to_string());
        Ok(())
    }

    async fn logout(&self) -> Result<(), DashboardError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("logout");
        if state.logout_fails {
            return Err(server_error("logout"));
        }
        state.session = false;
        Ok(())
    }

    async fn current_user(&self) -> Result<User, DashboardError> {
        {
            let mut state = self.state.lock().unwrap();
            if let Some(error) = state.current_user_error {
                state.calls.push("current_user");
                return Err(error());
            }
        }
        self.guarded("current_user", |s| Some(s.user.clone()))
    }

    async fn summary(&self) -> Result<AnalyticsSummary, DashboardError> {
        self.guarded("summary", |s| s.summary.clone())
    }

    async fn transactions(&self) -> Result<Vec<Transaction>, DashboardError> {
        self.guarded("transactions", |s| s.transactions.clone())
    }

    async fn monthly(&self) -> Result<MonthlySeries, DashboardError> {
        self.guarded("monthly", |s| s.monthly.clone())
    }

    async fn trends(&self) -> Result<TrendAnalytics, DashboardError> {
        self.guarded("trends", |s| s.trends.clone())
    }

    async fn cashflow(&self) -> Result<Vec<CashflowPoint>, DashboardError> {
        self.guarded("cashflow", |s| s.cashflow.clone())
    }

    async fn create_transaction(&self, new: &NewTransaction) -> Result<(), DashboardError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("create_transaction");
        if !state.session {
            return Err(DashboardError::Unauthenticated);
        }
        if state.reject_create {
            return Err(DashboardError::Api {
                endpoint: "/api/transactions".into(),
                status: 400,
                message: "rejected".into(),
            });
        }
        state.created.push(new.clone());

        // Behave like the backend: the new row shows up in the list and totals.
        let next_id = state.transactions.as_ref().map_or(1, |t| t.len() as i64 + 1);
        if let Some(list) = state.transactions.as_mut() {
            list.insert(0, Transaction {
                id: next_id,
                date: new.date,
                kind: new.kind,
                amount: new.amount,
                category: new.category.clone(),
                description: new.description.clone(),
            });
        }
        if let Some(summary) = state.summary.as_mut() {
            match new.kind {
                TransactionKind::Income => summary.total_income += new.amount,
                TransactionKind::Expense => {
                    summary.total_expenses += new.amount;
                    *summary.category_expenses.entry(new.category.clone()).or_insert(0.0) += new.amount;
                }
            }
            summary.total_balance = summary.total_income - summary.total_expenses;
        }
        Ok(())
    }
}

/// What a `RecordingSurface` has seen.
#[derive(Debug, Default)]
pub struct SurfaceLog {
    pub next_id: u64,
    pub live: HashMap<ChartHandle, (ChartSlot, ChartSpec)>,
    pub created: usize,
    pub destroyed: usize,
    /// `destroy` calls for handles that were not alive.
    pub bogus_destroys: usize,
}

impl SurfaceLog {
    pub fn live_in(&self, slot: ChartSlot) -> usize {
        self.live.values().filter(|(s, _)| *s == slot).count()
    }
}

/// Chart surface that records every create/destroy. Clones share the log.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    pub log: Arc<Mutex<SurfaceLog>>,
}

impl ChartSurface for RecordingSurface {
    fn create(&mut self, slot: ChartSlot, spec: &ChartSpec) -> ChartHandle {
        let mut log = self.log.lock().unwrap();
        log.next_id += 1;
        log.created += 1;
        let handle = ChartHandle(log.next_id);
        log.live.insert(handle, (slot, spec.clone()));
        handle
    }

    fn destroy(&mut self, handle: ChartHandle) {
        let mut log = self.log.lock().unwrap();
        if log.live.remove(&handle).is_some() {
            log.destroyed += 1;
        } else {
            log.bogus_destroys += 1;
        }
    }
}
