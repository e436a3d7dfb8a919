pub mod api;
pub mod errors;
pub mod models;
pub mod services;

use chrono::NaiveDate;
use api::http::HttpFinanceApi;
use api::traits::FinanceApi;
use models::{
    forms::{LoginForm, RegisterForm, TransactionForm},
    notification::{Notification, Notifications},
    route::Route,
    settings::Settings,
    snapshot::DashboardSnapshot,
    transaction::NewTransaction,
    user::User,
    view::DashboardView,
};
use services::{
    aggregator::DataAggregator,
    auth_service::AuthService,
    chart_registry::{ChartSurface, HeadlessSurface},
    renderer::Renderer,
    transaction_service::TransactionService,
};
use tracing::{info, warn};
use uuid::Uuid;

use errors::DashboardError;

const LOGIN_OK: &str = "Login successful!";
const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
const REGISTER_OK: &str = "Registration successful! Please log in.";
const REGISTER_FAILED: &str = "Registration failed. Please try again.";
const LOGOUT_OK: &str = "Logged out successfully";
const LOGOUT_FAILED: &str = "Logout failed";
const LOAD_FAILED: &str = "Failed to load dashboard data";
const TRANSACTION_OK: &str = "Transaction added successfully";

/// Main entry point for the Finance Dashboard core library.
///
/// Drives the whole presentation flow: session check, aggregation,
/// rendering, the add-transaction mutation, auth screens and notifications.
/// Every operation takes `&mut self`, so results of a request can only land
/// in the dashboard that issued it.
#[must_use]
pub struct FinanceDashboard {
    api: Box<dyn FinanceApi>,
    settings: Settings,
    aggregator: DataAggregator,
    renderer: Renderer,
    auth_service: AuthService,
    transaction_service: TransactionService,
    snapshot: Option<DashboardSnapshot>,
    view: Option<DashboardView>,
    transaction_form: TransactionForm,
    notifications: Notifications,
    route: Route,
}

impl std::fmt::Debug for FinanceDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceDashboard")
            .field("route", &self.route)
            .field("settings", &self.settings)
            .field("has_snapshot", &self.snapshot.is_some())
            .field("live_charts", &self.renderer.registry().live_count())
            .field("notifications", &self.notifications.len())
            .finish()
    }
}

impl FinanceDashboard {
    /// Build a dashboard on top of any backend client and drawing surface.
    pub fn new(
        api: Box<dyn FinanceApi>,
        settings: Settings,
        surface: Box<dyn ChartSurface>,
    ) -> Result<Self, DashboardError> {
        settings.validate()?;
        let renderer = Renderer::new(
            &settings.default_currency,
            settings.recent_transactions_limit,
            surface,
        );

        Ok(Self {
            api,
            settings,
            aggregator: DataAggregator::new(),
            renderer,
            auth_service: AuthService::new(),
            transaction_service: TransactionService::new(),
            snapshot: None,
            view: None,
            transaction_form: TransactionForm::new(today()),
            notifications: Notifications::new(),
            route: Route::Home,
        })
    }

    /// Build a dashboard talking HTTP to `settings.base_url`, with charts
    /// kept as specs only (no drawing surface attached).
    pub fn connect(settings: Settings) -> Result<Self, DashboardError> {
        let api = HttpFinanceApi::new(&settings)?;
        Self::new(Box::new(api), settings, Box::new(HeadlessSurface::new()))
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Resolve the entry point: Dashboard if the session is valid, Login otherwise.
    pub async fn open(&mut self) -> Route {
        self.navigate(Route::Home).await
    }

    /// Go to `route`. Home and Dashboard run a full refresh, which falls
    /// back to Login when the session check fails.
    pub async fn navigate(&mut self, route: Route) -> Route {
        match route {
            Route::Home | Route::Dashboard => {
                // The error is already turned into a notification + redirect.
                let _ = self.refresh().await;
            }
            Route::Login | Route::Register => self.route = route,
        }
        self.route
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    // ── Dashboard ───────────────────────────────────────────────────

    /// Re-fetch everything and repaint the whole dashboard.
    ///
    /// A failed session check drops the current snapshot, releases every
    /// chart and redirects to Login. Failures of individual resources only
    /// mark their panel unavailable.
    pub async fn refresh(&mut self) -> Result<(), DashboardError> {
        match self.aggregator.load_dashboard(self.api.as_ref()).await {
            Ok(snapshot) => {
                let view = self.renderer.render(&snapshot);
                let failed = snapshot.failed_count();
                if failed > 0 {
                    self.notifications.error(format!(
                        "Some dashboard data could not be loaded ({failed} of 5 sections)"
                    ));
                }
                self.snapshot = Some(snapshot);
                self.view = Some(view);
                self.route = Route::Dashboard;
                Ok(())
            }
            Err(e) => {
                self.drop_session_state();
                self.notifications.error(LOAD_FAILED);
                self.route = Route::Login;
                Err(e)
            }
        }
    }

    /// Most recent rendered dashboard, if a session is loaded.
    #[must_use]
    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    /// Data behind the current view.
    #[must_use]
    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.snapshot.as_ref()
    }

    /// Number of chart instances currently alive on the surface.
    #[must_use]
    pub fn live_chart_count(&self) -> usize {
        self.renderer.registry().live_count()
    }

    // ── Add transaction ─────────────────────────────────────────────

    #[must_use]
    pub fn transaction_form(&self) -> &TransactionForm {
        &self.transaction_form
    }

    pub fn transaction_form_mut(&mut self) -> &mut TransactionForm {
        &mut self.transaction_form
    }

    /// Submit the transaction form.
    ///
    /// Only when the backend accepts the transaction is the form reset and
    /// the transaction list, summary cards and category pie refreshed.
    /// Otherwise the form keeps what was typed and an error is shown.
    pub async fn submit_transaction(&mut self) -> Result<NewTransaction, DashboardError> {
        let Some(previous) = self.snapshot.as_ref() else {
            self.route = Route::Login;
            return Err(DashboardError::Unauthenticated);
        };

        match self
            .transaction_service
            .submit(self.api.as_ref(), &self.transaction_form)
            .await
        {
            Ok(created) => {
                let snapshot = self
                    .aggregator
                    .refresh_after_mutation(self.api.as_ref(), previous)
                    .await;
                if let Some(view) = self.view.as_mut() {
                    self.renderer.repaint_after_mutation(&snapshot, view);
                }
                self.snapshot = Some(snapshot);
                self.transaction_form.reset(today());
                self.notifications.success(TRANSACTION_OK);
                Ok(created)
            }
            Err(e) => {
                self.notifications
                    .error(format!("Could not add transaction: {e}"));
                if e.is_unauthenticated() {
                    self.drop_session_state();
                    self.route = Route::Login;
                }
                Err(e)
            }
        }
    }

    // ── Auth ────────────────────────────────────────────────────────

    /// Log in, then load the dashboard.
    ///
    /// A failed login clears whatever dashboard was loaded before. If the
    /// login succeeds but the dashboard cannot be loaded, the new session is
    /// logged out again.
    pub async fn login(&mut self, form: &LoginForm) -> Result<User, DashboardError> {
        match self.auth_service.login(self.api.as_ref(), form).await {
            Ok(user) => {
                self.notifications.success(LOGIN_OK);
                if let Err(e) = self.refresh().await {
                    // Don't leave an open backend session behind the Login screen.
                    if let Err(logout_err) = self.auth_service.logout(self.api.as_ref()).await {
                        warn!("Closing session after failed load: {logout_err}");
                    }
                    return Err(e);
                }
                Ok(user)
            }
            Err(e) => {
                self.drop_session_state();
                self.notifications.error(failure_message(&e, LOGIN_FAILED));
                self.route = Route::Login;
                Err(e)
            }
        }
    }

    /// Create an account and go to Login on success.
    pub async fn register(&mut self, form: &RegisterForm) -> Result<(), DashboardError> {
        match self.auth_service.register(self.api.as_ref(), form).await {
            Ok(()) => {
                self.notifications.success(REGISTER_OK);
                self.route = Route::Login;
                Ok(())
            }
            Err(e) => {
                self.notifications.error(failure_message(&e, REGISTER_FAILED));
                self.route = Route::Register;
                Err(e)
            }
        }
    }

    /// Close the session, release every chart and go to Login.
    pub async fn logout(&mut self) -> Result<(), DashboardError> {
        match self.auth_service.logout(self.api.as_ref()).await {
            Ok(()) => {
                self.drop_session_state();
                self.notifications.success(LOGOUT_OK);
                self.route = Route::Login;
                Ok(())
            }
            Err(e) => {
                self.notifications.error(LOGOUT_FAILED);
                Err(e)
            }
        }
    }

    // ── Notifications ───────────────────────────────────────────────

    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        self.notifications.as_slice()
    }

    /// Dismiss one notification. Returns `false` if it was already gone.
    pub fn dismiss_notification(&mut self, id: Uuid) -> bool {
        self.notifications.dismiss(id)
    }

    /// Take every pending notification (e.g., to print them once).
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Change the display currency and repaint the current snapshot with it.
    pub fn set_default_currency(&mut self, currency: &str) -> Result<(), DashboardError> {
        self.settings.set_default_currency(currency)?;
        self.renderer.set_currency(&self.settings.default_currency);
        if let Some(snapshot) = &self.snapshot {
            self.view = Some(self.renderer.render(snapshot));
        }
        Ok(())
    }

    // ── Internal ────────────────────────────────────────────────────

    fn drop_session_state(&mut self) {
        if self.snapshot.is_some() {
            info!("Dropping dashboard state");
        }
        self.renderer.release_all();
        self.snapshot = None;
        self.view = None;
    }
}

/// Validation problems are shown verbatim; anything else gets the generic text.
fn failure_message(error: &DashboardError, generic: &str) -> String {
    match error {
        DashboardError::ValidationError(message) => message.clone(),
        _ => generic.to_string(),
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
