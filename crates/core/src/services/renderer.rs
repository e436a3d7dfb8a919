use std::collections::BTreeMap;

use tracing::debug;

use crate::models::analytics::{AnalyticsSummary, CashflowPoint, MonthlySeries, TrendAnalytics};
use crate::models::chart::{ChartDataset, ChartKind, ChartSlot, ChartSpec};
use crate::models::snapshot::{DashboardSnapshot, Fetched};
use crate::models::transaction::Transaction;
use crate::models::view::{
    CardKind, DashboardView, Panel, SummaryCard, TransactionRow, TransactionsPanel, TrendsView,
};
use crate::services::chart_registry::{ChartRegistry, ChartSurface};
use crate::services::currency_service::CurrencyService;

/// Pie slice colours, cycled when there are more categories than colours.
const PIE_PALETTE: [&str; 6] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40",
];
const INCOME_COLOR: &str = "rgba(75, 192, 192, 0.6)";
const EXPENSE_COLOR: &str = "rgba(255, 99, 132, 0.6)";
const BALANCE_COLOR: &str = "rgb(75, 192, 192)";

/// How many categories the trends panel lists.
const TOP_CATEGORIES: usize = 5;

const EMPTY_MESSAGE: &str = "No transactions yet. Start tracking your finances!";
const EMPTY_ACTION: &str = "Add First Transaction";

/// Turns a `DashboardSnapshot` into a `DashboardView` and keeps the chart
/// surface in sync with it.
///
/// Output is a pure function of the snapshot; the only state is the chart
/// registry, which holds at most one live instance per slot.
pub struct Renderer {
    currency_service: CurrencyService,
    registry: ChartRegistry,
    recent_limit: usize,
}

impl Renderer {
    pub fn new(currency: &str, recent_limit: usize, surface: Box<dyn ChartSurface>) -> Self {
        Self {
            currency_service: CurrencyService::new(currency),
            registry: ChartRegistry::new(surface),
            recent_limit,
        }
    }

    pub fn set_currency(&mut self, currency: &str) {
        self.currency_service = CurrencyService::new(currency);
    }

    #[must_use]
    pub fn registry(&self) -> &ChartRegistry {
        &self.registry
    }

    /// Paint the whole dashboard.
    pub fn render(&mut self, snapshot: &DashboardSnapshot) -> DashboardView {
        let mut charts = BTreeMap::new();
        for slot in ChartSlot::ALL {
            let panel = self.paint_slot(slot, snapshot);
            charts.insert(slot, panel);
        }

        DashboardView {
            greeting: format!("Welcome, {}!", snapshot.user.username),
            cards: self.cards_panel(&snapshot.summary),
            transactions: self.transactions_panel(&snapshot.transactions),
            trends: match &snapshot.trends {
                Fetched::Ready(trends) => Panel::Ready(self.trends_view(trends)),
                Fetched::Failed(message) => Panel::Unavailable(message.clone()),
            },
            charts,
        }
    }

    /// Repaint only what a new transaction can change: the summary cards,
    /// the transaction table and the category pie. Monthly and cashflow
    /// charts stay as they are.
    pub fn repaint_after_mutation(&mut self, snapshot: &DashboardSnapshot, view: &mut DashboardView) {
        view.cards = self.cards_panel(&snapshot.summary);
        view.transactions = self.transactions_panel(&snapshot.transactions);
        let pie = self.paint_slot(ChartSlot::ExpensesByCategory, snapshot);
        view.charts.insert(ChartSlot::ExpensesByCategory, pie);
    }

    /// Destroy every live chart.
    pub fn release_all(&mut self) {
        self.registry.release_all();
    }

    // ── Summary cards ───────────────────────────────────────────────

    /// Balance, income, expenses and net trend (income − expenses).
    #[must_use]
    pub fn summary_cards(&self, summary: &AnalyticsSummary) -> Vec<SummaryCard> {
        [
            (CardKind::Balance, summary.total_balance),
            (CardKind::Income, summary.total_income),
            (CardKind::Expenses, summary.total_expenses),
            (CardKind::NetTrend, summary.net_trend()),
        ]
        .into_iter()
        .map(|(kind, value)| SummaryCard {
            kind,
            label: kind.label().to_string(),
            value,
            formatted: self.currency_service.format(value),
        })
        .collect()
    }

    fn cards_panel(&self, summary: &Fetched<AnalyticsSummary>) -> Panel<Vec<SummaryCard>> {
        match summary {
            Fetched::Ready(summary) => Panel::Ready(self.summary_cards(summary)),
            Fetched::Failed(message) => Panel::Unavailable(message.clone()),
        }
    }

    // ── Recent transactions ─────────────────────────────────────────

    /// Newest first (stable for equal dates), truncated to the row limit.
    /// An empty list yields the call-to-action instead of a table.
    #[must_use]
    pub fn recent_transactions(&self, transactions: &[Transaction]) -> TransactionsPanel {
        if transactions.is_empty() {
            return TransactionsPanel::Empty {
                message: EMPTY_MESSAGE.to_string(),
                action_label: EMPTY_ACTION.to_string(),
            };
        }

        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));

        let rows = sorted
            .into_iter()
            .take(self.recent_limit)
            .map(|t| TransactionRow {
                id: t.id,
                date: t.date,
                description: t.description.clone(),
                category: t.category.clone(),
                kind: t.kind,
                amount: t.signed_amount(),
                formatted_amount: self.currency_service.format(t.signed_amount()),
            })
            .collect();
        TransactionsPanel::Table(rows)
    }

    fn transactions_panel(&self, transactions: &Fetched<Vec<Transaction>>) -> TransactionsPanel {
        match transactions {
            Fetched::Ready(list) => self.recent_transactions(list),
            Fetched::Failed(message) => TransactionsPanel::Unavailable(message.clone()),
        }
    }

    // ── Trends ──────────────────────────────────────────────────────

    #[must_use]
    pub fn trends_view(&self, trends: &TrendAnalytics) -> TrendsView {
        let mut top: Vec<(&String, &f64)> = trends.top_expense_categories.iter().collect();
        top.sort_by(|a, b| {
            b.1.partial_cmp(a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });

        TrendsView {
            avg_monthly_income: self.currency_service.format(trends.avg_monthly_income),
            avg_monthly_expense: self.currency_service.format(trends.avg_monthly_expense),
            top_expense_categories: top
                .into_iter()
                .take(TOP_CATEGORIES)
                .map(|(category, amount)| (category.clone(), self.currency_service.format(*amount)))
                .collect(),
            income_expense_ratio: trends
                .income_expense_ratio
                .map(|r| self.currency_service.format_ratio(r))
                .unwrap_or_else(|| "—".to_string()),
        }
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// One slice per expense category.
    #[must_use]
    pub fn expense_pie(summary: &AnalyticsSummary) -> ChartSpec {
        let labels: Vec<String> = summary.category_expenses.keys().cloned().collect();
        let data: Vec<f64> = summary.category_expenses.values().copied().collect();
        let colors = (0..data.len())
            .map(|i| PIE_PALETTE[i % PIE_PALETTE.len()].to_string())
            .collect();

        ChartSpec {
            kind: ChartKind::Pie,
            title: ChartSlot::ExpensesByCategory.title().to_string(),
            labels,
            datasets: vec![ChartDataset {
                label: "Expenses".to_string(),
                data,
                colors,
            }],
        }
    }

    /// Income and expense bars side by side, oldest month first.
    #[must_use]
    pub fn monthly_bars(series: &MonthlySeries) -> ChartSpec {
        let labels = series.periods().map(|(label, _)| label.clone()).collect();
        let income = series.periods().map(|(_, t)| t.income).collect();
        let expense = series.periods().map(|(_, t)| t.expense).collect();

        ChartSpec {
            kind: ChartKind::Bar,
            title: ChartSlot::MonthlyIncomeExpense.title().to_string(),
            labels,
            datasets: vec![
                ChartDataset {
                    label: "Income".to_string(),
                    data: income,
                    colors: vec![INCOME_COLOR.to_string()],
                },
                ChartDataset {
                    label: "Expenses".to_string(),
                    data: expense,
                    colors: vec![EXPENSE_COLOR.to_string()],
                },
            ],
        }
    }

    /// Cumulative balance line over the (date-ascending) cashflow series.
    #[must_use]
    pub fn cashflow_line(points: &[CashflowPoint]) -> ChartSpec {
        ChartSpec {
            kind: ChartKind::Line,
            title: ChartSlot::CumulativeCashflow.title().to_string(),
            labels: points.iter().map(|p| p.date.to_string()).collect(),
            datasets: vec![ChartDataset {
                label: "Cumulative Balance".to_string(),
                data: points.iter().map(|p| p.cumulative_balance).collect(),
                colors: vec![BALANCE_COLOR.to_string()],
            }],
        }
    }

    /// Build the spec for `slot` and bind it, or release the slot if its
    /// data failed to load.
    fn paint_slot(&mut self, slot: ChartSlot, snapshot: &DashboardSnapshot) -> Panel<ChartSpec> {
        let spec = match slot {
            ChartSlot::ExpensesByCategory => map_fetched(&snapshot.summary, Self::expense_pie),
            ChartSlot::MonthlyIncomeExpense => map_fetched(&snapshot.monthly, Self::monthly_bars),
            ChartSlot::CumulativeCashflow => {
                map_fetched(&snapshot.cashflow, |points| Self::cashflow_line(points))
            }
        };

        match spec {
            Ok(spec) => {
                let handle = self.registry.replace(slot, &spec);
                debug!("Chart '{slot}' bound to {handle:?}");
                Panel::Ready(spec)
            }
            Err(message) => {
                self.registry.release(slot);
                Panel::Unavailable(message)
            }
        }
    }
}

fn map_fetched<T, U>(fetched: &Fetched<T>, f: impl FnOnce(&T) -> U) -> Result<U, String> {
    match fetched {
        Fetched::Ready(value) => Ok(f(value)),
        Fetched::Failed(message) => Err(message.clone()),
    }
}
