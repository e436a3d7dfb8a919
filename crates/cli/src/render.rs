//! Plain-text rendering of a `DashboardView`.

use std::fmt::Write;

use finance_dashboard_core::models::chart::{ChartKind, ChartSlot, ChartSpec};
use finance_dashboard_core::models::notification::{Notification, NotificationLevel};
use finance_dashboard_core::models::view::{
    DashboardView, Panel, SummaryCard, TransactionsPanel, TrendsView,
};
use finance_dashboard_core::services::currency_service::CurrencyService;

const RULE: &str = "────────────────────────────────────────────────────────────";

/// Width of the longest bar in bar and pie charts.
const BAR_WIDTH: f64 = 30.0;

pub struct TextRenderer {
    money: CurrencyService,
}

impl TextRenderer {
    pub fn new(currency: &str) -> Self {
        Self {
            money: CurrencyService::new(currency),
        }
    }

    pub fn dashboard(&self, view: &DashboardView) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}\n{RULE}", view.greeting);

        section(&mut out, "Summary");
        match &view.cards {
            Panel::Ready(cards) => cards.iter().for_each(|c| card(&mut out, c)),
            Panel::Unavailable(reason) => unavailable(&mut out, reason),
        }

        section(&mut out, "Recent Transactions");
        self.transactions(&mut out, &view.transactions);

        section(&mut out, "Trends");
        match &view.trends {
            Panel::Ready(trends) => trends_panel(&mut out, trends),
            Panel::Unavailable(reason) => unavailable(&mut out, reason),
        }

        for slot in ChartSlot::ALL {
            section(&mut out, slot.title());
            match view.charts.get(&slot) {
                Some(Panel::Ready(spec)) => self.chart(&mut out, spec),
                Some(Panel::Unavailable(reason)) => unavailable(&mut out, reason),
                None => unavailable(&mut out, "not loaded"),
            }
        }
        out
    }

    fn transactions(&self, out: &mut String, panel: &TransactionsPanel) {
        match panel {
            TransactionsPanel::Table(rows) => {
                let _ = writeln!(
                    out,
                    "  {:<10}  {:<24}  {:<14}  {:<7}  {:>14}",
                    "Date", "Description", "Category", "Type", "Amount"
                );
                for row in rows {
                    let _ = writeln!(
                        out,
                        "  {:<10}  {:<24}  {:<14}  {:<7}  {:>14}",
                        row.date.to_string(),
                        truncate(&row.description, 24),
                        truncate(&row.category, 14),
                        row.kind.to_string(),
                        row.formatted_amount
                    );
                }
            }
            TransactionsPanel::Empty {
                message,
                action_label,
            } => {
                let _ = writeln!(out, "  {message}");
                let _ = writeln!(out, "  [{action_label}]  finance-dashboard add --help");
            }
            TransactionsPanel::Unavailable(reason) => unavailable(out, reason),
        }
    }

    fn chart(&self, out: &mut String, spec: &ChartSpec) {
        match spec.kind {
            ChartKind::Pie => {
                let total = spec.total();
                let Some(dataset) = spec.datasets.first() else { return };
                for (label, value) in spec.labels.iter().zip(&dataset.data) {
                    let share = if total > 0.0 { value / total } else { 0.0 };
                    let _ = writeln!(
                        out,
                        "  {:<16} {:<30} {:>5.1}%  {}",
                        truncate(label, 16),
                        bar(share),
                        share * 100.0,
                        self.money.format(*value)
                    );
                }
            }
            ChartKind::Bar => {
                let max = spec
                    .datasets
                    .iter()
                    .flat_map(|d| d.data.iter().copied())
                    .fold(0.0_f64, f64::max);
                for (i, label) in spec.labels.iter().enumerate() {
                    let _ = writeln!(out, "  {label}");
                    for dataset in &spec.datasets {
                        let value = dataset.data.get(i).copied().unwrap_or_default();
                        let share = if max > 0.0 { value / max } else { 0.0 };
                        let _ = writeln!(
                            out,
                            "    {:<9} {:<30} {}",
                            dataset.label,
                            bar(share),
                            self.money.format(value)
                        );
                    }
                }
            }
            ChartKind::Line => {
                let Some(dataset) = spec.datasets.first() else { return };
                for (label, value) in spec.labels.iter().zip(&dataset.data) {
                    let _ = writeln!(out, "  {label}  {:>14}", self.money.format(*value));
                }
            }
        }
        if spec.labels.is_empty() {
            let _ = writeln!(out, "  (no data)");
        }
    }
}

pub fn notification(n: &Notification) -> String {
    let icon = match n.level {
        NotificationLevel::Success => "✅",
        NotificationLevel::Info => "ℹ️ ",
        NotificationLevel::Error => "❌",
    };
    format!("{icon} {}", n.message)
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{title}");
}

fn card(out: &mut String, card: &SummaryCard) {
    let _ = writeln!(out, "  {:<16} {:>16}", card.label, card.formatted);
}

fn trends_panel(out: &mut String, trends: &TrendsView) {
    let _ = writeln!(out, "  {:<26} {:>14}", "Avg. monthly income", trends.avg_monthly_income);
    let _ = writeln!(out, "  {:<26} {:>14}", "Avg. monthly expense", trends.avg_monthly_expense);
    let _ = writeln!(out, "  {:<26} {:>14}", "Income/expense ratio", trends.income_expense_ratio);
    if !trends.top_expense_categories.is_empty() {
        let _ = writeln!(out, "  Top expense categories:");
        for (category, amount) in &trends.top_expense_categories {
            let _ = writeln!(out, "    {:<22} {:>14}", truncate(category, 22), amount);
        }
    }
}

fn unavailable(out: &mut String, reason: &str) {
    let _ = writeln!(out, "  (unavailable: {reason})");
}

fn bar(share: f64) -> String {
    let filled = (share.clamp(0.0, 1.0) * BAR_WIDTH).round() as usize;
    "█".repeat(filled)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use finance_dashboard_core::models::analytics::AnalyticsSummary;
    use finance_dashboard_core::models::snapshot::{DashboardSnapshot, Fetched};
    use finance_dashboard_core::models::user::User;
    use finance_dashboard_core::services::chart_registry::HeadlessSurface;
    use finance_dashboard_core::services::renderer::Renderer;

    fn view(transactions: Fetched<Vec<finance_dashboard_core::models::transaction::Transaction>>) -> DashboardView {
        let mut summary = AnalyticsSummary {
            total_income: 3000.0,
            total_expenses: 160.5,
            total_balance: 2839.5,
            ..AnalyticsSummary::default()
        };
        summary.category_expenses.insert("Food".into(), 120.5);
        summary.category_expenses.insert("Transport".into(), 40.0);

        let snapshot = DashboardSnapshot {
            user: User {
                id: 1,
                username: "ann".into(),
                email: "ann@example.com".into(),
            },
            summary: Fetched::Ready(summary),
            transactions,
            monthly: Fetched::Failed("HTTP 500".into()),
            trends: Fetched::Failed("HTTP 500".into()),
            cashflow: Fetched::Ready(vec![]),
            fetched_at: Utc::now(),
        };
        Renderer::new("USD", 5, Box::new(HeadlessSurface::new())).render(&snapshot)
    }

    #[test]
    fn prints_cards_pie_and_unavailable_panels() {
        let text = TextRenderer::new("USD").dashboard(&view(Fetched::Ready(vec![])));
        assert!(text.starts_with("Welcome, ann!"));
        assert!(text.contains("Net Trend"));
        assert!(text.contains("$2,839.50"));
        assert!(text.contains("No transactions yet. Start tracking your finances!"));
        assert!(text.contains("[Add First Transaction]"));
        assert!(text.contains("75.1%"));
        assert!(text.contains("(unavailable: HTTP 500)"));
        assert!(text.contains("(no data)"));
    }

    #[test]
    fn prints_table_rows() {
        use finance_dashboard_core::models::transaction::{Transaction, TransactionKind};
        let list = vec![Transaction {
            id: 1,
            date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            kind: TransactionKind::Expense,
            amount: 120.5,
            category: "Food".into(),
            description: "Groceries".into(),
        }];
        let text = TextRenderer::new("USD").dashboard(&view(Fetched::Ready(list)));
        assert!(text.contains("2025-01-05"));
        assert!(text.contains("-$120.50"));
        assert!(!text.contains("Add First Transaction"));
    }

    #[test]
    fn truncates_long_labels() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }

    #[test]
    fn notification_icons() {
        let n = Notification::new(NotificationLevel::Error, "Logout failed");
        assert_eq!(notification(&n), "❌ Logout failed");
    }
}
