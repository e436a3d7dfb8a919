use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::chart::{ChartSlot, ChartSpec};
use super::transaction::TransactionKind;

/// A dashboard region that either rendered or could not load its data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Panel<T> {
    Ready(T),
    /// The backing fetch failed; carries a message for the inline notice.
    Unavailable(String),
}

impl<T> Panel<T> {
    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(value) => Some(value),
            Panel::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Balance,
    Income,
    Expenses,
    NetTrend,
}

impl CardKind {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            CardKind::Balance => "Total Balance",
            CardKind::Income => "Total Income",
            CardKind::Expenses => "Total Expenses",
            CardKind::NetTrend => "Net Trend",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryCard {
    pub kind: CardKind,
    pub label: String,
    pub value: f64,
    pub formatted: String,
}

/// One row of the recent-transactions table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub kind: TransactionKind,
    /// Signed amount (negative for expenses)
    pub amount: f64,
    pub formatted_amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransactionsPanel {
    Table(Vec<TransactionRow>),
    /// No transactions at all: show a call-to-action instead of a table.
    Empty {
        message: String,
        action_label: String,
    },
    Unavailable(String),
}

impl TransactionsPanel {
    /// Rows shown, or `None` when no table is rendered.
    #[must_use]
    pub fn rows(&self) -> Option<&[TransactionRow]> {
        match self {
            TransactionsPanel::Table(rows) => Some(rows),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendsView {
    pub avg_monthly_income: String,
    pub avg_monthly_expense: String,
    /// (category, formatted amount), largest first
    pub top_expense_categories: Vec<(String, String)>,
    pub income_expense_ratio: String,
}

/// The fully rendered dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub greeting: String,
    pub cards: Panel<Vec<SummaryCard>>,
    pub transactions: TransactionsPanel,
    pub trends: Panel<TrendsView>,
    pub charts: BTreeMap<ChartSlot, Panel<ChartSpec>>,
}

impl DashboardView {
    #[must_use]
    pub fn card(&self, kind: CardKind) -> Option<&SummaryCard> {
        self.cards.ready()?.iter().find(|c| c.kind == kind)
    }

    #[must_use]
    pub fn chart(&self, slot: ChartSlot) -> Option<&ChartSpec> {
        self.charts.get(&slot)?.ready()
    }
}
