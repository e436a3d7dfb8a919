use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::transaction::{parse_wire_date, TransactionKind};
use crate::errors::DashboardError;

/// Aggregate totals computed server-side. Treated as an opaque snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub total_income: f64,

    #[serde(default)]
    pub total_expenses: f64,

    /// The older endpoint names this field `balance`.
    #[serde(default, alias = "balance")]
    pub total_balance: f64,

    /// Category name → summed expense amount. Ordered by category name.
    #[serde(default)]
    pub category_expenses: BTreeMap<String, f64>,
}

impl AnalyticsSummary {
    /// Income minus expenses.
    #[must_use]
    pub fn net_trend(&self) -> f64 {
        self.total_income - self.total_expenses
    }
}

/// Income/expense pair for one calendar period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    #[serde(default)]
    pub income: f64,
    #[serde(default)]
    pub expense: f64,
}

/// Period label (`"YYYY-MM"`) → totals.
///
/// Zero-padded labels sort lexicographically in calendar order, so the
/// `BTreeMap` iterates oldest period first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlySeries(pub BTreeMap<String, MonthlyTotals>);

impl MonthlySeries {
    pub fn periods(&self) -> impl Iterator<Item = (&String, &MonthlyTotals)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Trend figures from `GET /api/analytics/trends`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalytics {
    #[serde(default)]
    pub avg_monthly_income: f64,

    #[serde(default)]
    pub avg_monthly_expense: f64,

    /// Top expense categories (the backend caps this at five).
    #[serde(default)]
    pub top_expense_categories: HashMap<String, f64>,

    /// Total income / total expenses. `None` when the backend sends null.
    #[serde(default)]
    pub income_expense_ratio: Option<f64>,
}

/// One step of the cumulative cashflow series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowPoint {
    pub date: NaiveDate,
    pub cumulative_balance: f64,

    /// The transaction that moved the balance, when the backend includes it.
    #[serde(rename = "type", default)]
    pub kind: Option<TransactionKind>,

    #[serde(default)]
    pub amount: Option<f64>,
}

/// Cashflow point exactly as the backend serializes it.
///
/// `type` is informational only: an unknown tag becomes `None` instead of
/// failing the series.
#[derive(Debug, Clone, Deserialize)]
pub struct WireCashflowPoint {
    pub date: String,
    pub cumulative_balance: f64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
}

impl TryFrom<WireCashflowPoint> for CashflowPoint {
    type Error = DashboardError;

    fn try_from(wire: WireCashflowPoint) -> Result<Self, Self::Error> {
        Ok(CashflowPoint {
            date: parse_wire_date(&wire.date)?,
            cumulative_balance: wire.cumulative_balance,
            kind: wire
                .kind
                .as_deref()
                .and_then(|tag| TransactionKind::parse(tag).ok()),
            amount: wire.amount,
        })
    }
}
