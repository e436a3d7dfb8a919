use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::DashboardError;

/// Direction of money flow for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

impl TransactionKind {
    /// Parse the backend's lowercase type tag (`"income"` / `"expense"`).
    pub fn parse(tag: &str) -> Result<Self, DashboardError> {
        match tag.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(DashboardError::ValidationError(format!(
                "Unknown transaction type '{other}': expected 'income' or 'expense'"
            ))),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

/// A single transaction in its canonical client-side shape.
///
/// `amount` is always a non-negative magnitude; the direction lives in `kind`.
/// Both backend shapes (type tag + positive amount, or bare signed amount)
/// are converted into this one at the API boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub description: String,
}

impl Transaction {
    /// Amount with sign applied: positive for income, negative for expense.
    #[must_use]
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

// ── Wire shape ──────────────────────────────────────────────────────

/// Transaction exactly as the backend serializes it.
///
/// Some endpoints send `type` with a positive `amount`; others omit `type`
/// and encode the direction in the sign of `amount`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireTransaction {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: String,
}

impl TryFrom<WireTransaction> for Transaction {
    type Error = DashboardError;

    fn try_from(wire: WireTransaction) -> Result<Self, Self::Error> {
        if !wire.amount.is_finite() {
            return Err(DashboardError::Deserialization(format!(
                "Transaction {} has a non-finite amount",
                wire.id
            )));
        }

        let kind = match wire.kind.as_deref() {
            Some(tag) => TransactionKind::parse(tag)
                .map_err(|e| DashboardError::Deserialization(e.to_string()))?,
            None if wire.amount < 0.0 => TransactionKind::Expense,
            None => TransactionKind::Income,
        };

        Ok(Transaction {
            id: wire.id,
            date: parse_wire_date(&wire.date)?,
            kind,
            amount: wire.amount.abs(),
            category: wire.category,
            description: wire.description.unwrap_or_default(),
        })
    }
}

/// Accepts `YYYY-MM-DD` and full ISO timestamps (only the date part is kept).
pub(crate) fn parse_wire_date(raw: &str) -> Result<NaiveDate, DashboardError> {
    let day = raw.trim().get(..10).unwrap_or(raw.trim());
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| {
        DashboardError::Deserialization(format!("Invalid date '{raw}': {e}"))
    })
}

// ── Mutation body ───────────────────────────────────────────────────

/// Body of `POST /api/transactions`. Only built from a validated form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub description: String,
}
