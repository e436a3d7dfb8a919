use serde::{Deserialize, Serialize};

/// A named region of the dashboard that shows one chart.
///
/// At most one live chart instance is bound to a slot at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChartSlot {
    /// Pie of expense amounts per category
    ExpensesByCategory,
    /// Grouped bars of income vs. expenses per month
    MonthlyIncomeExpense,
    /// Line of cumulative balance over time
    CumulativeCashflow,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 3] = [
        ChartSlot::ExpensesByCategory,
        ChartSlot::MonthlyIncomeExpense,
        ChartSlot::CumulativeCashflow,
    ];

    /// Title drawn above the chart.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            ChartSlot::ExpensesByCategory => "Expenses by Category",
            ChartSlot::MonthlyIncomeExpense => "Monthly Income and Expenses",
            ChartSlot::CumulativeCashflow => "Cumulative Cashflow Over Time",
        }
    }
}

impl std::fmt::Display for ChartSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Pie,
    Bar,
    Line,
}

/// One series of values. `colors` is per-value for pies, one entry otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub colors: Vec<String>,
}

/// Everything a drawing surface needs to paint a chart.
///
/// The core computes the numbers and the surface only draws them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl ChartSpec {
    /// Sum of all values across every dataset.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.datasets.iter().flat_map(|d| d.data.iter()).sum()
    }
}

/// Identifies a live chart instance created by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChartHandle(pub u64);
