//! Ledger output structures for simulations

use crate::error::{ProjectionError, Result};
use serde::{Deserialize, Serialize};

/// Round to two decimals for emission. Running totals are never rounded.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One month's rounded snapshot of the account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// "<MonthName> <Year>", unique within a ledger
    pub label: String,
    pub year: i32,
    /// Calendar month (1-12)
    pub month: u32,

    pub total_balance: f64,
    pub total_invested: f64,
    pub profit: f64,
    /// Fee charged this month (zero outside quarter ends)
    pub management_fee: f64,
    pub cumulative_fees: f64,
    pub market_change: f64,
    /// Dividend paid this month (zero outside the twelfth month)
    pub dividends: f64,
    pub contribution: f64,
}

/// Named ledger columns, in export order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    TotalBalance,
    TotalInvested,
    Profit,
    ManagementFee,
    CumulativeFees,
    MarketChange,
    Dividends,
    Contribution,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::TotalBalance,
        Column::TotalInvested,
        Column::Profit,
        Column::ManagementFee,
        Column::CumulativeFees,
        Column::MarketChange,
        Column::Dividends,
        Column::Contribution,
    ];

    /// Display name used by tables and charts
    pub fn name(&self) -> &'static str {
        match self {
            Column::TotalBalance => "Total balance",
            Column::TotalInvested => "Total invested",
            Column::Profit => "Profit",
            Column::ManagementFee => "Management fee",
            Column::CumulativeFees => "Cumulative management fees",
            Column::MarketChange => "Market change",
            Column::Dividends => "Dividends paid",
            Column::Contribution => "Contribution added",
        }
    }

    /// Field-style key, matching the serialized record
    pub fn key(&self) -> &'static str {
        match self {
            Column::TotalBalance => "total_balance",
            Column::TotalInvested => "total_invested",
            Column::Profit => "profit",
            Column::ManagementFee => "management_fee",
            Column::CumulativeFees => "cumulative_fees",
            Column::MarketChange => "market_change",
            Column::Dividends => "dividends",
            Column::Contribution => "contribution",
        }
    }

    /// Look up a column by display name (case-insensitive) or key
    pub fn from_name(name: &str) -> Option<Column> {
        let name = name.trim();
        Column::ALL
            .into_iter()
            .find(|c| c.key() == name || c.name().eq_ignore_ascii_case(name))
    }

    pub fn value(&self, record: &MonthlyRecord) -> f64 {
        match self {
            Column::TotalBalance => record.total_balance,
            Column::TotalInvested => record.total_invested,
            Column::Profit => record.profit,
            Column::ManagementFee => record.management_fee,
            Column::CumulativeFees => record.cumulative_fees,
            Column::MarketChange => record.market_change,
            Column::Dividends => record.dividends,
            Column::Contribution => record.contribution,
        }
    }
}

impl std::str::FromStr for Column {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self> {
        Column::from_name(s).ok_or_else(|| ProjectionError::unknown_column(s))
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered monthly records produced by one simulation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    records: Vec<MonthlyRecord>,
    /// Unrounded run totals that are not ledger columns
    total_dividends: f64,
    total_market_change: f64,
}

impl Ledger {
    pub(crate) fn with_capacity(months: usize) -> Self {
        Self {
            records: Vec::with_capacity(months),
            total_dividends: 0.0,
            total_market_change: 0.0,
        }
    }

    pub(crate) fn push(&mut self, record: MonthlyRecord) {
        self.records.push(record);
    }

    pub(crate) fn set_run_totals(&mut self, total_dividends: f64, total_market_change: f64) {
        self.total_dividends = total_dividends;
        self.total_market_change = total_market_change;
    }

    pub fn records(&self) -> &[MonthlyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MonthlyRecord> {
        self.records.get(index)
    }

    pub fn last(&self) -> Option<&MonthlyRecord> {
        self.records.last()
    }

    /// Trailing twelve records (or fewer for a shorter ledger)
    pub fn last_year(&self) -> &[MonthlyRecord] {
        let start = self.records.len().saturating_sub(12);
        &self.records[start..]
    }

    pub fn labels(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.label.as_str()).collect()
    }

    /// Values of one column, addressed by display name or key
    pub fn column(&self, name: &str) -> Result<Vec<f64>> {
        let column: Column = name.parse()?;
        Ok(self.series(column))
    }

    pub fn series(&self, column: Column) -> Vec<f64> {
        self.records.iter().map(|r| column.value(r)).collect()
    }

    /// Year taken from the last token of the label at `index`
    pub fn year_at(&self, index: usize) -> Option<i32> {
        self.records
            .get(index)
            .and_then(|r| r.label.split_whitespace().last())
            .and_then(|year| year.parse().ok())
    }

    /// One axis tick per simulated year: every 12th label starting at 0
    pub fn yearly_ticks(&self) -> Vec<(usize, &str)> {
        self.records
            .iter()
            .enumerate()
            .step_by(12)
            .map(|(i, r)| (i, r.label.as_str()))
            .collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> LedgerSummary {
        let last = self.records.last();

        LedgerSummary {
            total_months: self.records.len() as u32,
            final_balance: last.map(|r| r.total_balance).unwrap_or(0.0),
            total_invested: last.map(|r| r.total_invested).unwrap_or(0.0),
            profit: last.map(|r| r.profit).unwrap_or(0.0),
            total_fees: last.map(|r| r.cumulative_fees).unwrap_or(0.0),
            total_dividends: round_cents(self.total_dividends),
            total_market_change: round_cents(self.total_market_change),
        }
    }
}

/// Summary statistics for a ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_months: u32,
    pub final_balance: f64,
    pub total_invested: f64,
    pub profit: f64,
    pub total_fees: f64,
    pub total_dividends: f64,
    pub total_market_change: f64,
}
