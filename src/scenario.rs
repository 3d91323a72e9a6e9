//! Scenario runner for side-by-side account projections
//!
//! Every account gets its own engine; engines share nothing, so a batch is
//! simulated in parallel and collected back in input order.

use crate::account::AccountConfig;
use crate::error::Result;
use crate::projection::{Column, SimulationConfig, SimulationEngine, DEFAULT_YEARS};
use rayon::prelude::*;
use serde::Serialize;

/// Runs the same horizon for any number of accounts
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(30);
/// let comparison = runner.compare(&default_accounts(2.0), "Total balance")?;
/// println!("{:?}", comparison.snapshot(359));
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    years: u32,
    config: SimulationConfig,
}

impl ScenarioRunner {
    pub fn new(years: u32) -> Self {
        Self::with_config(years, SimulationConfig::default())
    }

    pub fn with_config(years: u32, config: SimulationConfig) -> Self {
        Self { years, config }
    }

    pub fn years(&self) -> u32 {
        self.years
    }

    /// Run a single account
    pub fn run(&self, account: &AccountConfig) -> Result<SimulationEngine> {
        let mut engine = SimulationEngine::with_config(account.clone(), self.config.clone());
        engine.simulate(self.years)?;
        Ok(engine)
    }

    /// Run every account independently, preserving input order
    pub fn run_batch(&self, accounts: &[AccountConfig]) -> Result<Vec<SimulationEngine>> {
        accounts.par_iter().map(|account| self.run(account)).collect()
    }

    /// One column across several accounts, addressed by display name or key
    pub fn compare(&self, accounts: &[AccountConfig], column: &str) -> Result<Comparison> {
        let engines = self.run_batch(accounts)?;
        Ok(Comparison::from_engines(&engines, column))
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(DEFAULT_YEARS)
    }
}

/// A named series of one column for one account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub account: String,
    pub values: Vec<f64>,
}

/// Values of every series at one time index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub label: String,
    pub year: Option<i32>,
    pub values: Vec<(String, f64)>,
}

/// One column compared across accounts over a shared time axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub column: String,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl Comparison {
    /// Build from already simulated engines.
    ///
    /// An account whose ledger has no such column is skipped with a warning.
    /// Labels are taken from the first engine, so all engines must share one
    /// horizon and start year (as engines from one [`ScenarioRunner`] do).
    pub fn from_engines(engines: &[SimulationEngine], column: &str) -> Self {
        let mut series = Vec::with_capacity(engines.len());

        for engine in engines {
            match engine.ledger().column(column) {
                Ok(values) => series.push(Series {
                    account: engine.account().name().to_string(),
                    values,
                }),
                Err(e) => log::warn!("{}: {}", engine.account().name(), e),
            }
        }

        let labels = engines
            .first()
            .map(|e| e.ledger().labels().into_iter().map(String::from).collect())
            .unwrap_or_default();

        let column = Column::from_name(column)
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| column.to_string());

        Self { column, labels, series }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Every series' value at `index`, with the year taken from the label
    pub fn snapshot(&self, index: usize) -> Option<Snapshot> {
        let label = self.labels.get(index)?;
        let year = label.split_whitespace().last().and_then(|y| y.parse().ok());

        let values = self
            .series
            .iter()
            .filter_map(|s| s.values.get(index).map(|v| (s.account.clone(), *v)))
            .collect();

        Some(Snapshot {
            label: label.clone(),
            year,
            values,
        })
    }

    /// Every 12th label, starting at 0
    pub fn yearly_ticks(&self) -> Vec<(usize, &str)> {
        self.labels
            .iter()
            .enumerate()
            .step_by(12)
            .map(|(i, l)| (i, l.as_str()))
            .collect()
    }
}
