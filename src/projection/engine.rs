//! Core simulation engine for monthly account projections

use crate::account::AccountConfig;
use crate::error::{ProjectionError, Result};
use super::ledger::{round_cents, Ledger, MonthlyRecord};
use super::state::AccountState;
use chrono::Month;

/// Calendar year of the first simulated month
pub const DEFAULT_START_YEAR: i32 = 2025;

/// Longest accepted horizon; bounds the ledger allocation
pub const MAX_YEARS: u32 = 1000;

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Year used in the label of the first twelve records
    pub start_year: i32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
        }
    }
}

/// Monthly-equivalent growth factor: the twelfth root of the annual factor
pub fn monthly_growth_factor(annual_growth: f64) -> f64 {
    (1.0 + annual_growth).powf(1.0 / 12.0)
}

/// Simulation engine bound to a single account.
///
/// Each call to [`simulate`](Self::simulate) recomputes from the account's
/// initial deposit and replaces the ledger of any previous run.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    account: AccountConfig,
    config: SimulationConfig,
    ledger: Ledger,
    has_run: bool,
}

impl SimulationEngine {
    /// Create a new engine with the default label epoch
    pub fn new(account: AccountConfig) -> Self {
        Self::with_config(account, SimulationConfig::default())
    }

    pub fn with_config(account: AccountConfig, config: SimulationConfig) -> Self {
        Self {
            account,
            config,
            ledger: Ledger::default(),
            has_run: false,
        }
    }

    pub fn account(&self) -> &AccountConfig {
        &self.account
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Ledger of the last successful run (empty before the first one)
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn has_run(&self) -> bool {
        self.has_run
    }

    /// Simulate `years * 12` months and replace the ledger.
    ///
    /// Fails with [`ProjectionError::InvalidHorizon`] unless `1 <= years <= MAX_YEARS`,
    /// in which case the previous ledger is kept.
    pub fn simulate(&mut self, years: u32) -> Result<()> {
        let months = match years.checked_mul(12) {
            Some(months) if (1..=MAX_YEARS).contains(&years) => months,
            _ => return Err(ProjectionError::InvalidHorizon { years }),
        };

        log::info!(
            "Simulating {} over {} years from {}",
            self.account.name(),
            years,
            self.config.start_year
        );

        let growth_factor = monthly_growth_factor(self.account.market_growth());
        let mut state = AccountState::from_account(&self.account);
        let mut ledger = Ledger::with_capacity(months as usize);

        for _month in 1..=months {
            state.advance_month();

            let record = self.simulate_month(&mut state, growth_factor);
            ledger.push(record);

            if state.is_dividend_month() {
                log::debug!(
                    "{} year {}: balance {:.2}",
                    self.account.name(),
                    state.year,
                    state.total_amount
                );
            }
        }

        ledger.set_run_totals(state.total_dividends, state.total_market_change);
        self.ledger = ledger;
        self.has_run = true;

        if let Some(last) = self.ledger.last() {
            log::info!(
                "{}: final balance {:.2} after {} months",
                self.account.name(),
                last.total_balance,
                self.ledger.len()
            );
        }

        Ok(())
    }

    /// Advance the running totals by one month and emit the rounded snapshot.
    /// Step order is contribution, growth, fee, dividend.
    fn simulate_month(&self, state: &mut AccountState, growth_factor: f64) -> MonthlyRecord {
        let contribution = state.apply_contribution(self.account.monthly_contribution());
        let market_change = state.apply_market_growth(growth_factor);
        let fee = state.charge_management_fee(self.account.management_fee());
        let dividend = state.pay_dividend(self.account.dividend_yield());

        let year = self.config.start_year + state.year as i32 - 1;

        MonthlyRecord {
            label: month_label(state.month_in_year, year),
            year,
            month: state.month_in_year,
            total_balance: round_cents(state.total_amount),
            total_invested: round_cents(state.total_invested),
            profit: round_cents(state.profit()),
            management_fee: round_cents(fee),
            cumulative_fees: round_cents(state.total_fees_cumulative),
            market_change: round_cents(market_change),
            dividends: round_cents(dividend),
            contribution: round_cents(contribution),
        }
    }
}

/// "<MonthName> <Year>" for a 1-based month
pub fn month_label(month: u32, year: i32) -> String {
    let name = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown");
    format!("{} {}", name, year)
}
