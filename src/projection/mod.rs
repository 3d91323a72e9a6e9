//! Simulation engine and ledger for monthly account projections

mod state;
mod engine;
mod ledger;

pub use state::AccountState;
pub use engine::{
    month_label, monthly_growth_factor, SimulationConfig, SimulationEngine, DEFAULT_START_YEAR,
    MAX_YEARS,
};
pub use ledger::{round_cents, Column, Ledger, LedgerSummary, MonthlyRecord};

/// Horizon used when no number of years is given
pub const DEFAULT_YEARS: u32 = 30;
