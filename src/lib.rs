//! Investment Projection - month-by-month value of an investment account
//!
//! This library provides:
//! - Account configuration and CSV batch loading
//! - A monthly simulation engine with quarterly fees and annual dividends
//! - Ledger access by column name for charting and export
//! - CSV export of ledgers and account parameters
//! - Side-by-side comparison of several accounts

pub mod error;
pub mod account;
pub mod projection;
pub mod export;
pub mod scenario;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use account::AccountConfig;
pub use projection::{Column, Ledger, LedgerSummary, MonthlyRecord, SimulationConfig, SimulationEngine};
pub use scenario::{Comparison, ScenarioRunner};
