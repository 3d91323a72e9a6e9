//! Load account configurations from CSV

use super::AccountConfig;
use crate::error::Result;
use csv::Reader;
use std::path::Path;

/// Raw CSV row matching the accounts file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    start_amount: f64,
    management_fee: f64,
    market_growth: f64,
    dividend_yield: f64,
    monthly_contribution: f64,
}

impl From<CsvRow> for AccountConfig {
    fn from(row: CsvRow) -> Self {
        AccountConfig::new(
            row.name,
            row.start_amount,
            row.management_fee,
            row.market_growth,
            row.dividend_yield,
            row.monthly_contribution,
        )
    }
}

/// Load all accounts from a CSV file
pub fn load_accounts<P: AsRef<Path>>(path: P) -> Result<Vec<AccountConfig>> {
    let reader = Reader::from_path(path)?;
    collect_accounts(reader)
}

/// Load accounts from any reader (e.g., string buffer, request body)
pub fn load_accounts_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<AccountConfig>> {
    collect_accounts(Reader::from_reader(reader))
}

fn collect_accounts<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<AccountConfig>> {
    let mut accounts = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        accounts.push(row.into());
    }

    Ok(accounts)
}
