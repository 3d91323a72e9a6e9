//! Account configuration for a single investment vehicle

use serde::{Deserialize, Serialize};

/// Default brokerage cost netted out of the PEA monthly contribution
pub const DEFAULT_BROKERAGE_COST: f64 = 2.0;

/// Immutable parameters describing one investment account.
///
/// No range checks are applied: a negative growth rate is a bear market and
/// a negative contribution models costs netted out of the deposit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountConfig {
    name: String,
    start_amount: f64,
    /// Annual management fee in percent (0.75 = 0.75 %)
    management_fee: f64,
    /// Annual market growth as a fraction (0.10 = 10 %)
    market_growth: f64,
    /// Annual dividend yield as a fraction
    dividend_yield: f64,
    monthly_contribution: f64,
}

impl AccountConfig {
    pub fn new(
        name: impl Into<String>,
        start_amount: f64,
        management_fee: f64,
        market_growth: f64,
        dividend_yield: f64,
        monthly_contribution: f64,
    ) -> Self {
        Self {
            name: name.into(),
            start_amount,
            management_fee,
            market_growth,
            dividend_yield,
            monthly_contribution,
        }
    }

    /// Life insurance wrapper: 0.75 % annual fee, 600/month
    pub fn assurance_vie() -> Self {
        Self::new("Assurance Vie", 5000.0, 0.75, 0.10, 0.0159, 600.0)
    }

    /// Equity savings plan: no management fee, brokerage cost taken from each contribution
    pub fn pea(brokerage_cost: f64) -> Self {
        Self::new("PEA", 5000.0, 0.0, 0.10, 0.0159, 600.0 - brokerage_cost)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_amount(&self) -> f64 {
        self.start_amount
    }

    pub fn management_fee(&self) -> f64 {
        self.management_fee
    }

    pub fn market_growth(&self) -> f64 {
        self.market_growth
    }

    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    pub fn monthly_contribution(&self) -> f64 {
        self.monthly_contribution
    }

    /// Labelled parameter values, in the order of the exported parameters table
    pub fn parameters(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Initial amount", self.start_amount.to_string()),
            ("Management fee (annual, %)", self.management_fee.to_string()),
            ("Market growth (annual)", self.market_growth.to_string()),
            ("Dividend yield", self.dividend_yield.to_string()),
            ("Monthly contribution", self.monthly_contribution.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let account = AccountConfig::new("Test", 1000.0, 0.5, -0.2, 0.01, -10.0);

        assert_eq!(account.name(), "Test");
        assert_eq!(account.start_amount(), 1000.0);
        assert_eq!(account.management_fee(), 0.5);
        assert_eq!(account.market_growth(), -0.2);
        assert_eq!(account.dividend_yield(), 0.01);
        assert_eq!(account.monthly_contribution(), -10.0);
    }

    #[test]
    fn test_pea_nets_brokerage_cost() {
        let pea = AccountConfig::pea(DEFAULT_BROKERAGE_COST);
        assert_eq!(pea.monthly_contribution(), 598.0);
        assert_eq!(pea.management_fee(), 0.0);
    }

    #[test]
    fn test_parameters_order() {
        let params = AccountConfig::assurance_vie().parameters();
        let labels: Vec<_> = params.iter().map(|(label, _)| *label).collect();

        assert_eq!(labels.len(), 6);
        assert_eq!(labels[0], "Name");
        assert_eq!(params[0].1, "Assurance Vie");
        assert_eq!(params[2].1, "0.75");
        assert_eq!(labels[5], "Monthly contribution");
    }
}
