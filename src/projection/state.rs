//! Running totals carried from one simulated month to the next

use crate::account::AccountConfig;

/// Unrounded accumulator for one simulation run.
///
/// Only emitted records are rounded; these totals never see a rounded value.
#[derive(Debug, Clone)]
pub struct AccountState {
    /// Months simulated so far (1-indexed once advanced)
    pub projection_month: u32,

    /// Simulated year (1-indexed)
    pub year: u32,

    /// Month within the simulated year (1-12)
    pub month_in_year: u32,

    /// Current account balance
    pub total_amount: f64,

    /// Principal contributed to date, including the initial deposit
    pub total_invested: f64,

    /// Management fees charged to date
    pub total_fees_cumulative: f64,

    /// Dividends paid to date
    pub total_dividends: f64,

    /// Market-driven value change to date
    pub total_market_change: f64,
}

impl AccountState {
    /// Initialize state from an account at simulation start
    pub fn from_account(account: &AccountConfig) -> Self {
        Self {
            projection_month: 0,
            year: 1,
            month_in_year: 0,
            total_amount: account.start_amount(),
            total_invested: account.start_amount(),
            total_fees_cumulative: 0.0,
            total_dividends: 0.0,
            total_market_change: 0.0,
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.projection_month += 1;
        self.year = (self.projection_month - 1) / 12 + 1;
        self.month_in_year = (self.projection_month - 1) % 12 + 1;
    }

    /// Management fee is charged at the end of each quarter (months 3, 6, 9, 12)
    pub fn is_fee_month(&self) -> bool {
        self.month_in_year % 3 == 0
    }

    /// Dividends are paid once a year, in the twelfth month
    pub fn is_dividend_month(&self) -> bool {
        self.month_in_year == 12
    }

    pub fn apply_contribution(&mut self, contribution: f64) -> f64 {
        self.total_amount += contribution;
        self.total_invested += contribution;
        contribution
    }

    /// Grow the balance by one month at the given monthly factor
    pub fn apply_market_growth(&mut self, monthly_growth_factor: f64) -> f64 {
        let market_change = self.total_amount * (monthly_growth_factor - 1.0);
        self.total_amount += market_change;
        self.total_market_change += market_change;
        market_change
    }

    /// Charge a quarter of the annual fee on the post-growth balance
    pub fn charge_management_fee(&mut self, annual_fee_percent: f64) -> f64 {
        if !self.is_fee_month() {
            return 0.0;
        }
        let fee = self.total_amount * (annual_fee_percent / 100.0) / 4.0;
        self.total_amount -= fee;
        self.total_fees_cumulative += fee;
        fee
    }

    /// Pay the annual dividend on the post-fee balance
    pub fn pay_dividend(&mut self, dividend_yield: f64) -> f64 {
        if !self.is_dividend_month() {
            return 0.0;
        }
        let dividend = self.total_amount * dividend_yield;
        self.total_amount += dividend;
        self.total_dividends += dividend;
        dividend
    }

    /// Unrounded balance minus principal
    pub fn profit(&self) -> f64 {
        self.total_amount - self.total_invested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn account() -> AccountConfig {
        AccountConfig::new("State", 1000.0, 1.0, 0.12, 0.02, 100.0)
    }

    #[test]
    fn test_timing_wraps_each_year() {
        let mut state = AccountState::from_account(&account());

        for _ in 0..13 {
            state.advance_month();
        }
        assert_eq!(state.projection_month, 13);
        assert_eq!(state.year, 2);
        assert_eq!(state.month_in_year, 1);
    }

    #[test]
    fn test_fee_skipped_outside_quarter_end() {
        let mut state = AccountState::from_account(&account());
        state.advance_month();

        assert_eq!(state.charge_management_fee(1.0), 0.0);
        assert_eq!(state.total_amount, 1000.0);
        assert_eq!(state.total_fees_cumulative, 0.0);
    }

    #[test]
    fn test_fee_is_quarter_of_annual_rate() {
        let mut state = AccountState::from_account(&account());
        for _ in 0..3 {
            state.advance_month();
        }

        let fee = state.charge_management_fee(1.0);
        assert_abs_diff_eq!(fee, 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(state.total_amount, 997.5, epsilon = 1e-12);
        assert_abs_diff_eq!(state.total_fees_cumulative, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_dividend_only_in_twelfth_month() {
        let mut state = AccountState::from_account(&account());
        for _ in 0..11 {
            state.advance_month();
            assert_eq!(state.pay_dividend(0.02), 0.0);
        }
        state.advance_month();

        let dividend = state.pay_dividend(0.02);
        assert_abs_diff_eq!(dividend, 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(state.total_dividends, 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_contribution_moves_balance_and_principal() {
        let mut state = AccountState::from_account(&account());
        state.apply_contribution(-50.0);

        assert_eq!(state.total_amount, 950.0);
        assert_eq!(state.total_invested, 950.0);
        assert_eq!(state.profit(), 0.0);
    }
}
