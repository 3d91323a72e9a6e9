//! Account configuration and batch loading

mod data;
pub mod loader;

pub use data::{AccountConfig, DEFAULT_BROKERAGE_COST};
pub use loader::{load_accounts, load_accounts_from_reader};

/// The two accounts compared by default: life insurance wrapper vs. equity savings plan
pub fn default_accounts(brokerage_cost: f64) -> Vec<AccountConfig> {
    vec![AccountConfig::assurance_vie(), AccountConfig::pea(brokerage_cost)]
}
