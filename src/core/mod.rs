pub mod ledger_store;
pub mod rollover;
pub mod services;
pub mod utils;

pub use ledger_store::LedgerStore;
pub use rollover::{MonthRollover, RolloverReport};
