#![doc(test(attr(deny(warnings))))]

//! Household Ledger keeps expenses, debts and incomes in JSON files, derives a
//! monthly summary from them and rolls recurring records into the next month.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::LedgerStore;
pub use crate::errors::{LedgerError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Household ledger tracing initialized.");
    });
}
