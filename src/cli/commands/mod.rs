pub(crate) mod args;
pub mod config;
pub mod debt;
pub mod expense;
pub mod income;
pub mod ledger;
pub mod system;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(expense::definitions())
        .chain(debt::definitions())
        .chain(income::definitions())
        .chain(ledger::definitions())
        .chain(config::definitions())
    {
        registry.register(entry);
    }
}
