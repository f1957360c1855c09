pub mod common;
pub mod date;
pub mod debt;
pub mod expense;
pub mod income;

pub use common::{Displayable, Identifiable, NamedEntity, Patch};
pub use date::{advance_one_month, LedgerDate};
pub use debt::{Debt, DebtUpdate, NewDebt};
pub use expense::{Expense, ExpenseStatus, ExpenseUpdate, NewExpense};
pub use income::{Income, IncomeUpdate, NewIncome};

use serde::{Deserialize, Serialize};

/// Point-in-time copy of all three collections, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub incomes: Vec<Income>,
}

impl LedgerSnapshot {
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.debts.is_empty() && self.incomes.is_empty()
    }
}
