use serde::{Deserialize, Serialize};

use crate::domain::{Debt, Expense, Income, LedgerSnapshot};

/// Affordability figures for the current ledger.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerSummary {
    pub total_income: f64,
    /// Paid and pending expenses alike.
    pub total_expenses: f64,
    #[serde(rename = "total_debt")]
    pub total_debt_remaining: f64,
    /// Expenses plus one installment of every debt.
    pub total_committed: f64,
    pub available_salary: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn summarize(snapshot: &LedgerSnapshot) -> LedgerSummary {
        Self::compute(&snapshot.expenses, &snapshot.debts, &snapshot.incomes)
    }

    pub fn compute(expenses: &[Expense], debts: &[Debt], incomes: &[Income]) -> LedgerSummary {
        let total_income: f64 = incomes.iter().map(|income| income.value).sum();
        let total_expenses: f64 = expenses.iter().map(|expense| expense.value).sum();
        let total_debt_remaining: f64 = debts.iter().map(Debt::remaining).sum();
        let installments: f64 = debts.iter().map(|debt| debt.installment_value).sum();
        let total_committed = total_expenses + installments;

        LedgerSummary {
            total_income,
            total_expenses,
            total_debt_remaining,
            total_committed,
            available_salary: total_income - total_committed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExpenseStatus, NewDebt, NewExpense, NewIncome};
    use chrono::Utc;

    fn snapshot() -> LedgerSnapshot {
        let now = Utc::now();
        LedgerSnapshot {
            expenses: vec![
                Expense::create(
                    NewExpense::new("Rent", "Housing", 1200.0, "01/03/2024").paid(),
                    now,
                ),
                Expense::create(
                    NewExpense::new("Power", "Utilities", 80.5, "10/03/2024"),
                    now,
                ),
            ],
            debts: vec![
                Debt::create(
                    NewDebt::new("Car", 10000.0, 400.0, "15/03/2024").with_paid_amount(2500.0),
                    now,
                ),
                Debt::create(NewDebt::new("Phone", 600.0, 50.0, "20/03/2024"), now),
            ],
            incomes: vec![
                Income::create(NewIncome::new("Salary", 4000.0, "05/03/2024"), now),
                Income::create(NewIncome::new("Side gig", 250.0, "25/03/2024"), now),
            ],
        }
    }

    #[test]
    fn empty_ledger_sums_to_zero() {
        assert_eq!(
            SummaryService::summarize(&LedgerSnapshot::default()),
            LedgerSummary::default()
        );
    }

    #[test]
    fn totals_follow_the_affordability_formula() {
        let snapshot = snapshot();
        let summary = SummaryService::summarize(&snapshot);

        assert_eq!(summary.total_income, 4250.0);
        assert_eq!(summary.total_expenses, 1280.5);
        assert_eq!(summary.total_debt_remaining, 7500.0 + 600.0);
        assert_eq!(summary.total_committed, 1280.5 + 450.0);
        assert_eq!(
            summary.available_salary,
            summary.total_income - summary.total_expenses - 450.0
        );
    }

    #[test]
    fn paid_expenses_still_count() {
        let mut snapshot = snapshot();
        for expense in snapshot.expenses.iter_mut() {
            expense.status = ExpenseStatus::Paid;
        }
        assert_eq!(SummaryService::summarize(&snapshot).total_expenses, 1280.5);
    }

    #[test]
    fn remaining_debt_serializes_as_total_debt() {
        let json = serde_json::to_value(SummaryService::summarize(&snapshot())).unwrap();
        assert_eq!(json["total_debt"], 8100.0);
        assert!(json.get("total_debt_remaining").is_none());
    }
}
