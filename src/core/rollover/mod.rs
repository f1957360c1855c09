//! Month rollover: the batch transition from one month to the next.
//!
//! Fixed expenses and every income are cloned one month forward, and every
//! debt receives one installment. Originals are never removed.

mod types;

pub use types::{RolloverReport, SkippedKind, SkippedRecord};

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::domain::{Expense, Income, LedgerSnapshot};
use crate::errors::{LedgerError, RecordKind};

pub struct MonthRollover;

impl MonthRollover {
    /// Produces the next month's snapshot from `snapshot`.
    ///
    /// `now` stamps `created_at` on every generated record. Records whose date
    /// does not parse are skipped and listed in the report.
    pub fn apply(
        mut snapshot: LedgerSnapshot,
        now: DateTime<Utc>,
    ) -> (LedgerSnapshot, RolloverReport) {
        let mut report = RolloverReport::default();

        let new_expenses = Self::regenerate_expenses(&snapshot.expenses, now, &mut report);
        report.added_expenses = new_expenses.len();

        for debt in snapshot.debts.iter_mut() {
            debt.apply_installment();
        }
        report.updated_debts = snapshot.debts.len();

        let new_incomes = Self::regenerate_incomes(&snapshot.incomes, now, &mut report);
        report.added_incomes = new_incomes.len();

        snapshot.expenses.extend(new_expenses);
        snapshot.incomes.extend(new_incomes);
        (snapshot, report)
    }

    fn regenerate_expenses(
        expenses: &[Expense],
        now: DateTime<Utc>,
        report: &mut RolloverReport,
    ) -> Vec<Expense> {
        expenses
            .iter()
            .filter(|expense| expense.is_fixed)
            .filter_map(|expense| match expense.next_month(now) {
                Ok(next) => Some(next),
                Err(err) => {
                    skip(
                        report,
                        SkippedKind::Expense,
                        expense.id,
                        &expense.name,
                        &expense.due_date,
                        &err,
                    );
                    None
                }
            })
            .collect()
    }

    fn regenerate_incomes(
        incomes: &[Income],
        now: DateTime<Utc>,
        report: &mut RolloverReport,
    ) -> Vec<Income> {
        incomes
            .iter()
            .filter_map(|income| match income.next_month(now) {
                Ok(next) => Some(next),
                Err(err) => {
                    skip(
                        report,
                        SkippedKind::Income,
                        income.id,
                        &income.name,
                        &income.date,
                        &err,
                    );
                    None
                }
            })
            .collect()
    }
}

fn skip(
    report: &mut RolloverReport,
    kind: SkippedKind,
    id: Uuid,
    name: &str,
    date: &str,
    err: &LedgerError,
) {
    warn!(
        "error rolling {} `{}` ({}): {}",
        RecordKind::from(kind),
        name,
        id,
        err
    );
    report.skipped.push(SkippedRecord {
        kind,
        id,
        name: name.to_string(),
        date: date.to_string(),
    });
}
