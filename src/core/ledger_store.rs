use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::rollover::{MonthRollover, RolloverReport};
use crate::core::services::summary_service::{LedgerSummary, SummaryService};
use crate::core::utils::StoragePaths;
use crate::domain::{
    Debt, DebtUpdate, Expense, ExpenseUpdate, Identifiable, Income, IncomeUpdate, LedgerSnapshot,
    NamedEntity, NewDebt, NewExpense, NewIncome, Patch,
};
use crate::errors::{LedgerError, RecordKind, Result};
use crate::storage::{LoadOutcome, PersistentCollection};

/// Owns the expense, debt and income collections and their files.
///
/// Every mutating call changes one collection in memory and immediately
/// rewrites that collection's file. Each collection has its own lock; calls
/// spanning several collections take them in the order expenses, debts,
/// incomes.
pub struct LedgerStore {
    paths: StoragePaths,
    expenses: Mutex<PersistentCollection<Expense>>,
    debts: Mutex<PersistentCollection<Debt>>,
    incomes: Mutex<PersistentCollection<Income>>,
    load_warnings: Vec<String>,
}

impl LedgerStore {
    /// Loads the three collections, starting any missing or unreadable one empty.
    pub fn open(paths: StoragePaths) -> Self {
        let mut load_warnings = Vec::new();
        let (expenses, outcome) = PersistentCollection::load(&paths.expenses);
        note_outcome(RecordKind::Expense, &outcome, &mut load_warnings);
        let (debts, outcome) = PersistentCollection::load(&paths.debts);
        note_outcome(RecordKind::Debt, &outcome, &mut load_warnings);
        let (incomes, outcome) = PersistentCollection::load(&paths.incomes);
        note_outcome(RecordKind::Income, &outcome, &mut load_warnings);

        info!(
            expenses = expenses.len(),
            debts = debts.len(),
            incomes = incomes.len(),
            "ledger store opened"
        );

        Self {
            paths,
            expenses: Mutex::new(expenses),
            debts: Mutex::new(debts),
            incomes: Mutex::new(incomes),
            load_warnings,
        }
    }

    pub fn open_in(data_dir: &Path) -> Self {
        Self::open(StoragePaths::in_dir(data_dir))
    }

    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    /// Problems recovered from while loading, one line per collection.
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    pub fn create_expense(&self, input: NewExpense) -> Result<Expense> {
        create_in(&self.expenses, Expense::create(input, Utc::now()))
    }

    pub fn create_debt(&self, input: NewDebt) -> Result<Debt> {
        create_in(&self.debts, Debt::create(input, Utc::now()))
    }

    pub fn create_income(&self, input: NewIncome) -> Result<Income> {
        create_in(&self.incomes, Income::create(input, Utc::now()))
    }

    pub fn list_expenses(&self) -> Vec<Expense> {
        lock(&self.expenses).records().to_vec()
    }

    pub fn list_debts(&self) -> Vec<Debt> {
        lock(&self.debts).records().to_vec()
    }

    pub fn list_incomes(&self) -> Vec<Income> {
        lock(&self.incomes).records().to_vec()
    }

    pub fn expense(&self, id: Uuid) -> Option<Expense> {
        lock(&self.expenses).get(id).cloned()
    }

    pub fn debt(&self, id: Uuid) -> Option<Debt> {
        lock(&self.debts).get(id).cloned()
    }

    pub fn income(&self, id: Uuid) -> Option<Income> {
        lock(&self.incomes).get(id).cloned()
    }

    pub fn update_expense(&self, id: Uuid, update: &ExpenseUpdate) -> Result<Expense> {
        update_in(&self.expenses, RecordKind::Expense, id, update)
    }

    pub fn update_debt(&self, id: Uuid, update: &DebtUpdate) -> Result<Debt> {
        update_in(&self.debts, RecordKind::Debt, id, update)
    }

    pub fn update_income(&self, id: Uuid, update: &IncomeUpdate) -> Result<Income> {
        update_in(&self.incomes, RecordKind::Income, id, update)
    }

    /// Removes the expense if present; a missing id still rewrites the file.
    pub fn delete_expense(&self, id: Uuid) -> Result<()> {
        delete_in(&self.expenses, RecordKind::Expense, id)
    }

    pub fn delete_debt(&self, id: Uuid) -> Result<()> {
        delete_in(&self.debts, RecordKind::Debt, id)
    }

    pub fn delete_income(&self, id: Uuid) -> Result<()> {
        delete_in(&self.incomes, RecordKind::Income, id)
    }

    /// Rewrites all three files from memory.
    pub fn save_all(&self) -> Result<()> {
        let expenses = lock(&self.expenses);
        let debts = lock(&self.debts);
        let incomes = lock(&self.incomes);
        expenses.save()?;
        debts.save()?;
        incomes.save()?;
        Ok(())
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        let expenses = lock(&self.expenses);
        let debts = lock(&self.debts);
        let incomes = lock(&self.incomes);
        LedgerSnapshot {
            expenses: expenses.records().to_vec(),
            debts: debts.records().to_vec(),
            incomes: incomes.records().to_vec(),
        }
    }

    pub fn summary(&self) -> LedgerSummary {
        let expenses = lock(&self.expenses);
        let debts = lock(&self.debts);
        let incomes = lock(&self.incomes);
        SummaryService::compute(expenses.records(), debts.records(), incomes.records())
    }

    /// Advances the ledger one month and persists all three collections.
    pub fn roll_month(&self) -> Result<RolloverReport> {
        let mut expenses = lock(&self.expenses);
        let mut debts = lock(&self.debts);
        let mut incomes = lock(&self.incomes);

        let current = LedgerSnapshot {
            expenses: expenses.records().to_vec(),
            debts: debts.records().to_vec(),
            incomes: incomes.records().to_vec(),
        };
        let (next, report) = MonthRollover::apply(current, Utc::now());

        expenses.replace_all(next.expenses);
        debts.replace_all(next.debts);
        incomes.replace_all(next.incomes);
        expenses.save()?;
        debts.save()?;
        incomes.save()?;

        info!(
            added_expenses = report.added_expenses,
            updated_debts = report.updated_debts,
            added_incomes = report.added_incomes,
            skipped = report.skipped.len(),
            "month rolled over"
        );
        Ok(report)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn note_outcome(kind: RecordKind, outcome: &LoadOutcome, warnings: &mut Vec<String>) {
    if let LoadOutcome::Recovered { error, quarantined } = outcome {
        let mut message = format!(
            "{} records could not be loaded ({}); starting empty",
            kind, error
        );
        if let Some(copy) = quarantined {
            message.push_str(&format!(", original kept at {}", copy.display()));
        }
        warnings.push(message);
    }
}

fn create_in<T>(collection: &Mutex<PersistentCollection<T>>, record: T) -> Result<T>
where
    T: Identifiable + NamedEntity + Serialize + DeserializeOwned + Clone,
{
    let mut collection = lock(collection);
    collection.append(record.clone());
    collection.save()?;
    debug!(id = %record.id(), name = record.name(), "record created");
    Ok(record)
}

fn update_in<T, P>(
    collection: &Mutex<PersistentCollection<T>>,
    kind: RecordKind,
    id: Uuid,
    update: &P,
) -> Result<T>
where
    T: Identifiable + Serialize + DeserializeOwned + Clone,
    P: Patch<T>,
{
    let mut collection = lock(collection);
    let index = collection
        .find_index_by_id(id)
        .ok_or_else(|| LedgerError::not_found(kind, id))?;
    let updated = collection
        .update_at(index, update)
        .cloned()
        .ok_or_else(|| LedgerError::not_found(kind, id))?;
    collection.save()?;
    debug!(%kind, %id, "record updated");
    Ok(updated)
}

fn delete_in<T>(
    collection: &Mutex<PersistentCollection<T>>,
    kind: RecordKind,
    id: Uuid,
) -> Result<()>
where
    T: Identifiable + Serialize + DeserializeOwned,
{
    let mut collection = lock(collection);
    let removed = collection.remove_by_id(id);
    collection.save()?;
    debug!(%kind, %id, removed, "record delete processed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn corrupt_debts_file_is_reported_but_not_fatal() {
        let temp = tempdir().unwrap();
        let paths = StoragePaths::in_dir(temp.path());
        fs::write(&paths.debts, "[{\"id\": 12").unwrap();

        let store = LedgerStore::open(paths);
        assert!(store.list_debts().is_empty());
        assert_eq!(store.load_warnings().len(), 1);
        assert!(store.load_warnings()[0].starts_with("debt records"));
    }

    #[test]
    fn fresh_directory_opens_without_warnings() {
        let temp = tempdir().unwrap();
        let store = LedgerStore::open_in(temp.path());
        assert!(store.load_warnings().is_empty());
        assert!(store.snapshot().is_empty());
    }
}
