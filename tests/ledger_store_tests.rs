use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use std::thread;

use household_ledger::{
    core::LedgerStore,
    domain::{
        DebtUpdate, ExpenseStatus, ExpenseUpdate, IncomeUpdate, NewDebt, NewExpense, NewIncome,
    },
    errors::{LedgerError, RecordKind},
};
use uuid::Uuid;

mod common;

use common::setup_store;

#[test]
fn created_records_get_fresh_ids_and_are_listed() {
    let (store, _dir) = setup_store();
    let first = store
        .create_expense(NewExpense::new("Rent", "Housing", 1200.0, "05/03/2024"))
        .unwrap();
    let second = store
        .create_expense(NewExpense::new("Gym", "Health", 40.0, "07/03/2024"))
        .unwrap();

    assert!(!first.id.is_nil());
    assert_ne!(first.id, second.id);
    assert_eq!(first.status, ExpenseStatus::Pending);
    assert!(!first.is_fixed);

    let listed: Vec<_> = store.list_expenses().into_iter().map(|e| e.id).collect();
    assert_eq!(listed, vec![first.id, second.id]);
}

#[test]
fn partial_update_changes_only_supplied_fields() {
    let (store, _dir) = setup_store();
    let debt = store
        .create_debt(NewDebt::new("Car", 10000.0, 400.0, "15/03/2024"))
        .unwrap();

    let updated = store
        .update_debt(
            debt.id,
            &DebtUpdate {
                paid_amount: Some(800.0),
                ..DebtUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(updated.paid_amount, 800.0);
    assert_eq!(updated.id, debt.id);
    assert_eq!(updated.name, debt.name);
    assert_eq!(updated.total_amount, debt.total_amount);
    assert_eq!(updated.installment_value, debt.installment_value);
    assert_eq!(updated.due_date, debt.due_date);
    assert_eq!(updated.created_at, debt.created_at);
    assert_eq!(store.debt(debt.id), Some(updated));
}

#[test]
fn updating_a_missing_id_is_not_found_for_every_kind() {
    let (store, _dir) = setup_store();
    let missing = Uuid::new_v4();

    let err = store
        .update_expense(missing, &ExpenseUpdate::default())
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::NotFound { kind: RecordKind::Expense, id } if id == missing
    ));

    let err = store.update_debt(missing, &DebtUpdate::default()).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { kind: RecordKind::Debt, .. }));

    let err = store
        .update_income(missing, &IncomeUpdate::default())
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { kind: RecordKind::Income, .. }));
}

#[test]
fn deleting_is_idempotent() {
    let (store, _dir) = setup_store();
    let income = store
        .create_income(NewIncome::new("Salary", 3000.0, "01/03/2024"))
        .unwrap();
    let other = store
        .create_income(NewIncome::new("Bonus", 500.0, "15/03/2024"))
        .unwrap();

    store.delete_income(income.id).unwrap();
    store.delete_income(income.id).unwrap();
    store.delete_income(Uuid::new_v4()).unwrap();

    let remaining = store.list_incomes();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, other.id);
}

#[test]
fn records_survive_reopening_the_store() {
    let (store, dir) = setup_store();
    let expense = store
        .create_expense(NewExpense::new("Internet", "Utilities", 60.0, "12/03/2024").fixed())
        .unwrap();
    store
        .update_expense(
            expense.id,
            &ExpenseUpdate {
                status: Some(ExpenseStatus::Paid),
                ..ExpenseUpdate::default()
            },
        )
        .unwrap();
    store
        .create_debt(NewDebt::new("Phone", 600.0, 50.0, "20/03/2024").with_paid_amount(100.0))
        .unwrap();
    drop(store);

    let reopened = LedgerStore::open_in(&dir);
    assert!(reopened.load_warnings().is_empty());
    let expenses = reopened.list_expenses();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].status, ExpenseStatus::Paid);
    assert!(expenses[0].is_fixed);
    assert_eq!(reopened.list_debts()[0].paid_amount, 100.0);
}

#[test]
fn files_hold_a_json_array_of_records() {
    let (store, dir) = setup_store();
    store
        .create_expense(NewExpense::new("Rent", "Housing", 1200.0, "05/03/2024"))
        .unwrap();

    let raw = fs::read_to_string(dir.join("expenses.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["status"], "pending");
    assert_eq!(records[0]["due_date"], "05/03/2024");
}

#[test]
fn corrupt_file_loads_empty_and_is_copied_aside() {
    let dir = common::test_dir();
    fs::write(dir.join("incomes.json"), "not json at all").unwrap();

    let store = LedgerStore::open_in(&dir);
    assert!(store.list_incomes().is_empty());
    assert_eq!(store.load_warnings().len(), 1);

    let copies: Vec<_> = fs::read_dir(&dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("incomes.json.corrupt-"))
        .collect();
    assert_eq!(copies.len(), 1);

    store
        .create_income(NewIncome::new("Salary", 10.0, "01/01/2024"))
        .unwrap();
    assert_eq!(LedgerStore::open_in(&dir).list_incomes().len(), 1);
}

#[test]
fn concurrent_creates_are_all_kept() {
    let (store, dir) = setup_store();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for n in 0..5 {
                    store
                        .create_income(NewIncome::new(
                            format!("income-{worker}-{n}"),
                            1.0,
                            "01/01/2024",
                        ))
                        .unwrap();
                    store
                        .create_expense(NewExpense::new(
                            format!("expense-{worker}-{n}"),
                            "Misc",
                            1.0,
                            "01/01/2024",
                        ))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let ids: HashSet<_> = store.list_incomes().into_iter().map(|i| i.id).collect();
    assert_eq!(ids.len(), 40);
    assert_eq!(store.list_expenses().len(), 40);
    assert_eq!(store.summary().total_income, 40.0);

    let reopened = LedgerStore::open_in(&dir);
    assert_eq!(reopened.list_incomes().len(), 40);
    assert_eq!(reopened.list_expenses().len(), 40);
}

#[test]
fn roll_month_regenerates_fixed_expenses_without_clamping() {
    let (store, dir) = setup_store();
    let rent = store
        .create_expense(NewExpense::new("Rent", "Housing", 100.0, "31/01/2024").fixed().paid())
        .unwrap();
    store
        .create_expense(NewExpense::new("Dinner", "Food", 45.0, "12/01/2024"))
        .unwrap();

    let report = store.roll_month().unwrap();
    assert_eq!(report.added_expenses, 1);
    assert!(!report.has_skips());

    let expenses = store.list_expenses();
    assert_eq!(expenses.len(), 3);
    assert_eq!(expenses[0], rent);
    let next = &expenses[2];
    assert_ne!(next.id, rent.id);
    assert_eq!(next.name, "Rent");
    assert_eq!(next.value, 100.0);
    assert_eq!(next.due_date, "31/02/2024");
    assert_eq!(next.status, ExpenseStatus::Pending);
    assert!(next.is_fixed);

    assert_eq!(LedgerStore::open_in(&dir).list_expenses(), expenses);
}

#[test]
fn roll_month_caps_debt_payments_at_the_total() {
    let (store, _dir) = setup_store();
    let nearly = store
        .create_debt(NewDebt::new("Loan", 1000.0, 100.0, "10/01/2024").with_paid_amount(950.0))
        .unwrap();
    let fresh = store
        .create_debt(NewDebt::new("Card", 900.0, 300.0, "10/01/2024"))
        .unwrap();

    let report = store.roll_month().unwrap();
    assert_eq!(report.updated_debts, 2);
    assert_eq!(store.debt(nearly.id).unwrap().paid_amount, 1000.0);
    assert_eq!(store.debt(fresh.id).unwrap().paid_amount, 300.0);
    assert_eq!(store.list_debts().len(), 2);
}

#[test]
fn roll_month_doubles_incomes_and_crosses_the_year() {
    let (store, _dir) = setup_store();
    store
        .create_income(NewIncome::new("Salary", 3000.0, "05/12/2024"))
        .unwrap();
    store
        .create_income(NewIncome::new("Rent received", 700.0, "10/06/2024"))
        .unwrap();

    let report = store.roll_month().unwrap();
    assert_eq!(report.added_incomes, 2);

    let dates: Vec<_> = store.list_incomes().into_iter().map(|i| i.date).collect();
    assert_eq!(
        dates,
        vec!["05/12/2024", "10/06/2024", "05/01/2025", "10/07/2024"]
    );
}

#[test]
fn roll_month_skips_malformed_dates_and_keeps_going() {
    let (store, _dir) = setup_store();
    let broken = store
        .create_income(NewIncome::new("Odd", 10.0, "sometime soon"))
        .unwrap();
    store
        .create_income(NewIncome::new("Salary", 3000.0, "01/03/2024"))
        .unwrap();

    let report = store.roll_month().unwrap();
    assert_eq!(report.added_incomes, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].id, broken.id);
    assert_eq!(store.list_incomes().len(), 3);
}

#[test]
fn save_all_rewrites_every_file() {
    let (store, dir) = setup_store();
    store.save_all().unwrap();
    for name in ["expenses.json", "debts.json", "incomes.json"] {
        let raw = fs::read_to_string(dir.join(name)).unwrap();
        assert_eq!(raw.trim(), "[]");
    }
}

#[test]
fn roll_month_skips_dates_that_cannot_advance() {
    let (store, _dir) = setup_store();
    let huge_month = store
        .create_expense(NewExpense::new("Odd", "Misc", 1.0, "01/4294967295/2024").fixed())
        .unwrap();
    store
        .create_expense(NewExpense::new("Rent", "Housing", 900.0, "05/03/2024").fixed())
        .unwrap();
    let last_year = store
        .create_income(NewIncome::new("Far future", 1.0, "01/12/2147483647"))
        .unwrap();
    store
        .create_income(NewIncome::new("Salary", 3000.0, "01/03/2024"))
        .unwrap();

    let report = store.roll_month().unwrap();
    assert_eq!(report.added_expenses, 1);
    assert_eq!(report.added_incomes, 1);
    let skipped: Vec<_> = report.skipped.iter().map(|record| record.id).collect();
    assert_eq!(skipped, vec![huge_month.id, last_year.id]);

    let expenses = store.list_expenses();
    assert_eq!(expenses.len(), 3);
    assert_eq!(expenses[2].due_date, "05/04/2024");
    let incomes = store.list_incomes();
    assert_eq!(incomes.len(), 3);
    assert_eq!(incomes[2].date, "01/04/2024");
}
