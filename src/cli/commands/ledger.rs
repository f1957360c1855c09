//! Whole-ledger commands: summary, month rollover and export.

use std::path::PathBuf;

use crate::cli::commands::args::usage;
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::core::services::ExportService;
use crate::errors::RecordKind;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show income, spending and what is left",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "roll-month",
            "Carry fixed expenses and incomes into next month and pay one installment per debt",
            "roll-month",
            cmd_roll_month,
        ),
        CommandEntry::new(
            "export",
            "Write every record plus the summary to a JSON file",
            "export <path>",
            cmd_export,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.store.summary();
    output_section("Summary");
    io::print_info(format!("  Total income     : {:.2}", summary.total_income));
    io::print_info(format!("  Total expenses   : {:.2}", summary.total_expenses));
    io::print_info(format!(
        "  Debt remaining   : {:.2}",
        summary.total_debt_remaining
    ));
    io::print_info(format!("  Committed        : {:.2}", summary.total_committed));
    io::print_info(format!("  Available salary : {:.2}", summary.available_salary));
    Ok(())
}

fn cmd_roll_month(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.confirm("Roll the ledger over to next month?")? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }

    let report = context.store.roll_month()?;
    io::print_success(format!(
        "Month rolled over: {} expenses added, {} debts updated, {} incomes added.",
        report.added_expenses, report.updated_debts, report.added_incomes
    ));
    for skipped in &report.skipped {
        io::print_warning(format!(
            "Skipped {} `{}` ({}): unreadable date `{}`",
            RecordKind::from(skipped.kind),
            skipped.name,
            skipped.id,
            skipped.date
        ));
    }
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(usage("export <path>"));
    };
    let path = PathBuf::from(*path);
    let export = ExportService::bundle(context.store.snapshot());
    ExportService::write_to(&export, &path)?;
    io::print_success(format!(
        "Exported {} expenses, {} debts and {} incomes to {}.",
        export.expenses.len(),
        export.debts.len(),
        export.incomes.len(),
        path.display()
    ));
    Ok(())
}
