use crate::cli::commands::args::{
    field_pairs, parse_amount, parse_bool, parse_date, parse_id, unknown_field, usage, ParsedArgs,
};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::domain::{Displayable, Expense, ExpenseStatus, ExpenseUpdate, NewExpense, Patch};

const ADD_USAGE: &str = "add-expense <name> <category> <value> <due_date> [--paid] [--fixed]";
const UPDATE_USAGE: &str = "update-expense <id> field=value...";
const FIELDS: &[&str] = &["name", "category", "value", "due_date", "status", "is_fixed"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("expenses", "List expenses", "expenses", cmd_list),
        CommandEntry::new("add-expense", "Record an expense", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "update-expense",
            "Change fields of an expense",
            UPDATE_USAGE,
            cmd_update,
        ),
        CommandEntry::new(
            "delete-expense",
            "Remove an expense",
            "delete-expense <id>",
            cmd_delete,
        ),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let expenses = context.store.list_expenses();
    output_section("Expenses");
    if expenses.is_empty() {
        io::print_info("No expenses recorded.");
        return Ok(());
    }
    for expense in &expenses {
        io::print_info(describe(expense));
    }
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    parsed.ensure_known(&["paid", "fixed"])?;
    let &[name, category, value, due_date] = parsed.positional.as_slice() else {
        return Err(usage(ADD_USAGE));
    };

    let mut input = NewExpense::new(
        name,
        category,
        parse_amount("value", value)?,
        parse_date("due_date", due_date)?,
    );
    if parsed.flag("paid") {
        input = input.paid();
    }
    if parsed.flag("fixed") {
        input = input.fixed();
    }

    let expense = context.store.create_expense(input)?;
    io::print_success(format!("Expense added: {} [{}]", expense.display_label(), expense.id));
    Ok(())
}

fn cmd_update(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((id, fields)) = args.split_first() else {
        return Err(usage(UPDATE_USAGE));
    };
    let id = parse_id(id)?;
    let update = build_update(fields)?;
    if update.is_empty() {
        io::print_warning("Nothing to update.");
        return Ok(());
    }

    let expense = context.store.update_expense(id, &update)?;
    io::print_success(format!("Expense updated: {}", describe(&expense)));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(usage("delete-expense <id>"));
    };
    let id = parse_id(id)?;
    context.store.delete_expense(id)?;
    io::print_success(format!("Expense {} removed.", id));
    Ok(())
}

fn build_update(fields: &[&str]) -> Result<ExpenseUpdate, CommandError> {
    let mut update = ExpenseUpdate::default();
    for (field, value) in field_pairs(fields)? {
        match field.as_str() {
            "name" => update.name = Some(value.to_string()),
            "category" => update.category = Some(value.to_string()),
            "value" => update.value = Some(parse_amount("value", value)?),
            "due_date" => update.due_date = Some(parse_date("due_date", value)?),
            "status" => {
                let status = ExpenseStatus::parse(value).ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "invalid status `{}` (use pending or paid)",
                        value
                    ))
                })?;
                update.status = Some(status);
            }
            "is_fixed" | "fixed" => update.is_fixed = Some(parse_bool("is_fixed", value)?),
            other => return Err(unknown_field("expense", other, FIELDS)),
        }
    }
    Ok(update)
}

fn describe(expense: &Expense) -> String {
    format!(
        "{}  {} [{}]  {:.2}  due {}  {}{}",
        expense.id,
        expense.name,
        expense.category,
        expense.value,
        expense.due_date,
        expense.status.as_str(),
        if expense.is_fixed { "  fixed" } else { "" }
    )
}
