use crate::cli::commands::args::{
    field_pairs, parse_amount, parse_date, parse_id, unknown_field, usage,
};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::domain::{Displayable, Income, IncomeUpdate, NewIncome, Patch};

const ADD_USAGE: &str = "add-income <name> <value> <date>";
const UPDATE_USAGE: &str = "update-income <id> field=value...";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("incomes", "List incomes", "incomes", cmd_list),
        CommandEntry::new("add-income", "Record an income", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "update-income",
            "Change fields of an income",
            UPDATE_USAGE,
            cmd_update,
        ),
        CommandEntry::new(
            "delete-income",
            "Remove an income",
            "delete-income <id>",
            cmd_delete,
        ),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let incomes = context.store.list_incomes();
    output_section("Incomes");
    if incomes.is_empty() {
        io::print_info("No incomes recorded.");
        return Ok(());
    }
    for income in &incomes {
        io::print_info(describe(income));
    }
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, value, date] = args else {
        return Err(usage(ADD_USAGE));
    };
    let input = NewIncome::new(
        *name,
        parse_amount("value", value)?,
        parse_date("date", date)?,
    );

    let income = context.store.create_income(input)?;
    io::print_success(format!("Income added: {} [{}]", income.display_label(), income.id));
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

    let income = context.store.update_income(id, &update)?;
    io::print_success(format!("Income updated: {}", describe(&income)));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(usage("delete-income <id>"));
    };
    let id = parse_id(id)?;
    context.store.delete_income(id)?;
    io::print_success(format!("Income {} removed.", id));
    Ok(())
}

fn build_update(fields: &[&str]) -> Result<IncomeUpdate, CommandError> {
    let mut update = IncomeUpdate::default();
    for (field, value) in field_pairs(fields)? {
        match field.as_str() {
            "name" => update.name = Some(value.to_string()),
            "value" => update.value = Some(parse_amount("value", value)?),
            "date" => update.date = Some(parse_date("date", value)?),
            other => return Err(unknown_field("income", other, &["name", "value", "date"])),
        }
    }
    Ok(update)
}

fn describe(income: &Income) -> String {
    format!(
        "{}  {}  {:.2}  on {}",
        income.id, income.name, income.value, income.date
    )
}
