use crate::cli::commands::args::{
    field_pairs, parse_amount, parse_date, parse_id, unknown_field, usage, ParsedArgs,
};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::domain::{Debt, DebtUpdate, Displayable, NewDebt, Patch};

const ADD_USAGE: &str =
    "add-debt <name> <total> <installment> <due_date> [--paid-amount <value>]";
const UPDATE_USAGE: &str = "update-debt <id> field=value...";
const FIELDS: &[&str] = &[
    "name",
    "total_amount",
    "paid_amount",
    "installment_value",
    "due_date",
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("debts", "List debts", "debts", cmd_list),
        CommandEntry::new("add-debt", "Record a debt paid in installments", ADD_USAGE, cmd_add),
        CommandEntry::new("update-debt", "Change fields of a debt", UPDATE_USAGE, cmd_update),
        CommandEntry::new("delete-debt", "Remove a debt", "delete-debt <id>", cmd_delete),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let debts = context.store.list_debts();
    output_section("Debts");
    if debts.is_empty() {
        io::print_info("No debts recorded.");
        return Ok(());
    }
    for debt in &debts {
        io::print_info(describe(debt));
    }
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["paid-amount"])?;
    parsed.ensure_known(&[])?;
    let &[name, total, installment, due_date] = parsed.positional.as_slice() else {
        return Err(usage(ADD_USAGE));
    };

    let mut input = NewDebt::new(
        name,
        parse_amount("total", total)?,
        parse_amount("installment", installment)?,
        parse_date("due_date", due_date)?,
    );
    if let Some(paid) = parsed.option("paid-amount") {
        input = input.with_paid_amount(parse_amount("paid amount", paid)?);
    }

    let debt = context.store.create_debt(input)?;
    io::print_success(format!("Debt added: {} [{}]", debt.display_label(), debt.id));
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

    let debt = context.store.update_debt(id, &update)?;
    io::print_success(format!("Debt updated: {}", describe(&debt)));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(usage("delete-debt <id>"));
    };
    let id = parse_id(id)?;
    context.store.delete_debt(id)?;
    io::print_success(format!("Debt {} removed.", id));
    Ok(())
}

fn build_update(fields: &[&str]) -> Result<DebtUpdate, CommandError> {
    let mut update = DebtUpdate::default();
    for (field, value) in field_pairs(fields)? {
        match field.as_str() {
            "name" => update.name = Some(value.to_string()),
            "total_amount" | "total" => update.total_amount = Some(parse_amount("total", value)?),
            "paid_amount" | "paid" => {
                update.paid_amount = Some(parse_amount("paid amount", value)?)
            }
            "installment_value" | "installment" => {
                update.installment_value = Some(parse_amount("installment", value)?)
            }
            "due_date" => update.due_date = Some(parse_date("due_date", value)?),
            other => return Err(unknown_field("debt", other, FIELDS)),
        }
    }
    Ok(update)
}

fn describe(debt: &Debt) -> String {
    format!(
        "{}  {}  paid {:.2} of {:.2} ({:.2} left)  installment {:.2}  due {}{}",
        debt.id,
        debt.name,
        debt.paid_amount,
        debt.total_amount,
        debt.remaining(),
        debt.installment_value,
        debt.due_date,
        if debt.is_settled() { "  settled" } else { "" }
    )
}
