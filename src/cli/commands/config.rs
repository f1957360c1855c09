use std::path::PathBuf;

use crate::cli::commands::args::usage;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "config [show] | config set data_dir <path> | config reset data_dir";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View or change where ledger files are kept",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show(context),
        [action] if action.eq_ignore_ascii_case("show") => show(context),
        [action, key, value] if action.eq_ignore_ascii_case("set") => {
            ensure_data_dir_key(key)?;
            context.config.data_dir = Some(PathBuf::from(*value));
            apply(context)
        }
        [action, key] if action.eq_ignore_ascii_case("reset") => {
            ensure_data_dir_key(key)?;
            context.config.data_dir = None;
            apply(context)
        }
        _ => Err(usage(USAGE)),
    }
}

fn ensure_data_dir_key(key: &str) -> CommandResult {
    if key.eq_ignore_ascii_case("data_dir") {
        Ok(())
    } else {
        Err(CommandError::InvalidArguments(format!(
            "unknown config key `{}` (known: data_dir)",
            key
        )))
    }
}

fn show(context: &ShellContext) -> CommandResult {
    let base = context.config_manager.base_dir();
    output_section("Configuration");
    io::print_info(format!("  Config file : {}", context.config_manager.path().display()));
    io::print_info(format!(
        "  Data dir    : {}{}",
        context.config.resolve_data_dir(base).display(),
        if context.config.data_dir.is_none() {
            " (default)"
        } else {
            ""
        }
    ));
    let paths = context.store.paths();
    io::print_info(format!("  Expenses    : {}", paths.expenses.display()));
    io::print_info(format!("  Debts       : {}", paths.debts.display()));
    io::print_info(format!("  Incomes     : {}", paths.incomes.display()));
    Ok(())
}

fn apply(context: &mut ShellContext) -> CommandResult {
    context.persist_config()?;
    context.reopen_store();
    io::print_success(format!(
        "Data directory set to {}.",
        context
            .config
            .resolve_data_dir(context.config_manager.base_dir())
            .display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::core::process_script;
    use crate::config::ConfigManager;
    use tempfile::tempdir;

    #[test]
    fn set_data_dir_persists_and_switches_store() {
        let temp = tempdir().unwrap();
        let other = temp.path().join("shared");
        let set = format!("config set data_dir {}", other.display());
        let app = process_script(
            temp.path().to_path_buf(),
            &[set.as_str(), "add-income Salary 10 01/01/2024"],
        )
        .unwrap();

        assert_eq!(app.store.paths().incomes, other.join("incomes.json"));
        assert!(other.join("incomes.json").exists());

        let reloaded = ConfigManager::with_base_dir(temp.path().to_path_buf())
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(reloaded.data_dir, Some(other));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let temp = tempdir().unwrap();
        let result = process_script(temp.path().to_path_buf(), &["config set theme dark"]);
        assert!(result.is_err());
    }
}
