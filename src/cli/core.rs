//! Core CLI loop, dispatch, and shell context helpers.

use std::{io, path::PathBuf};

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;

use crate::cli::commands;
use crate::cli::io as cli_io;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::config::{Config, ConfigManager};
use crate::core::utils::PathResolver;
use crate::core::LedgerStore;
use crate::errors::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// State shared by every command handler for the life of the shell.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub store: LedgerStore,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, PathResolver::base_dir())
    }

    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = config_manager.load()?;
        let data_dir = config.resolve_data_dir(config_manager.base_dir());
        let store = LedgerStore::open_in(&data_dir);
        report_load(&store);

        Ok(Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            store,
            running: true,
        })
    }

    pub(crate) fn prompt(&self) -> String {
        "ledger> ".to_string()
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// Points the shell at a different data directory, loading whatever is there.
    pub(crate) fn reopen_store(&mut self) {
        let data_dir = self
            .config
            .resolve_data_dir(self.config_manager.base_dir());
        self.store = LedgerStore::open_in(&data_dir);
        report_load(&self.store);
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager
            .save(&self.config)
            .map_err(CommandError::from_core)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        if let Some(best) = closest_command(self.registry.names(), input) {
            cli_io::print_info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(err) if err.is_not_found() => {
                self.print_error(&err.to_string());
                cli_io::print_hint("List the collection to see valid ids.");
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }
}

fn report_load(store: &LedgerStore) {
    for warning in store.load_warnings() {
        cli_io::print_warning(warning);
    }
}

/// Nearest registered name within an edit distance of three.
pub(crate) fn closest_command<'a>(
    names: impl Iterator<Item = &'a str>,
    input: &str,
) -> Option<&'a str> {
    let needle = input.to_lowercase();
    names
        .map(|name| (levenshtein(name, &needle), name))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= 3)
        .map(|(_, name)| name)
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl CommandError {
    pub(crate) fn from_core(error: LedgerError) -> Self {
        CommandError::Core(error)
    }
}

/// Failures that stop the shell itself.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error("{0}")]
    Input(String),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Input(err.to_string())
    }
}

#[cfg(test)]
use crate::cli::shell::handle_line;

#[cfg(test)]
pub(crate) fn process_script(base: PathBuf, lines: &[&str]) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_base_dir(CliMode::Script, base)?;
    for line in lines {
        match handle_line(&mut app, line)? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExpenseStatus;
    use tempfile::tempdir;

    #[test]
    fn suggestion_needs_a_close_name() {
        let names = ["summary", "roll-month", "expenses"];
        assert_eq!(closest_command(names.iter().copied(), "sumary"), Some("summary"));
        assert_eq!(closest_command(names.iter().copied(), "ROLL-MNTH"), Some("roll-month"));
        assert_eq!(closest_command(names.iter().copied(), "completely-off"), None);
    }

    #[test]
    fn script_creates_records_in_the_configured_store() {
        let temp = tempdir().unwrap();
        let app = process_script(
            temp.path().to_path_buf(),
            &[
                "add-expense Rent Housing 1200 05/03/2024 --fixed --paid",
                "add-income Salary 3000 01/03/2024",
                "add-debt Car 10000 500 10/03/2024 --paid-amount 2500",
            ],
        )
        .unwrap();

        let expenses = app.store.list_expenses();
        assert_eq!(expenses.len(), 1);
        assert!(expenses[0].is_fixed);
        assert_eq!(expenses[0].status, ExpenseStatus::Paid);
        assert_eq!(app.store.list_debts()[0].paid_amount, 2500.0);
        assert!(temp.path().join("data").join("incomes.json").exists());
    }

    #[test]
    fn exit_stops_processing_remaining_lines() {
        let temp = tempdir().unwrap();
        let app = process_script(
            temp.path().to_path_buf(),
            &["exit", "add-income Salary 3000 01/03/2024"],
        )
        .unwrap();
        assert!(app.store.list_incomes().is_empty());
        assert!(!app.running);
    }

    #[test]
    fn updating_an_unknown_id_is_a_not_found_error() {
        let temp = tempdir().unwrap();
        let mut app = ShellContext::with_base_dir(CliMode::Script, temp.path().to_path_buf())
            .unwrap();
        let err = handle_line(
            &mut app,
            "update-income 00000000-0000-0000-0000-000000000001 value=10",
        )
        .expect_err("missing id");
        assert!(matches!(err, CommandError::Core(ref inner) if inner.is_not_found()));
    }

    #[test]
    fn unknown_command_is_not_an_error() {
        let temp = tempdir().unwrap();
        let mut app = ShellContext::with_base_dir(CliMode::Script, temp.path().to_path_buf())
            .unwrap();
        assert_eq!(handle_line(&mut app, "sumary").unwrap(), LoopControl::Continue);
        assert!(app.running);
    }
}
