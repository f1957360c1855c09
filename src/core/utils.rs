use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::Result;

pub const HOME_ENV_VAR: &str = "HOUSEHOLD_LEDGER_HOME";
const DEFAULT_DIR_NAME: &str = ".household_ledger";
const DATA_DIR: &str = "data";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const EXPENSES_FILE: &str = "expenses.json";
const DEBTS_FILE: &str = "debts.json";
const INCOMES_FILE: &str = "incomes.json";

/// Creates `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Locations of the three collection files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub expenses: PathBuf,
    pub debts: PathBuf,
    pub incomes: PathBuf,
}

impl StoragePaths {
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            expenses: data_dir.join(EXPENSES_FILE),
            debts: data_dir.join(DEBTS_FILE),
            incomes: data_dir.join(INCOMES_FILE),
        }
    }
}

/// Resolves application directories, honouring `HOUSEHOLD_LEDGER_HOME`.
pub struct PathResolver;

impl PathResolver {
    /// Base directory, defaulting to `~/.household_ledger`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV_VAR) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn data_dir_in(base: &Path) -> PathBuf {
        base.join(DATA_DIR)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join(CONFIG_FILE)
    }
}
