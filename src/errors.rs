use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Names the three record collections held by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Expense,
    Debt,
    Income,
}

impl RecordKind {
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Expense => "expense",
            RecordKind::Debt => "debt",
            RecordKind::Income => "income",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: Uuid },
    #[error("Malformed date `{0}`: expected DD/MM/YYYY")]
    MalformedDate(String),
    #[error("Corrupt storage at {}: {reason}", path.display())]
    CorruptStorage { path: PathBuf, reason: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LedgerError {
    pub fn not_found(kind: RecordKind, id: Uuid) -> Self {
        LedgerError::NotFound { kind, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
