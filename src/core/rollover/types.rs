use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::RecordKind;

/// Counts produced by one month rollover.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RolloverReport {
    pub added_expenses: usize,
    pub updated_debts: usize,
    pub added_incomes: usize,
    /// Records left out of regeneration because their date did not parse.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRecord>,
}

impl RolloverReport {
    pub fn has_skips(&self) -> bool {
        !self.skipped.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedRecord {
    pub kind: SkippedKind,
    pub id: Uuid,
    pub name: String,
    pub date: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SkippedKind {
    Expense,
    Income,
}

impl From<SkippedKind> for RecordKind {
    fn from(kind: SkippedKind) -> Self {
        match kind {
            SkippedKind::Expense => RecordKind::Expense,
            SkippedKind::Income => RecordKind::Income,
        }
    }
}
