//! Read-only export bundle handed to external exporters.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::services::summary_service::{LedgerSummary, SummaryService};
use crate::domain::{Debt, Expense, Income, LedgerSnapshot};
use crate::errors::Result;
use crate::storage::json_backend::write_json;

/// Every record plus the derived summary, as handed to exporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    pub exported_at: DateTime<Utc>,
    pub expenses: Vec<Expense>,
    pub debts: Vec<Debt>,
    pub incomes: Vec<Income>,
    pub summary: LedgerSummary,
}

pub struct ExportService;

impl ExportService {
    pub fn bundle(snapshot: LedgerSnapshot) -> LedgerExport {
        let summary = SummaryService::summarize(&snapshot);
        let LedgerSnapshot {
            expenses,
            debts,
            incomes,
        } = snapshot;
        LedgerExport {
            exported_at: Utc::now(),
            expenses,
            debts,
            incomes,
            summary,
        }
    }

    /// Writes the bundle as pretty JSON to `path`.
    pub fn write_to(export: &LedgerExport, path: &Path) -> Result<()> {
        write_json(path, export)
    }
}
