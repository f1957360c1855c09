pub mod export_service;
pub mod summary_service;

pub use export_service::{ExportService, LedgerExport};
pub use summary_service::{LedgerSummary, SummaryService};
