//! Driving port for token-gated statistics and CSV exports.

use async_trait::async_trait;

use crate::domain::{CsvExport, Error, ExportScope, StatsReport};

/// Domain use-case port for the statistics endpoints.
///
/// Every operation first checks the caller's token: a missing or wrong
/// token is `unauthorized`, and a deployment without a configured token
/// answers `forbidden`.
#[async_trait]
pub trait StatsQuery: Send + Sync {
    /// Completion progress per subject.
    async fn subject_stats(&self, token: Option<String>) -> Result<StatsReport, Error>;

    /// Render the CSV export for `scope`.
    async fn export_csv(&self, token: Option<String>, scope: ExportScope)
    -> Result<CsvExport, Error>;
}
