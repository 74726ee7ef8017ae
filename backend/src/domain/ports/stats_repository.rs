//! Port for aggregate statistics and export rows.

use async_trait::async_trait;

use crate::domain::{ExportRow, ExportScope, SubjectStats};

use super::define_port_error;

define_port_error! {
    /// Errors raised by statistics repository adapters.
    pub enum StatsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "stats repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "stats repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Total and rated (by anyone) domain counts for every subject.
    async fn subject_stats(&self) -> Result<Vec<SubjectStats>, StatsRepositoryError>;

    /// Export rows for `scope`, ordered by subject, host name, then id, with
    /// one row per rating and unrated domains appearing once.
    async fn export_rows(&self, scope: &ExportScope)
    -> Result<Vec<ExportRow>, StatsRepositoryError>;
}
