//! Token-gated statistics and CSV export service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{StatsQuery, StatsRepository, StatsRepositoryError};
use crate::domain::{CsvExport, Error, ExportScope, ExportToken, StatsReport, TokenCheck};

/// Implements [`StatsQuery`] over a [`StatsRepository`].
#[derive(Clone)]
pub struct StatsService<R> {
    stats: Arc<R>,
    token: ExportToken,
}

impl<R> StatsService<R> {
    /// Create a new service guarded by `token`.
    pub fn new(stats: Arc<R>, token: ExportToken) -> Self {
        Self { stats, token }
    }

    fn authorise(&self, candidate: Option<&str>) -> Result<(), Error> {
        match self.token.check(candidate) {
            TokenCheck::Accepted => Ok(()),
            TokenCheck::Rejected => Err(Error::unauthorized("invalid or missing token")),
            TokenCheck::NotConfigured => Err(Error::forbidden("statistics export is disabled")),
        }
    }
}

fn map_repository_error(error: StatsRepositoryError) -> Error {
    match error {
        StatsRepositoryError::Connection { message } => {
            warn!(%message, "stats repository unavailable");
            Error::service_unavailable("stats repository unavailable")
        }
        StatsRepositoryError::Query { message } => {
            Error::internal(format!("stats repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> StatsQuery for StatsService<R>
where
    R: StatsRepository,
{
    async fn subject_stats(&self, token: Option<String>) -> Result<StatsReport, Error> {
        self.authorise(token.as_deref())?;
        let stats = self
            .stats
            .subject_stats()
            .await
            .map_err(map_repository_error)?;
        Ok(StatsReport::new(stats))
    }

    async fn export_csv(
        &self,
        token: Option<String>,
        scope: ExportScope,
    ) -> Result<CsvExport, Error> {
        self.authorise(token.as_deref())?;
        let rows = self
            .stats
            .export_rows(&scope)
            .await
            .map_err(map_repository_error)?;
        tracing::info!(
            filename = %scope.filename(),
            rows = rows.len(),
            "rendering csv export"
        );
        Ok(CsvExport::render(&scope, &rows))
    }
}
