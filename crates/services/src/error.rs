//! Shared error types for the services crate.

use thiserror::Error;

use prep_core::mastery::MasteryError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressStore`.
///
/// Storage problems never show up here: reads degrade to an empty map and
/// failed writes are logged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Mastery(#[from] MasteryError),
}

/// Errors emitted by `RecordLoader`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoaderError {
    #[error("failed to read card data: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse card data: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors emitted by study sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyError {
    #[error("no cards available for session")]
    Empty,
    #[error("session already completed")]
    Completed,
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
