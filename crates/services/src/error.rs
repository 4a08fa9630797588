//! Shared error types for the services crate.

use thiserror::Error;

use hydro_core::model::{AppSettingsError, AttemptError, LessonId, ProgressionError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the quiz engine and workflow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("lesson {0} is not in the catalog")]
    UnknownLesson(LessonId),

    #[error("lesson {0} is still locked")]
    LessonLocked(LessonId),

    #[error("the final exam is not available yet")]
    ExamNotAvailable,

    #[error(transparent)]
    Attempt(#[from] AttemptError),

    #[error(transparent)]
    Progress(#[from] ProgressServiceError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Progression(#[from] ProgressionError),
}

/// Errors emitted by `TutorService`.
///
/// These never escape the service: `ask` downgrades every variant to the
/// fixed fallback reply at the boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TutorError {
    #[error("the tutor is not configured")]
    Disabled,

    #[error("the tutor returned an empty response")]
    EmptyResponse,

    #[error("tutor request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `CertificateService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CertificateError {
    #[error("certificate name cannot be empty")]
    EmptyName,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors emitted by `AppSettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsServiceError {
    #[error(transparent)]
    Settings(#[from] AppSettingsError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
