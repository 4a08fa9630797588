use thiserror::Error;

use crate::catalog::CatalogError;
use crate::model::{AttemptError, LessonError, ProgressionError, QuestionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
    #[error(transparent)]
    Progression(#[from] ProgressionError),
}
