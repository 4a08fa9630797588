use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use url::Url;

use crate::model::ids::LessonId;
use crate::model::question::Question;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson title cannot be empty")]
    EmptyTitle,

    #[error("lesson body cannot be empty")]
    EmptyBody,

    #[error("a lesson needs at least one quiz question")]
    NoQuestions,

    #[error("invalid video URL")]
    InvalidVideoUrl,
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// Fixed curriculum categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LessonCategory {
    Basics,
    Systems,
    Nutrients,
    Technology,
}

impl LessonCategory {
    /// Human-readable label used by list views and search.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            LessonCategory::Basics => "Basics",
            LessonCategory::Systems => "Systems",
            LessonCategory::Nutrients => "Nutrients",
            LessonCategory::Technology => "Technology",
        }
    }
}

impl fmt::Display for LessonCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// One curriculum unit: content plus its quiz question set.
///
/// Lessons are static data. They are built once when the catalog loads and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Lesson {
    id: LessonId,
    title: String,
    description: String,
    body: String,
    category: LessonCategory,
    duration_label: String,
    video_url: Option<String>,
    questions: Vec<Question>,
}

impl Lesson {
    /// Creates a validated lesson.
    ///
    /// # Errors
    ///
    /// Returns `LessonError` if the title or body is blank, the question set
    /// is empty, or the video URL does not parse.
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        description: impl Into<String>,
        body: impl Into<String>,
        category: LessonCategory,
        duration_label: impl Into<String>,
        video_url: Option<String>,
        questions: Vec<Question>,
    ) -> Result<Self, LessonError> {
        let title = title.into();
        let body = body.into();
        if title.trim().is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        if body.trim().is_empty() {
            return Err(LessonError::EmptyBody);
        }
        if questions.is_empty() {
            return Err(LessonError::NoQuestions);
        }
        if let Some(raw) = video_url.as_ref() {
            if Url::parse(raw).is_err() {
                return Err(LessonError::InvalidVideoUrl);
            }
        }

        Ok(Self {
            id,
            title,
            description: description.into(),
            body,
            category,
            duration_label: duration_label.into(),
            video_url,
            questions,
        })
    }

    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Markdown body rendered by the lesson detail view.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn category(&self) -> LessonCategory {
        self.category
    }

    #[must_use]
    pub fn duration_label(&self) -> &str {
        &self.duration_label
    }

    #[must_use]
    pub fn video_url(&self) -> Option<&str> {
        self.video_url.as_deref()
    }

    /// The lesson's quiz, in presentation order. Never empty.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}
