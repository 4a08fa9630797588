use thiserror::Error;

use crate::model::ids::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("a question needs at least two options, got {len}")]
    NotEnoughOptions { len: usize },

    #[error("an option label cannot be empty")]
    EmptyOption,

    #[error("correct option index {index} is out of range for {len} options")]
    CorrectOutOfRange { index: usize, len: usize },
}

/// A single multiple-choice quiz question.
///
/// The correct option index is validated against the option list at
/// construction, so scoring never has to defend against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct: usize,
}

impl Question {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, fewer than two options
    /// are given, an option label is blank, or `correct` is out of range.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct: usize,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < 2 {
            return Err(QuestionError::NotEnoughOptions { len: options.len() });
        }
        if options.iter().any(|opt| opt.trim().is_empty()) {
            return Err(QuestionError::EmptyOption);
        }
        if correct >= options.len() {
            return Err(QuestionError::CorrectOutOfRange {
                index: correct,
                len: options.len(),
            });
        }

        Ok(Self {
            id,
            prompt,
            options,
            correct,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Index of the correct option within `options()`.
    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Whether the given option index is a valid selection for this question.
    #[must_use]
    pub fn accepts_option(&self, index: usize) -> bool {
        index < self.options.len()
    }
}
