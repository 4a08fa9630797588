use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::Question;

/// The only passing outcome. Any missed question fails the attempt; there is
/// no partial credit. Pass checks use `>=` to match the stated contract even
/// though integer scoring cannot exceed 100.
pub const PASSING_SCORE: u8 = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("an attempt needs at least one question")]
    Empty,

    #[error("question {0} is not part of this attempt")]
    UnknownQuestion(QuestionId),

    #[error("option index {index} is out of range for question {question}")]
    OptionOutOfRange { question: QuestionId, index: usize },

    #[error("attempt has already been scored")]
    AlreadyScored,

    #[error("attempt has not been scored yet")]
    NotScored,

    #[error("attempt is not ready to submit")]
    NotReadyToSubmit,
}

/// One in-progress or scored quiz session.
///
/// Holds the question set, a partial answer map, and the navigation pointer.
/// Navigation is clamped rather than failing; the `can_advance`/`can_submit`
/// predicates are the enforcement mechanism the UI disables actions with.
/// Dropping the attempt is a cancel and has no side effects.
#[derive(Clone, PartialEq)]
pub struct Attempt {
    questions: Vec<Question>,
    answers: BTreeMap<QuestionId, usize>,
    current: usize,
    score: Option<u8>,
}

impl Attempt {
    /// Starts a fresh attempt over the given ordered question set.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::Empty` if `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, AttemptError> {
        if questions.is_empty() {
            return Err(AttemptError::Empty);
        }

        Ok(Self {
            questions,
            answers: BTreeMap::new(),
            current: 0,
            score: None,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Zero-based index of the question the pointer is on.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// The recorded option index for a question, if any.
    #[must_use]
    pub fn answer_for(&self, question_id: QuestionId) -> Option<usize> {
        self.answers.get(&question_id).copied()
    }

    /// Records or overwrites the chosen option for a question.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::AlreadyScored` once the attempt is terminal,
    /// `AttemptError::UnknownQuestion` for ids outside the set, and
    /// `AttemptError::OptionOutOfRange` for indices past the option list.
    pub fn select_option(
        &mut self,
        question_id: QuestionId,
        option_index: usize,
    ) -> Result<(), AttemptError> {
        if self.score.is_some() {
            return Err(AttemptError::AlreadyScored);
        }
        let question = self
            .questions
            .iter()
            .find(|q| q.id() == question_id)
            .ok_or(AttemptError::UnknownQuestion(question_id))?;
        if !question.accepts_option(option_index) {
            return Err(AttemptError::OptionOutOfRange {
                question: question_id,
                index: option_index,
            });
        }

        self.answers.insert(question_id, option_index);
        Ok(())
    }

    /// Moves the pointer forward one question. No-op on the last question.
    pub fn advance(&mut self) {
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        }
    }

    /// Moves the pointer back one question. No-op on the first question.
    pub fn retreat(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Whether forward navigation is allowed: the current question must be
    /// answered, and the pointer must not be on the last question (which
    /// exposes `can_submit` instead).
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.score.is_none()
            && self.current + 1 < self.questions.len()
            && self.answers.contains_key(&self.questions[self.current].id())
    }

    /// Whether the attempt is ready to score: every question answered and the
    /// pointer on the last question.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.score.is_none()
            && self.current + 1 == self.questions.len()
            && self.answers.len() == self.questions.len()
    }

    /// Scores the attempt and moves it to its terminal state.
    ///
    /// The score is `round(100 * correct / total)` computed with integer
    /// arithmetic, rounding half up.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::AlreadyScored` for a second submit and
    /// `AttemptError::NotReadyToSubmit` while `can_submit()` is false.
    pub fn submit(&mut self) -> Result<u8, AttemptError> {
        if self.score.is_some() {
            return Err(AttemptError::AlreadyScored);
        }
        if !self.can_submit() {
            return Err(AttemptError::NotReadyToSubmit);
        }

        let correct = self
            .questions
            .iter()
            .filter(|q| self.answers.get(&q.id()) == Some(&q.correct()))
            .count();
        let total = self.questions.len();
        let score = round_percentage(correct, total);
        self.score = Some(score);
        Ok(score)
    }

    /// The terminal score, once `submit()` has run.
    #[must_use]
    pub fn score(&self) -> Option<u8> {
        self.score
    }

    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }

    /// Whether the scored attempt passed. Always false before submission.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.score.is_some_and(|score| score >= PASSING_SCORE)
    }

    /// Resets answers and pointer for another run over the same question set.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::NotScored` if the attempt has not been
    /// submitted yet.
    pub fn retry(&mut self) -> Result<(), AttemptError> {
        if self.score.is_none() {
            return Err(AttemptError::NotScored);
        }

        self.answers.clear();
        self.current = 0;
        self.score = None;
        Ok(())
    }
}

impl fmt::Debug for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attempt")
            .field("questions_len", &self.questions.len())
            .field("answered", &self.answers.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}

/// Integer `round(100 * correct / total)`, half up.
pub(crate) fn round_percentage(correct: usize, total: usize) -> u8 {
    debug_assert!(total > 0);
    debug_assert!(correct <= total);
    let score = (200 * correct + total) / (2 * total);
    u8::try_from(score).unwrap_or(PASSING_SCORE)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
