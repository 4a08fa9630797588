use std::fmt;

use hydro_core::LessonCatalog;
use hydro_core::model::{Attempt, LessonId, Question, QuestionId};

use crate::error::QuizError;
use super::progress::QuizProgress;

/// What a quiz run is for: one lesson's module quiz, or the final exam over
/// the whole question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizKind {
    Module(LessonId),
    FinalExam,
}

/// Drives a single quiz attempt.
///
/// The engine owns the `Attempt` exclusively for the duration of the run and
/// is stateless between runs: dropping it cancels the quiz with no side
/// effects, and `retry` rebuilds the answer state over the same question set.
pub struct QuizEngine {
    kind: QuizKind,
    title: String,
    attempt: Attempt,
}

impl QuizEngine {
    /// Starts a module quiz for one lesson.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownLesson` for ids outside the catalog. A
    /// lesson always has at least one question, so the attempt itself cannot
    /// fail to start.
    pub fn module_quiz(catalog: &LessonCatalog, lesson_id: LessonId) -> Result<Self, QuizError> {
        let lesson = catalog
            .lesson(lesson_id)
            .ok_or(QuizError::UnknownLesson(lesson_id))?;

        Ok(Self {
            kind: QuizKind::Module(lesson_id),
            title: format!("Quiz: {}", lesson.title()),
            attempt: Attempt::new(lesson.questions().to_vec())?,
        })
    }

    /// Starts the final exam: every lesson's questions, catalog order.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Attempt` only if the catalog were empty, which
    /// `LessonCatalog::new` already rules out.
    pub fn final_exam(catalog: &LessonCatalog) -> Result<Self, QuizError> {
        Ok(Self {
            kind: QuizKind::FinalExam,
            title: "Final Competency Exam".to_string(),
            attempt: Attempt::new(catalog.all_questions())?,
        })
    }

    #[must_use]
    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        self.attempt.current_question()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.attempt.current_index()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.attempt.total_questions()
    }

    /// The recorded answer for the question the pointer is on, if any.
    #[must_use]
    pub fn current_answer(&self) -> Option<usize> {
        self.attempt.answer_for(self.attempt.current_question().id())
    }

    #[must_use]
    pub fn answer_for(&self, question_id: QuestionId) -> Option<usize> {
        self.attempt.answer_for(question_id)
    }

    /// Records or overwrites an answer.
    ///
    /// # Errors
    ///
    /// Propagates `AttemptError` for unknown questions, out-of-range options,
    /// or a terminal attempt.
    pub fn select_option(
        &mut self,
        question_id: QuestionId,
        option_index: usize,
    ) -> Result<(), QuizError> {
        self.attempt.select_option(question_id, option_index)?;
        Ok(())
    }

    pub fn advance(&mut self) {
        self.attempt.advance();
    }

    pub fn retreat(&mut self) {
        self.attempt.retreat();
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.attempt.can_advance()
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.attempt.current_index() > 0 && !self.attempt.is_scored()
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.attempt.can_submit()
    }

    #[must_use]
    pub fn score(&self) -> Option<u8> {
        self.attempt.score()
    }

    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.attempt.is_scored()
    }

    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.attempt.is_passed()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            total: self.attempt.total_questions(),
            answered: self.attempt.answered_count(),
            current: self.attempt.current_index(),
            is_scored: self.attempt.is_scored(),
        }
    }

    pub(crate) fn submit_attempt(&mut self) -> Result<u8, QuizError> {
        Ok(self.attempt.submit()?)
    }

    /// Discards all answers for another run over the same question set.
    ///
    /// # Errors
    ///
    /// Returns an error if the attempt has not been scored yet.
    pub fn retry(&mut self) -> Result<(), QuizError> {
        self.attempt.retry()?;
        Ok(())
    }
}

impl fmt::Debug for QuizEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizEngine")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("attempt", &self.attempt)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> LessonCatalog {
        LessonCatalog::builtin()
    }

    fn answer_current_correct(engine: &mut QuizEngine) {
        let question = engine.current_question().clone();
        engine
            .select_option(question.id(), question.correct())
            .unwrap();
    }

    #[test]
    fn module_quiz_uses_the_lesson_question_set() {
        let catalog = catalog();
        let lesson = &catalog.lessons()[0];
        let engine = QuizEngine::module_quiz(&catalog, lesson.id()).unwrap();

        assert_eq!(engine.kind(), QuizKind::Module(lesson.id()));
        assert_eq!(engine.total_questions(), lesson.questions().len());
        assert!(engine.title().contains(lesson.title()));
    }

    #[test]
    fn unknown_lesson_cannot_start() {
        let catalog = catalog();
        let err = QuizEngine::module_quiz(&catalog, LessonId::new(404)).unwrap_err();
        assert!(matches!(err, QuizError::UnknownLesson(_)));
    }

    #[test]
    fn final_exam_concatenates_the_whole_bank() {
        let catalog = catalog();
        let engine = QuizEngine::final_exam(&catalog).unwrap();

        assert_eq!(engine.kind(), QuizKind::FinalExam);
        assert_eq!(engine.total_questions(), catalog.total_questions());
    }

    #[test]
    fn perfect_module_run_scores_100() {
        let catalog = catalog();
        let mut engine = QuizEngine::module_quiz(&catalog, catalog.lessons()[0].id()).unwrap();

        loop {
            answer_current_correct(&mut engine);
            if engine.can_advance() {
                engine.advance();
            } else {
                break;
            }
        }

        assert!(engine.can_submit());
        assert_eq!(engine.submit_attempt().unwrap(), 100);
        assert!(engine.is_passed());
    }

    #[test]
    fn retreat_is_disabled_on_first_question_and_after_scoring() {
        let catalog = catalog();
        let mut engine = QuizEngine::module_quiz(&catalog, catalog.lessons()[0].id()).unwrap();
        assert!(!engine.can_retreat());

        answer_current_correct(&mut engine);
        engine.advance();
        assert!(engine.can_retreat());
    }
}
