use hydro_core::model::LessonId;
use services::{QuizEngine, QuizError, QuizOutcome, QuizProgress, QuizWorkflowService};

use crate::views::ViewError;

/// Where a quiz run stands, from the view's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPhase {
    InProgress,
    Scored(QuizOutcome),
}

/// Drives one quiz run for the quiz view.
///
/// Wraps the engine so the view only ever deals with display data and
/// intents; cancelling is dropping the vm.
pub struct QuizVm {
    engine: QuizEngine,
    phase: QuizPhase,
}

impl QuizVm {
    /// # Errors
    ///
    /// Returns `ViewError::LessonLocked` when the lesson is gated, otherwise
    /// `ViewError::Unknown` for unexpected failures.
    pub fn start_module(
        workflow: &QuizWorkflowService,
        lesson_id: LessonId,
    ) -> Result<Self, ViewError> {
        let engine = workflow.start_module_quiz(lesson_id).map_err(|err| match err {
            QuizError::LessonLocked(_) => ViewError::LessonLocked,
            _ => ViewError::Unknown,
        })?;
        Ok(Self {
            engine,
            phase: QuizPhase::InProgress,
        })
    }

    /// # Errors
    ///
    /// Returns `ViewError::ExamUnavailable` until every lesson is completed,
    /// otherwise `ViewError::Unknown`.
    pub fn start_final_exam(workflow: &QuizWorkflowService) -> Result<Self, ViewError> {
        let engine = workflow.start_final_exam().map_err(|err| match err {
            QuizError::ExamNotAvailable => ViewError::ExamUnavailable,
            _ => ViewError::Unknown,
        })?;
        Ok(Self {
            engine,
            phase: QuizPhase::InProgress,
        })
    }

    #[must_use]
    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.engine.title()
    }

    #[must_use]
    pub fn prompt(&self) -> String {
        self.engine.current_question().prompt().to_string()
    }

    #[must_use]
    pub fn options(&self) -> Vec<String> {
        self.engine.current_question().options().to_vec()
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.engine.current_answer()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        self.engine.progress()
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.engine.can_advance()
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.engine.can_retreat()
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.engine.can_submit()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.engine.current_index() + 1 == self.engine.total_questions()
    }

    /// Records an option click on the current question. In-range indices come
    /// straight from the rendered option list, so failures are unexpected.
    pub fn select(&mut self, option_index: usize) {
        let question_id = self.engine.current_question().id();
        let _ = self.engine.select_option(question_id, option_index);
    }

    pub fn next(&mut self) {
        self.engine.advance();
    }

    pub fn prev(&mut self) {
        self.engine.retreat();
    }

    /// Scores the run and applies the outcome to progression.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if submission is rejected; the view
    /// disables the action whenever `can_submit()` is false.
    pub fn submit(&mut self, workflow: &QuizWorkflowService) -> Result<(), ViewError> {
        let outcome = workflow
            .submit(&mut self.engine)
            .map_err(|_| ViewError::Unknown)?;
        self.phase = QuizPhase::Scored(outcome);
        Ok(())
    }

    /// Starts over on the same question set after a failed run.
    pub fn retry(&mut self) {
        if self.engine.retry().is_ok() {
            self.phase = QuizPhase::InProgress;
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
