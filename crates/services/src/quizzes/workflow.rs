use std::sync::Arc;

use hydro_core::LessonCatalog;
use hydro_core::model::{LessonId, ProgressEvent};

use crate::error::QuizError;
use crate::progress_service::ProgressService;
use super::engine::{QuizEngine, QuizKind};

/// What a submitted quiz produced, for the completion screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: u8,
    pub passed: bool,
    /// Title of the module the pass unlocked, when there was one.
    pub unlocked_title: Option<String>,
    /// Whether this submission passed the final exam.
    pub final_exam_passed: bool,
}

/// Orchestrates quiz starts and routes submitted scores into progression.
///
/// The engine itself never touches progression; cancelling a quiz is just
/// dropping the engine, and only `submit` reaches this service.
#[derive(Clone)]
pub struct QuizWorkflowService {
    catalog: Arc<LessonCatalog>,
    progress: Arc<ProgressService>,
}

impl QuizWorkflowService {
    #[must_use]
    pub fn new(catalog: Arc<LessonCatalog>, progress: Arc<ProgressService>) -> Self {
        Self { catalog, progress }
    }

    /// Starts a module quiz for an unlocked lesson.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownLesson` or `QuizError::LessonLocked`.
    pub fn start_module_quiz(&self, lesson_id: LessonId) -> Result<QuizEngine, QuizError> {
        if self.catalog.lesson(lesson_id).is_none() {
            return Err(QuizError::UnknownLesson(lesson_id));
        }
        if !self.progress.is_unlocked(lesson_id) {
            return Err(QuizError::LessonLocked(lesson_id));
        }

        QuizEngine::module_quiz(&self.catalog, lesson_id)
    }

    /// Starts the final exam, rebuilt from the full question bank each time.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::ExamNotAvailable` unless every lesson is completed
    /// and the exam has not been passed yet.
    pub fn start_final_exam(&self) -> Result<QuizEngine, QuizError> {
        if !self.progress.is_final_exam_eligible() {
            return Err(QuizError::ExamNotAvailable);
        }

        QuizEngine::final_exam(&self.catalog)
    }

    /// Scores the attempt and applies the outcome to progression.
    ///
    /// # Errors
    ///
    /// Propagates attempt errors (not ready, already scored) and progression
    /// errors for module quizzes.
    pub fn submit(&self, engine: &mut QuizEngine) -> Result<QuizOutcome, QuizError> {
        let score = engine.submit_attempt()?;
        let passed = engine.is_passed();

        let mut unlocked_title = None;
        let mut final_exam_passed = false;
        match engine.kind() {
            QuizKind::Module(lesson_id) => {
                let event = self.progress.on_module_quiz_finished(lesson_id, score)?;
                if let Some(ProgressEvent::ModuleUnlocked { title, .. }) = event {
                    unlocked_title = Some(title);
                }
            }
            QuizKind::FinalExam => {
                let event = self.progress.on_final_exam_finished(score);
                final_exam_passed = matches!(event, Some(ProgressEvent::FinalExamPassed));
            }
        }

        Ok(QuizOutcome {
            score,
            passed,
            unlocked_title,
            final_exam_passed,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification_service::NotificationFeed;
    use hydro_core::time::fixed_clock;

    fn workflow() -> (QuizWorkflowService, Arc<ProgressService>) {
        let catalog = Arc::new(LessonCatalog::builtin());
        let notifications = Arc::new(NotificationFeed::new(fixed_clock()));
        let progress = Arc::new(ProgressService::new(
            Arc::clone(&catalog),
            notifications,
        ));
        (
            QuizWorkflowService::new(catalog, Arc::clone(&progress)),
            progress,
        )
    }

    fn answer_all(engine: &mut QuizEngine, correct: bool) {
        loop {
            let question = engine.current_question().clone();
            let choice = if correct {
                question.correct()
            } else {
                // Any other in-range option.
                (question.correct() + 1) % question.options().len()
            };
            engine.select_option(question.id(), choice).unwrap();
            if engine.can_advance() {
                engine.advance();
            } else {
                break;
            }
        }
    }

    #[test]
    fn locked_lesson_quiz_cannot_start() {
        let (workflow, progress) = workflow();
        let third = progress.catalog().lessons()[2].id();

        let err = workflow.start_module_quiz(third).unwrap_err();
        assert!(matches!(err, QuizError::LessonLocked(id) if id == third));
    }

    #[test]
    fn passing_module_quiz_unlocks_the_next_lesson() {
        let (workflow, progress) = workflow();
        let first = progress.catalog().lessons()[0].id();
        let second = progress.catalog().lessons()[1].id();

        let mut engine = workflow.start_module_quiz(first).unwrap();
        answer_all(&mut engine, true);
        let outcome = workflow.submit(&mut engine).unwrap();

        assert_eq!(outcome.score, 100);
        assert!(outcome.passed);
        assert!(outcome.unlocked_title.is_some());
        assert!(progress.is_completed(first));
        assert!(progress.is_unlocked(second));
    }

    #[test]
    fn failing_module_quiz_keeps_everything_locked() {
        let (workflow, progress) = workflow();
        let first = progress.catalog().lessons()[0].id();

        let mut engine = workflow.start_module_quiz(first).unwrap();
        answer_all(&mut engine, false);
        let outcome = workflow.submit(&mut engine).unwrap();

        assert!(!outcome.passed);
        assert_eq!(outcome.unlocked_title, None);
        assert!(!progress.is_completed(first));
    }

    #[test]
    fn final_exam_requires_eligibility() {
        let (workflow, _progress) = workflow();
        assert!(matches!(
            workflow.start_final_exam(),
            Err(QuizError::ExamNotAvailable)
        ));
    }

    #[test]
    fn cancelling_a_quiz_leaves_progression_untouched() {
        let (workflow, progress) = workflow();
        let first = progress.catalog().lessons()[0].id();

        let mut engine = workflow.start_module_quiz(first).unwrap();
        answer_all(&mut engine, true);
        drop(engine);

        assert!(!progress.is_completed(first));
        assert_eq!(progress.completion_percentage(), 0);
    }

    #[test]
    fn failed_exam_can_be_retried_through_the_engine() {
        let (workflow, progress) = workflow();
        for lesson in progress.catalog().lessons() {
            let mut engine = workflow.start_module_quiz(lesson.id()).unwrap();
            answer_all(&mut engine, true);
            workflow.submit(&mut engine).unwrap();
        }

        let mut exam = workflow.start_final_exam().unwrap();
        answer_all(&mut exam, false);
        let failed = workflow.submit(&mut exam).unwrap();
        assert!(!failed.final_exam_passed);
        assert!(!progress.final_exam_passed());

        exam.retry().unwrap();
        answer_all(&mut exam, true);
        let passed = workflow.submit(&mut exam).unwrap();
        assert_eq!(passed.score, 100);
        assert!(passed.final_exam_passed);
        assert!(progress.final_exam_passed());
    }
}
