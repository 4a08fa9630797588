use std::collections::BTreeSet;
use thiserror::Error;

use crate::catalog::LessonCatalog;
use crate::model::attempt::{PASSING_SCORE, round_percentage};
use crate::model::ids::LessonId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressionError {
    #[error("lesson {0} is not in the catalog")]
    UnknownLesson(LessonId),

    #[error("lesson {0} is still locked")]
    LessonLocked(LessonId),
}

/// Emitted when a quiz outcome changes the progression state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The successor of a freshly completed lesson became available.
    ModuleUnlocked { lesson: LessonId, title: String },
    /// The final exam was passed for the first time.
    FinalExamPassed,
}

/// Accumulated unlock/completion state gating lessons and the final exam.
///
/// All mutation goes through `apply_module_result` and
/// `apply_final_exam_result`; both are no-ops for failing scores, and the
/// state never decreases. The first catalog lesson is unlocked from the
/// start, and a lesson is only ever unlocked by completing its immediate
/// predecessor, so completed ⊆ unlocked holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    completed: BTreeSet<LessonId>,
    unlocked: BTreeSet<LessonId>,
    final_exam_passed: bool,
}

impl Progression {
    /// Initial state for a catalog: nothing completed, first lesson unlocked.
    #[must_use]
    pub fn new(catalog: &LessonCatalog) -> Self {
        let mut unlocked = BTreeSet::new();
        if let Some(first) = catalog.lessons().first() {
            unlocked.insert(first.id());
        }

        Self {
            completed: BTreeSet::new(),
            unlocked,
            final_exam_passed: false,
        }
    }

    #[must_use]
    pub fn is_unlocked(&self, lesson_id: LessonId) -> bool {
        self.unlocked.contains(&lesson_id)
    }

    #[must_use]
    pub fn is_completed(&self, lesson_id: LessonId) -> bool {
        self.completed.contains(&lesson_id)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn final_exam_passed(&self) -> bool {
        self.final_exam_passed
    }

    /// Percentage of catalog lessons completed, rounded half up.
    #[must_use]
    pub fn completion_percentage(&self, catalog: &LessonCatalog) -> u8 {
        let total = catalog.lessons().len();
        if total == 0 {
            return 0;
        }
        round_percentage(self.completed.len().min(total), total)
    }

    /// The final exam opens once every lesson is completed and closes again
    /// after it has been passed.
    #[must_use]
    pub fn is_final_exam_eligible(&self, catalog: &LessonCatalog) -> bool {
        self.completion_percentage(catalog) >= 100 && !self.final_exam_passed
    }

    /// Applies a module-quiz score for `lesson_id`.
    ///
    /// A passing score completes the lesson and unlocks its catalog
    /// successor, returning `ProgressEvent::ModuleUnlocked` when a successor
    /// exists and was not already unlocked. Failing scores never change
    /// state, even if reported. Re-passing a completed lesson is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionError::UnknownLesson` for ids outside the catalog
    /// and `ProgressionError::LessonLocked` if the lesson was never unlocked.
    pub fn apply_module_result(
        &mut self,
        catalog: &LessonCatalog,
        lesson_id: LessonId,
        score: u8,
    ) -> Result<Option<ProgressEvent>, ProgressionError> {
        if catalog.lesson(lesson_id).is_none() {
            return Err(ProgressionError::UnknownLesson(lesson_id));
        }
        if !self.unlocked.contains(&lesson_id) {
            return Err(ProgressionError::LessonLocked(lesson_id));
        }
        if score < PASSING_SCORE {
            return Ok(None);
        }

        self.completed.insert(lesson_id);

        let Some(successor) = catalog.successor_of(lesson_id) else {
            return Ok(None);
        };
        if !self.unlocked.insert(successor.id()) {
            return Ok(None);
        }

        Ok(Some(ProgressEvent::ModuleUnlocked {
            lesson: successor.id(),
            title: successor.title().to_string(),
        }))
    }

    /// Applies a final-exam score.
    ///
    /// The first passing score flips the flag and returns
    /// `ProgressEvent::FinalExamPassed`; everything else is a no-op and the
    /// exam may be retaken.
    pub fn apply_final_exam_result(&mut self, score: u8) -> Option<ProgressEvent> {
        if score < PASSING_SCORE || self.final_exam_passed {
            return None;
        }

        self.final_exam_passed = true;
        Some(ProgressEvent::FinalExamPassed)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LessonCatalog;

    fn catalog() -> LessonCatalog {
        LessonCatalog::builtin()
    }

    fn lesson_id(catalog: &LessonCatalog, index: usize) -> LessonId {
        catalog.lessons()[index].id()
    }

    #[test]
    fn initial_state_unlocks_only_the_first_lesson() {
        let catalog = catalog();
        let progression = Progression::new(&catalog);

        assert!(progression.is_unlocked(lesson_id(&catalog, 0)));
        for lesson in &catalog.lessons()[1..] {
            assert!(!progression.is_unlocked(lesson.id()));
        }
        assert_eq!(progression.completion_percentage(&catalog), 0);
        assert!(!progression.is_final_exam_eligible(&catalog));
    }

    #[test]
    fn passing_score_completes_and_unlocks_successor() {
        let catalog = catalog();
        let mut progression = Progression::new(&catalog);
        let first = lesson_id(&catalog, 0);
        let second = lesson_id(&catalog, 1);

        let event = progression
            .apply_module_result(&catalog, first, 100)
            .unwrap();

        assert!(progression.is_completed(first));
        assert!(progression.is_unlocked(second));
        assert!(matches!(
            event,
            Some(ProgressEvent::ModuleUnlocked { lesson, .. }) if lesson == second
        ));
    }

    #[test]
    fn failing_score_changes_nothing() {
        let catalog = catalog();
        let mut progression = Progression::new(&catalog);
        let first = lesson_id(&catalog, 0);

        let event = progression.apply_module_result(&catalog, first, 50).unwrap();

        assert_eq!(event, None);
        assert!(!progression.is_completed(first));
        assert!(!progression.is_unlocked(lesson_id(&catalog, 1)));
    }

    #[test]
    fn locked_lesson_result_is_rejected() {
        let catalog = catalog();
        let mut progression = Progression::new(&catalog);
        let third = lesson_id(&catalog, 2);

        let err = progression
            .apply_module_result(&catalog, third, 100)
            .unwrap_err();
        assert!(matches!(err, ProgressionError::LessonLocked(id) if id == third));
    }

    #[test]
    fn unknown_lesson_is_rejected() {
        let catalog = catalog();
        let mut progression = Progression::new(&catalog);

        let err = progression
            .apply_module_result(&catalog, LessonId::new(999), 100)
            .unwrap_err();
        assert!(matches!(err, ProgressionError::UnknownLesson(_)));
    }

    #[test]
    fn repassing_a_completed_lesson_emits_no_second_event() {
        let catalog = catalog();
        let mut progression = Progression::new(&catalog);
        let first = lesson_id(&catalog, 0);

        assert!(progression
            .apply_module_result(&catalog, first, 100)
            .unwrap()
            .is_some());
        let again = progression.apply_module_result(&catalog, first, 100).unwrap();
        assert_eq!(again, None);
    }

    #[test]
    fn completing_the_last_lesson_unlocks_nothing_further() {
        let catalog = catalog();
        let mut progression = Progression::new(&catalog);
        for lesson in catalog.lessons() {
            progression
                .apply_module_result(&catalog, lesson.id(), 100)
                .unwrap();
        }

        assert_eq!(progression.completion_percentage(&catalog), 100);
        assert!(progression.is_final_exam_eligible(&catalog));
    }

    #[test]
    fn completion_percentage_is_monotone_over_a_full_run() {
        let catalog = catalog();
        let mut progression = Progression::new(&catalog);
        let mut last = progression.completion_percentage(&catalog);

        for lesson in catalog.lessons() {
            // A failed run first, which must not move the needle.
            progression
                .apply_module_result(&catalog, lesson.id(), 50)
                .unwrap();
            let after_fail = progression.completion_percentage(&catalog);
            assert!(after_fail >= last);

            progression
                .apply_module_result(&catalog, lesson.id(), 100)
                .unwrap();
            let after_pass = progression.completion_percentage(&catalog);
            assert!(after_pass >= after_fail);
            last = after_pass;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn final_exam_pass_flips_flag_once() {
        let catalog = catalog();
        let mut progression = Progression::new(&catalog);
        for lesson in catalog.lessons() {
            progression
                .apply_module_result(&catalog, lesson.id(), 100)
                .unwrap();
        }

        assert_eq!(progression.apply_final_exam_result(83), None);
        assert!(!progression.final_exam_passed());

        assert_eq!(
            progression.apply_final_exam_result(100),
            Some(ProgressEvent::FinalExamPassed)
        );
        assert!(progression.final_exam_passed());
        assert!(!progression.is_final_exam_eligible(&catalog));

        // A second pass report is idempotent.
        assert_eq!(progression.apply_final_exam_result(100), None);
    }
}
