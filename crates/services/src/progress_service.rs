use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hydro_core::LessonCatalog;
use hydro_core::model::{LessonId, ProgressEvent, Progression};

use crate::error::ProgressServiceError;
use crate::notification_service::NotificationFeed;

/// Owns the session's `Progression` and is its only mutation path.
///
/// Quiz outcomes arrive through `on_module_quiz_finished` and
/// `on_final_exam_finished`; both are strict no-ops for failing scores, so a
/// misbehaving caller cannot corrupt the unlock chain. Progress events are
/// turned into notification feed entries here.
pub struct ProgressService {
    catalog: Arc<LessonCatalog>,
    notifications: Arc<NotificationFeed>,
    state: Mutex<Progression>,
}

impl ProgressService {
    #[must_use]
    pub fn new(catalog: Arc<LessonCatalog>, notifications: Arc<NotificationFeed>) -> Self {
        let state = Mutex::new(Progression::new(&catalog));
        Self {
            catalog,
            notifications,
            state,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<LessonCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn is_unlocked(&self, lesson_id: LessonId) -> bool {
        self.lock_state().is_unlocked(lesson_id)
    }

    #[must_use]
    pub fn is_completed(&self, lesson_id: LessonId) -> bool {
        self.lock_state().is_completed(lesson_id)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.lock_state().completed_count()
    }

    #[must_use]
    pub fn completion_percentage(&self) -> u8 {
        self.lock_state().completion_percentage(&self.catalog)
    }

    #[must_use]
    pub fn final_exam_passed(&self) -> bool {
        self.lock_state().final_exam_passed()
    }

    #[must_use]
    pub fn is_final_exam_eligible(&self) -> bool {
        self.lock_state().is_final_exam_eligible(&self.catalog)
    }

    /// A copy of the current progression state for read-heavy views.
    #[must_use]
    pub fn snapshot(&self) -> Progression {
        self.lock_state().clone()
    }

    /// Records a module-quiz score. Passing completes the lesson, unlocks
    /// its successor, and pushes a "module unlocked" notification.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` for unknown or still-locked lessons.
    pub fn on_module_quiz_finished(
        &self,
        lesson_id: LessonId,
        score: u8,
    ) -> Result<Option<ProgressEvent>, ProgressServiceError> {
        let event = self
            .lock_state()
            .apply_module_result(&self.catalog, lesson_id, score)?;

        if let Some(ProgressEvent::ModuleUnlocked { title, .. }) = event.as_ref() {
            self.notifications
                .push_system(format!("New module unlocked: {title}"));
        }

        Ok(event)
    }

    /// Records a final-exam score. The first pass flips the flag and pushes
    /// a "final exam passed" notification; everything else is a no-op.
    pub fn on_final_exam_finished(&self, score: u8) -> Option<ProgressEvent> {
        let event = self.lock_state().apply_final_exam_result(score);

        if matches!(event, Some(ProgressEvent::FinalExamPassed)) {
            self.notifications
                .push_system("Congratulations! You passed the final competency exam.");
        }

        event
    }

    fn lock_state(&self) -> MutexGuard<'_, Progression> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use hydro_core::time::fixed_clock;

    fn service() -> (ProgressService, Arc<NotificationFeed>) {
        let catalog = Arc::new(LessonCatalog::builtin());
        let notifications = Arc::new(NotificationFeed::new(fixed_clock()));
        let service = ProgressService::new(catalog, Arc::clone(&notifications));
        (service, notifications)
    }

    #[test]
    fn passing_module_quiz_notifies_about_the_unlock() {
        let (service, notifications) = service();
        let first = service.catalog().lessons()[0].id();
        let second_title = service.catalog().lessons()[1].title().to_string();

        let event = service.on_module_quiz_finished(first, 100).unwrap();

        assert!(event.is_some());
        let snapshot = notifications.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot[0].text().contains(&second_title));
    }

    #[test]
    fn failing_module_quiz_is_silent() {
        let (service, notifications) = service();
        let first = service.catalog().lessons()[0].id();

        let event = service.on_module_quiz_finished(first, 50).unwrap();

        assert_eq!(event, None);
        assert!(notifications.is_empty());
        assert!(!service.is_completed(first));
    }

    #[test]
    fn full_run_reaches_exam_eligibility() {
        let (service, _notifications) = service();
        let lessons: Vec<LessonId> = service
            .catalog()
            .lessons()
            .iter()
            .map(|lesson| lesson.id())
            .collect();

        for lesson_id in lessons {
            service.on_module_quiz_finished(lesson_id, 100).unwrap();
        }

        assert_eq!(service.completion_percentage(), 100);
        assert!(service.is_final_exam_eligible());
    }

    #[test]
    fn final_exam_pass_notifies_once() {
        let (service, notifications) = service();
        for lesson in service.catalog().lessons() {
            service.on_module_quiz_finished(lesson.id(), 100).unwrap();
        }
        let before = notifications.len();

        assert!(service.on_final_exam_finished(83).is_none());
        assert_eq!(notifications.len(), before);

        assert!(service.on_final_exam_finished(100).is_some());
        assert_eq!(notifications.len(), before + 1);
        assert!(!service.is_final_exam_eligible());

        assert!(service.on_final_exam_finished(100).is_none());
        assert_eq!(notifications.len(), before + 1);
    }
}
