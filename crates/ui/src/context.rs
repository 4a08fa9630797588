use std::sync::Arc;

use hydro_core::LessonCatalog;
use hydro_core::model::ThemePreference;
use services::{
    AppSettingsService, CertificateService, NotificationFeed, ProgressService,
    QuizWorkflowService, SensorFeedService, TutorService,
};

/// What the composition root (the `app` crate binary, or a test harness)
/// must provide for the views to run.
pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<LessonCatalog>;
    fn notifications(&self) -> Arc<NotificationFeed>;
    fn progress(&self) -> Arc<ProgressService>;
    fn quiz_workflow(&self) -> Arc<QuizWorkflowService>;
    fn settings(&self) -> Arc<AppSettingsService>;
    fn tutor(&self) -> Arc<TutorService>;
    fn certificates(&self) -> Arc<CertificateService>;
    fn sensors(&self) -> Arc<SensorFeedService>;

    /// Theme resolved at startup: persisted setting, then environment, then
    /// light.
    fn initial_theme(&self) -> ThemePreference;
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<LessonCatalog>,
    notifications: Arc<NotificationFeed>,
    progress: Arc<ProgressService>,
    quiz_workflow: Arc<QuizWorkflowService>,
    settings: Arc<AppSettingsService>,
    tutor: Arc<TutorService>,
    certificates: Arc<CertificateService>,
    sensors: Arc<SensorFeedService>,
    initial_theme: ThemePreference,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            notifications: app.notifications(),
            progress: app.progress(),
            quiz_workflow: app.quiz_workflow(),
            settings: app.settings(),
            tutor: app.tutor(),
            certificates: app.certificates(),
            sensors: app.sensors(),
            initial_theme: app.initial_theme(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<LessonCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn notifications(&self) -> Arc<NotificationFeed> {
        Arc::clone(&self.notifications)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn quiz_workflow(&self) -> Arc<QuizWorkflowService> {
        Arc::clone(&self.quiz_workflow)
    }

    #[must_use]
    pub fn settings(&self) -> Arc<AppSettingsService> {
        Arc::clone(&self.settings)
    }

    #[must_use]
    pub fn tutor(&self) -> Arc<TutorService> {
        Arc::clone(&self.tutor)
    }

    #[must_use]
    pub fn certificates(&self) -> Arc<CertificateService> {
        Arc::clone(&self.certificates)
    }

    #[must_use]
    pub fn sensors(&self) -> Arc<SensorFeedService> {
        Arc::clone(&self.sensors)
    }

    #[must_use]
    pub fn initial_theme(&self) -> ThemePreference {
        self.initial_theme
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
