use std::sync::Arc;

use hydro_core::LessonCatalog;
use storage::repository::Storage;

use crate::Clock;
use crate::certificate_service::CertificateService;
use crate::error::AppServicesError;
use crate::notification_service::NotificationFeed;
use crate::progress_service::ProgressService;
use crate::quizzes::QuizWorkflowService;
use crate::sensor_service::SensorFeedService;
use crate::settings_service::AppSettingsService;
use crate::tutor_service::TutorService;

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<LessonCatalog>,
    notifications: Arc<NotificationFeed>,
    progress: Arc<ProgressService>,
    quiz_workflow: Arc<QuizWorkflowService>,
    settings: Arc<AppSettingsService>,
    tutor: Arc<TutorService>,
    certificates: Arc<CertificateService>,
    sensors: Arc<SensorFeedService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::over_storage(storage, clock))
    }

    /// Build services over in-memory storage, for tests and prototyping.
    #[must_use]
    pub fn new_in_memory(clock: Clock) -> Self {
        Self::over_storage(Storage::in_memory(), clock)
    }

    fn over_storage(storage: Storage, clock: Clock) -> Self {
        let catalog = Arc::new(LessonCatalog::builtin());
        let notifications = Arc::new(NotificationFeed::new(clock));
        let progress = Arc::new(ProgressService::new(
            Arc::clone(&catalog),
            Arc::clone(&notifications),
        ));
        let quiz_workflow = Arc::new(QuizWorkflowService::new(
            Arc::clone(&catalog),
            Arc::clone(&progress),
        ));
        let settings = Arc::new(AppSettingsService::new(Arc::clone(&storage.settings)));
        let tutor = Arc::new(TutorService::new(Arc::clone(&storage.settings)));
        let certificates = Arc::new(CertificateService::new(clock));
        let sensors = Arc::new(SensorFeedService::new(clock));

        Self {
            catalog,
            notifications,
            progress,
            quiz_workflow,
            settings,
            tutor,
            certificates,
            sensors,
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
}
