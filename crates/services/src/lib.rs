#![forbid(unsafe_code)]

pub mod app_services;
pub mod certificate_service;
pub mod error;
pub mod notification_service;
pub mod progress_service;
pub mod quizzes;
pub mod sensor_service;
pub mod settings_service;
pub mod tutor_service;

pub use hydro_core::Clock;

pub use app_services::AppServices;
pub use certificate_service::{Certificate, CertificateService};
pub use error::{
    AppServicesError, CertificateError, ProgressServiceError, QuizError, SettingsServiceError,
    TutorError,
};
pub use notification_service::NotificationFeed;
pub use progress_service::ProgressService;
pub use quizzes::{QuizEngine, QuizKind, QuizOutcome, QuizProgress, QuizWorkflowService};
pub use sensor_service::{SensorFeedService, SensorReading, FLOW_RATE_LPM};
pub use settings_service::AppSettingsService;
pub use tutor_service::{TutorService, TUTOR_FALLBACK_REPLY};
