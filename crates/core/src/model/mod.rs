mod app_settings;
mod attempt;
mod ids;
mod lesson;
mod notification;
mod progression;
mod question;

pub use app_settings::{
    AppSettings, AppSettingsDraft, AppSettingsError, ParseThemeError, ThemePreference,
};
pub use attempt::{Attempt, AttemptError, PASSING_SCORE};
pub use ids::{LessonId, ParseIdError, QuestionId};
pub use lesson::{Lesson, LessonCategory, LessonError};
pub use notification::{Notification, NotificationId, NotificationKind};
pub use progression::{ProgressEvent, Progression, ProgressionError};
pub use question::{Question, QuestionError};
