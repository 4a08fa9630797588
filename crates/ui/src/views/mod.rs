mod dashboard;
mod lessons;
mod monitor;
mod quiz;
mod settings;
mod state;
mod tutor;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use dashboard::DashboardView;
pub use lessons::{LessonDetailView, LessonsView};
pub use monitor::MonitorView;
pub use quiz::{FinalExamView, ModuleQuizView};
pub use settings::SettingsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use tutor::TutorView;
