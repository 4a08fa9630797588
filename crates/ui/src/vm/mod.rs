mod lessons_vm;
mod markdown_vm;
mod quiz_vm;
mod tutor_vm;

pub use lessons_vm::{LessonCard, lesson_cards};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use quiz_vm::{QuizPhase, QuizVm};
pub use tutor_vm::{ChatEntry, ChatRole, greeting, lesson_context};
