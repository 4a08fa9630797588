/// Who said a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    Student,
    Tutor,
}

impl ChatRole {
    /// CSS class hook for the bubble alignment.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            ChatRole::Student => "chat-student",
            ChatRole::Tutor => "chat-tutor",
        }
    }
}

/// One transcript line in the tutor view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub text: String,
}

impl ChatEntry {
    #[must_use]
    pub fn student(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Student,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn tutor(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Tutor,
            text: text.into(),
        }
    }
}

/// The canned opening line shown before any question is asked.
#[must_use]
pub fn greeting() -> ChatEntry {
    ChatEntry::tutor(
        "Hello, future farmer! I'm the Agri-Tutor. Want to talk through NFT \
         channels or smart irrigation today?",
    )
}

/// Lesson context string handed to the tutor service: the titles of every
/// completed lesson, so answers can build on what the student has seen.
#[must_use]
pub fn lesson_context(completed_titles: &[String]) -> Option<String> {
    if completed_titles.is_empty() {
        return None;
    }
    Some(format!("completed lessons: {}", completed_titles.join(", ")))
}
