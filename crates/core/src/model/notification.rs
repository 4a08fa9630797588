use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a Notification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(Uuid);

impl NotificationId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Progression milestones: module unlocked, final exam passed.
    System,
}

/// One entry in the notification feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: NotificationId,
    text: String,
    kind: NotificationKind,
    created_at: DateTime<Utc>,
    read: bool,
}

impl Notification {
    /// Creates an unread notification stamped with the given time.
    #[must_use]
    pub fn new(text: impl Into<String>, kind: NotificationKind, created_at: DateTime<Utc>) -> Self {
        Self {
            id: NotificationId::generate(),
            text: text.into(),
            kind,
            created_at,
            read: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn is_read(&self) -> bool {
        self.read
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn new_notifications_start_unread() {
        let notif = Notification::new("Module unlocked", NotificationKind::System, fixed_now());
        assert!(!notif.is_read());
        assert_eq!(notif.text(), "Module unlocked");
    }

    #[test]
    fn ids_are_unique() {
        let a = Notification::new("a", NotificationKind::System, fixed_now());
        let b = Notification::new("b", NotificationKind::System, fixed_now());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn mark_read_sticks() {
        let mut notif = Notification::new("x", NotificationKind::System, fixed_now());
        notif.mark_read();
        assert!(notif.is_read());
    }
}
