use std::sync::{Mutex, PoisonError};

use hydro_core::Clock;
use hydro_core::model::{Notification, NotificationId, NotificationKind};

/// Append-only feed of system messages, newest first.
///
/// The feed is passive storage: the progress service pushes entries, views
/// read snapshots. Clearing empties it; there is no per-entry removal.
pub struct NotificationFeed {
    clock: Clock,
    entries: Mutex<Vec<Notification>>,
}

impl NotificationFeed {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Prepends a system notification and returns its id.
    pub fn push_system(&self, text: impl Into<String>) -> NotificationId {
        let notification = Notification::new(text, NotificationKind::System, self.clock.now());
        let id = notification.id();
        self.lock().insert(0, notification);
        id
    }

    /// Current feed contents, newest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.lock().iter().filter(|entry| !entry.is_read()).count()
    }

    pub fn mark_all_read(&self) {
        for entry in self.lock().iter_mut() {
            entry.mark_read();
        }
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydro_core::time::fixed_clock;

    #[test]
    fn newest_entries_come_first() {
        let feed = NotificationFeed::new(fixed_clock());
        feed.push_system("first");
        feed.push_system("second");

        let snapshot = feed.snapshot();
        assert_eq!(snapshot[0].text(), "second");
        assert_eq!(snapshot[1].text(), "first");
    }

    #[test]
    fn unread_count_tracks_mark_all_read() {
        let feed = NotificationFeed::new(fixed_clock());
        feed.push_system("a");
        feed.push_system("b");
        assert_eq!(feed.unread_count(), 2);

        feed.mark_all_read();
        assert_eq!(feed.unread_count(), 0);
        assert_eq!(feed.len(), 2);
    }

    #[test]
    fn clear_empties_the_feed() {
        let feed = NotificationFeed::new(fixed_clock());
        feed.push_system("a");
        feed.clear();
        assert!(feed.is_empty());
    }
}
