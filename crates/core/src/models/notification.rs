use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationLevel::Success => write!(f, "Success"),
            NotificationLevel::Info => write!(f, "Info"),
            NotificationLevel::Error => write!(f, "Error"),
        }
    }
}

/// An inline, dismissible message shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
        }
    }
}

/// Pending notifications, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notification and return its id.
    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) -> Uuid {
        let notification = Notification::new(level, message);
        let id = notification.id;
        self.items.push(notification);
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> Uuid {
        self.push(NotificationLevel::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> Uuid {
        self.push(NotificationLevel::Error, message)
    }

    /// Remove a notification. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Hand over every pending notification and clear the queue.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.items)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Notification] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
