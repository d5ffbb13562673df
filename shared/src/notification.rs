use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ToastPosition {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// Stack of transient status messages. Entries are removed by
/// [`Notifications::dismiss`], either on click or when their auto-close
/// timer fires.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifications {
    entries: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
        };
        let id = notification.id;
        log::debug!("toast {} ({}): {}", id, kind, notification.message);
        self.entries.push(notification);
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> Uuid {
        self.push(NotificationKind::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> Uuid {
        self.push(NotificationKind::Error, message)
    }

    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        self.entries.len() != before
    }

    /// Entries in display order.
    pub fn ordered(&self, newest_on_top: bool) -> Vec<&Notification> {
        if newest_on_top {
            self.entries.iter().rev().collect()
        } else {
            self.entries.iter().collect()
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.entries.iter().filter(|n| n.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
