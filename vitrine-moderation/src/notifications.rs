use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Payment,
    Profile,
    System,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    /// Millisecond timestamp, bumped when two land in the same millisecond.
    pub id: i64,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
}

impl Notification {
    /// Relative age label such as "Just now" or "5 minutes ago".
    pub fn time_label(&self, now_millis: i64) -> String {
        let minutes = (now_millis - self.id).max(0) / 60_000;
        match minutes {
            0 => "Just now".to_string(),
            1 => "1 minute ago".to_string(),
            m if m < 60 => format!("{m} minutes ago"),
            m if m < 120 => "1 hour ago".to_string(),
            m if m < 24 * 60 => format!("{} hours ago", m / 60),
            m if m < 48 * 60 => "1 day ago".to_string(),
            m => format!("{} days ago", m / (24 * 60)),
        }
    }
}

/// Admin activity feed, newest first.
#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    items: Vec<Notification>,
    last_id: i64,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        now_millis: i64,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> i64 {
        let id = now_millis.max(self.last_id + 1);
        self.last_id = id;
        self.items.insert(
            0,
            Notification {
                id,
                kind,
                title: title.into(),
                message: message.into(),
                read: false,
            },
        );
        id
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    /// Unknown IDs are ignored.
    pub fn mark_read(&mut self, id: i64) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                true
            }
            None => {
                tracing::debug!(notification_id = id, "notification not found");
                false
            }
        }
    }

    pub fn mark_all_read(&mut self) -> usize {
        let mut updated = 0;
        for n in self.items.iter_mut().filter(|n| !n.read) {
            n.read = true;
            updated += 1;
        }
        updated
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
