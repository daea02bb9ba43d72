pub mod backoffice;
pub mod drafts;
pub mod notifications;
pub mod repository;
pub mod stats;

pub use backoffice::{BackOffice, BulkAction};
pub use drafts::{AdDraft, EventDraft, ProfileDraft};
pub use notifications::{Notification, NotificationFeed, NotificationKind};
pub use repository::Repository;
pub use stats::DashboardStats;
