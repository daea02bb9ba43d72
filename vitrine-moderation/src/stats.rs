use serde::Serialize;

use vitrine_catalog::{AdStatus, EventStatus, ReviewStatus};

use crate::notifications::NotificationFeed;
use crate::repository::Repository;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_profiles: usize,
    pub pending_verifications: usize,
    pub featured_profiles: usize,
    pub vip_profiles: usize,
    pub pending_reviews: usize,
    pub published_events: usize,
    pub active_ads: usize,
    pub blacklisted_members: usize,
    pub unread_notifications: usize,
}

impl DashboardStats {
    pub fn collect(repo: &Repository, feed: &NotificationFeed) -> Self {
        Self {
            total_profiles: repo.profiles.len(),
            pending_verifications: repo.profiles.iter().filter(|p| !p.is_verified).count(),
            featured_profiles: repo.profiles.iter().filter(|p| p.is_featured).count(),
            vip_profiles: repo.profiles.iter().filter(|p| p.is_vip).count(),
            pending_reviews: repo.reviews.iter().filter(|r| r.status == ReviewStatus::Pending).count(),
            published_events: repo.events.iter().filter(|e| e.status == EventStatus::Published).count(),
            active_ads: repo.ads.iter().filter(|a| a.status == AdStatus::Active).count(),
            blacklisted_members: repo.members.iter().filter(|m| m.is_blacklisted).count(),
            unread_notifications: feed.unread_count(),
        }
    }
}
