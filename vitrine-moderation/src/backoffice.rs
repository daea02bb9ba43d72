use std::sync::Arc;

use std::collections::BTreeSet;

use vitrine_catalog::{
    AdId, AdStatus, EventId, EventStatus, ListState, MemberId, MemberStatus, MembershipTier, Profile, ProfileFilter,
    ProfileId, ReviewId, ReviewStatus, SortKey, StatusFilter, VerificationStatus,
};
use vitrine_shared::{AppError, AppResult, Clock, ErrorCode};

use crate::drafts::{AdDraft, EventDraft, ProfileDraft};
use crate::notifications::{Notification, NotificationFeed, NotificationKind};
use crate::repository::Repository;
use crate::stats::DashboardStats;

/// Action applied to every selected profile at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Verify,
    Feature,
    Delete,
    SetMembership(Option<MembershipTier>),
}

impl BulkAction {
    fn describe(&self) -> String {
        match self {
            BulkAction::Verify => "verified".to_string(),
            BulkAction::Feature => "featured".to_string(),
            BulkAction::Delete => "deleted".to_string(),
            BulkAction::SetMembership(Some(tier)) => format!("moved to {tier} membership"),
            BulkAction::SetMembership(None) => "removed from membership".to_string(),
        }
    }
}

fn missing(kind: &'static str, id: u64) -> bool {
    tracing::debug!(kind, id, "record not found, action ignored");
    false
}

/// Admin back office: the repository, the profiles panel and the activity feed.
///
/// Actions on an unknown ID are no-ops returning `false`; only applied actions
/// add a notification.
pub struct BackOffice {
    repo: Repository,
    feed: NotificationFeed,
    clock: Arc<dyn Clock>,
    profile_list: ListState<Profile>,
}

impl BackOffice {
    pub fn new(repo: Repository, clock: Arc<dyn Clock>) -> Self {
        let mut office = Self {
            repo,
            feed: NotificationFeed::new(),
            clock,
            profile_list: ListState::new(),
        };
        office.refresh();
        office
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    pub fn repo_mut(&mut self) -> &mut Repository {
        &mut self.repo
    }

    /// Re-derive date-dependent flags against today.
    pub fn refresh(&mut self) {
        let today = self.clock.today();
        self.repo.refresh_events(today);
    }

    /// Restore the repository and drop all panel state and notifications.
    pub fn reset(&mut self) {
        self.repo.reset();
        self.feed = NotificationFeed::new();
        self.profile_list = ListState::new();
        self.refresh();
        tracing::info!("back office reset");
    }

    fn notify(&mut self, kind: NotificationKind, title: &str, message: String) {
        let now = self.clock.now_millis();
        self.feed.push(now, kind, title, message);
    }

    // --- Profiles panel ---

    pub fn profile_panel(&self) -> &ListState<Profile> {
        &self.profile_list
    }

    pub fn profiles_view(&self) -> Vec<&Profile> {
        self.profile_list.view(&self.repo.profiles)
    }

    /// Apply the panel's search, tabs, filters and sort. A changed tab or
    /// filter drops the selection.
    pub fn set_profile_panel(&mut self, search: &str, quick: StatusFilter, filter: ProfileFilter, sort: SortKey) {
        self.profile_list.set_search(search);
        self.profile_list.set_quick(quick);
        self.profile_list.set_filter(filter);
        self.profile_list.set_sort(sort);
    }

    pub fn reset_profile_panel(&mut self) {
        self.profile_list.reset_filters();
        self.profile_list.set_sort(SortKey::default());
    }

    /// Row checkbox. Only rows the panel currently shows can be picked; returns
    /// whether the row is selected afterwards.
    pub fn toggle_profile_selection(&mut self, id: ProfileId) -> Option<bool> {
        if !self.profiles_view().iter().any(|p| p.id == id) {
            tracing::debug!(profile_id = id, "profile not in panel, selection unchanged");
            return None;
        }
        self.profile_list.toggle(id);
        Some(self.profile_list.selection().contains(&id))
    }

    /// Header checkbox of the profiles table.
    pub fn toggle_all_profiles(&mut self) {
        self.profile_list.toggle_all(&self.repo.profiles);
    }

    // --- Profiles ---

    pub fn verify_profile(&mut self, id: ProfileId) -> bool {
        let Some(profile) = self.repo.profile_mut(id) else {
            return missing("profile", id);
        };
        profile.is_verified = true;
        profile.verification_status = Some(VerificationStatus::Verified);
        let name = profile.name.clone();

        tracing::info!(profile_id = id, "profile verified");
        self.notify(NotificationKind::Profile, "Profile verified", format!("{name} has been verified"));
        true
    }

    /// Returns the new featured flag.
    pub fn toggle_featured(&mut self, id: ProfileId) -> Option<bool> {
        let Some(profile) = self.repo.profile_mut(id) else {
            missing("profile", id);
            return None;
        };
        profile.is_featured = !profile.is_featured;
        let (name, featured) = (profile.name.clone(), profile.is_featured);

        tracing::info!(profile_id = id, featured, "profile featured flag changed");
        let message = if featured {
            format!("{name} is now featured")
        } else {
            format!("{name} is no longer featured")
        };
        self.notify(NotificationKind::Profile, "Featured status changed", message);
        Some(featured)
    }

    /// Returns the new VIP flag.
    pub fn toggle_vip(&mut self, id: ProfileId) -> Option<bool> {
        let Some(profile) = self.repo.profile_mut(id) else {
            missing("profile", id);
            return None;
        };
        profile.is_vip = !profile.is_vip;
        let (name, vip) = (profile.name.clone(), profile.is_vip);

        tracing::info!(profile_id = id, vip, "profile VIP flag changed");
        let message = if vip {
            format!("{name} is now VIP")
        } else {
            format!("{name} is no longer VIP")
        };
        self.notify(NotificationKind::Profile, "VIP status changed", message);
        Some(vip)
    }

    pub fn set_membership(&mut self, id: ProfileId, tier: Option<MembershipTier>) -> bool {
        let Some(profile) = self.repo.profile_mut(id) else {
            return missing("profile", id);
        };
        profile.membership_tier = tier;
        let name = profile.name.clone();

        tracing::info!(profile_id = id, tier = ?tier, "membership changed");
        let message = match tier {
            Some(tier) => format!("{name} is now a {tier} member"),
            None => format!("{name} no longer has a membership"),
        };
        self.notify(NotificationKind::Profile, "Membership updated", message);
        true
    }

    /// Rejecting a profile removes it.
    pub fn reject_profile(&mut self, id: ProfileId) -> bool {
        let Some(pos) = self.repo.profiles.iter().position(|p| p.id == id) else {
            return missing("profile", id);
        };
        let profile = self.repo.profiles.remove(pos);

        tracing::info!(profile_id = id, "profile rejected");
        self.notify(
            NotificationKind::Warning,
            "Profile rejected",
            format!("{} has been rejected and removed", profile.name),
        );
        true
    }

    pub fn create_profile(&mut self, draft: ProfileDraft) -> AppResult<ProfileId> {
        draft.check()?;
        let id = self.repo.next_id();
        let profile = draft.into_profile(id, self.clock.today());
        let name = profile.name.clone();
        self.repo.profiles.push(profile);

        tracing::info!(profile_id = id, "profile created");
        self.notify(NotificationKind::Profile, "Profile created", format!("{name} was added and awaits verification"));
        Ok(id)
    }

    /// Apply `action` to the selected rows still shown by the panel, then clear
    /// the selection. Returns how many profiles were changed; an empty
    /// selection does nothing.
    pub fn bulk(&mut self, action: BulkAction) -> usize {
        let visible: BTreeSet<ProfileId> = self.profile_list.visible_ids(&self.repo.profiles).into_iter().collect();
        let ids: BTreeSet<ProfileId> = self.profile_list.take_selection().intersection(&visible).copied().collect();
        if ids.is_empty() {
            return 0;
        }

        let count = match action {
            BulkAction::Delete => {
                let before = self.repo.profiles.len();
                self.repo.profiles.retain(|p| !ids.contains(&p.id));
                before - self.repo.profiles.len()
            }
            _ => {
                let mut count = 0;
                for profile in self.repo.profiles.iter_mut().filter(|p| ids.contains(&p.id)) {
                    match action {
                        BulkAction::Verify => {
                            profile.is_verified = true;
                            profile.verification_status = Some(VerificationStatus::Verified);
                        }
                        BulkAction::Feature => profile.is_featured = true,
                        BulkAction::SetMembership(tier) => profile.membership_tier = tier,
                        BulkAction::Delete => {}
                    }
                    count += 1;
                }
                count
            }
        };

        tracing::info!(action = ?action, selected = ids.len(), applied = count, "bulk action applied");
        let kind = if action == BulkAction::Delete {
            NotificationKind::Warning
        } else {
            NotificationKind::Profile
        };
        self.notify(kind, "Bulk action completed", format!("{count} profiles {}", action.describe()));
        count
    }

    // --- Reviews ---

    fn set_review_status(&mut self, id: ReviewId, status: ReviewStatus) -> bool {
        let Some(review) = self.repo.review_mut(id) else {
            return missing("review", id);
        };
        review.status = status;
        let profile_name = review.profile_name.clone();

        tracing::info!(review_id = id, status = ?status, "review moderated");
        let (kind, title, verb) = match status {
            ReviewStatus::Approved => (NotificationKind::System, "Review approved", "approved"),
            ReviewStatus::Rejected => (NotificationKind::Warning, "Review rejected", "rejected"),
            ReviewStatus::Pending => (NotificationKind::System, "Review reopened", "reopened"),
        };
        self.notify(kind, title, format!("Review for {profile_name} was {verb}"));
        true
    }

    pub fn approve_review(&mut self, id: ReviewId) -> bool {
        self.set_review_status(id, ReviewStatus::Approved)
    }

    pub fn reject_review(&mut self, id: ReviewId) -> bool {
        self.set_review_status(id, ReviewStatus::Rejected)
    }

    // --- Events ---

    pub fn create_event(&mut self, draft: EventDraft) -> AppResult<EventId> {
        draft.check()?;
        let id = self.repo.next_id();
        let event = draft.into_event(id, self.clock.today());
        let title = event.title.clone();
        self.repo.events.push(event);

        tracing::info!(event_id = id, "event created");
        self.notify(NotificationKind::System, "Event created", format!("{title} saved as draft"));
        Ok(id)
    }

    pub fn update_event(&mut self, id: EventId, draft: EventDraft) -> AppResult<bool> {
        draft.check()?;
        let today = self.clock.today();
        let Some(event) = self.repo.event_mut(id) else {
            return Ok(missing("event", id));
        };
        draft.apply_to(event, today);
        let title = event.title.clone();

        tracing::info!(event_id = id, "event updated");
        self.notify(NotificationKind::System, "Event updated", format!("{title} was updated"));
        Ok(true)
    }

    fn set_event_status(&mut self, id: EventId, status: EventStatus) -> bool {
        let today = self.clock.today();
        let Some(event) = self.repo.event_mut(id) else {
            return missing("event", id);
        };
        event.status = status;
        event.refresh_past(today);
        let title = event.title.clone();

        tracing::info!(event_id = id, status = ?status, "event status changed");
        let (title_text, verb) = match status {
            EventStatus::Published => ("Event published", "published"),
            EventStatus::Ended => ("Event ended", "ended"),
            EventStatus::Draft => ("Event unpublished", "moved back to draft"),
        };
        self.notify(NotificationKind::System, title_text, format!("{title} was {verb}"));
        true
    }

    pub fn publish_event(&mut self, id: EventId) -> bool {
        self.set_event_status(id, EventStatus::Published)
    }

    pub fn end_event(&mut self, id: EventId) -> bool {
        self.set_event_status(id, EventStatus::Ended)
    }

    pub fn delete_event(&mut self, id: EventId) -> bool {
        let Some(pos) = self.repo.events.iter().position(|e| e.id == id) else {
            return missing("event", id);
        };
        let event = self.repo.events.remove(pos);

        tracing::info!(event_id = id, "event deleted");
        self.notify(NotificationKind::Warning, "Event deleted", format!("{} was deleted", event.title));
        true
    }

    // --- Advertisements ---

    pub fn create_ad(&mut self, draft: AdDraft) -> AppResult<AdId> {
        draft.check()?;
        let id = self.repo.next_id();
        let ad = draft.into_ad(id);
        let title = ad.title.clone();
        self.repo.ads.push(ad);

        tracing::info!(ad_id = id, "advertisement created");
        self.notify(NotificationKind::System, "Advertisement created", format!("{title} saved as draft"));
        Ok(id)
    }

    pub fn update_ad(&mut self, id: AdId, draft: AdDraft) -> AppResult<bool> {
        draft.check()?;
        let Some(ad) = self.repo.ad_mut(id) else {
            return Ok(missing("advertisement", id));
        };
        draft.apply_to(ad);
        let title = ad.title.clone();

        tracing::info!(ad_id = id, "advertisement updated");
        self.notify(NotificationKind::System, "Advertisement updated", format!("{title} was updated"));
        Ok(true)
    }

    fn set_ad_status(&mut self, id: AdId, status: AdStatus) -> bool {
        let Some(ad) = self.repo.ad_mut(id) else {
            return missing("advertisement", id);
        };
        ad.status = status;
        let title = ad.title.clone();

        tracing::info!(ad_id = id, status = ?status, "advertisement status changed");
        let (title_text, verb) = match status {
            AdStatus::Active => ("Advertisement activated", "activated"),
            AdStatus::Ended => ("Advertisement ended", "ended"),
            AdStatus::Draft => ("Advertisement paused", "moved back to draft"),
        };
        self.notify(NotificationKind::System, title_text, format!("{title} was {verb}"));
        true
    }

    pub fn activate_ad(&mut self, id: AdId) -> bool {
        self.set_ad_status(id, AdStatus::Active)
    }

    pub fn end_ad(&mut self, id: AdId) -> bool {
        self.set_ad_status(id, AdStatus::Ended)
    }

    pub fn delete_ad(&mut self, id: AdId) -> bool {
        let Some(pos) = self.repo.ads.iter().position(|a| a.id == id) else {
            return missing("advertisement", id);
        };
        let ad = self.repo.ads.remove(pos);

        tracing::info!(ad_id = id, "advertisement deleted");
        self.notify(NotificationKind::Warning, "Advertisement deleted", format!("{} was deleted", ad.title));
        true
    }

    // --- Members ---

    pub fn set_member_active(&mut self, id: MemberId, active: bool) -> bool {
        let Some(member) = self.repo.member_mut(id) else {
            return missing("member", id);
        };
        member.status = if active { MemberStatus::Active } else { MemberStatus::Inactive };
        let username = member.username.clone();

        tracing::info!(member_id = id, active, "member status changed");
        let verb = if active { "activated" } else { "deactivated" };
        self.notify(NotificationKind::System, "Member status changed", format!("{username} was {verb}"));
        true
    }

    /// Both `reason` and `evidence` must be non-blank.
    pub fn blacklist_member(&mut self, id: MemberId, reason: &str, evidence: &str) -> AppResult<bool> {
        let (reason, evidence) = (reason.trim(), evidence.trim());
        if reason.is_empty() || evidence.is_empty() {
            return Err(AppError::new(
                ErrorCode::BlacklistDetailsRequired,
                "a reason and evidence are required to blacklist a member",
            ));
        }

        let Some(member) = self.repo.member_mut(id) else {
            return Ok(missing("member", id));
        };
        member.is_blacklisted = true;
        member.blacklist_reason = Some(reason.to_string());
        member.blacklist_evidence = Some(evidence.to_string());
        let username = member.username.clone();

        tracing::info!(member_id = id, "member blacklisted");
        self.notify(NotificationKind::Warning, "Member blacklisted", format!("{username}: {reason}"));
        Ok(true)
    }

    pub fn remove_from_blacklist(&mut self, id: MemberId) -> bool {
        let Some(member) = self.repo.member_mut(id) else {
            return missing("member", id);
        };
        member.is_blacklisted = false;
        member.blacklist_reason = None;
        member.blacklist_evidence = None;
        let username = member.username.clone();

        tracing::info!(member_id = id, "member removed from blacklist");
        self.notify(NotificationKind::System, "Blacklist updated", format!("{username} was removed from the blacklist"));
        true
    }

    // --- Notifications & stats ---

    pub fn notifications(&self) -> &[Notification] {
        self.feed.items()
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    pub fn mark_notification_read(&mut self, id: i64) -> bool {
        self.feed.mark_read(id)
    }

    pub fn mark_all_notifications_read(&mut self) -> usize {
        self.feed.mark_all_read()
    }

    pub fn clear_notifications(&mut self) {
        self.feed.clear();
    }

    /// Record a payment in the feed.
    pub fn notify_payment(&mut self, profile_id: ProfileId, amount_cents: u32) {
        let name = self
            .repo
            .profile(profile_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("profile #{profile_id}"));
        let message = format!("Contact for {name} unlocked ({}.{:02})", amount_cents / 100, amount_cents % 100);
        self.notify(NotificationKind::Payment, "Payment received", message);
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::collect(&self.repo, &self.feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use vitrine_catalog::{Choice, ContactInfo, ProfileStatus};
    use vitrine_shared::FixedClock;

    fn office() -> BackOffice {
        let clock = FixedClock::ymd(2026, 10, 19);
        BackOffice::new(Repository::seeded(clock.today()), Arc::new(clock))
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn verify_sets_flag_and_notifies() {
        let mut office = office();
        assert!(office.verify_profile(3));
        let profile = office.repo().profile(3).unwrap();
        assert!(profile.is_verified);
        assert_eq!(profile.verification_status, Some(VerificationStatus::Verified));
        assert_eq!(office.notifications().len(), 1);
        assert_eq!(office.notifications()[0].kind, NotificationKind::Profile);
    }

    #[test]
    fn unknown_id_is_a_silent_no_op() {
        let mut office = office();
        assert!(!office.verify_profile(999));
        assert!(!office.reject_profile(999));
        assert_eq!(office.toggle_featured(999), None);
        assert!(!office.approve_review(999));
        assert!(!office.publish_event(999));
        assert!(!office.delete_ad(999));
        assert!(!office.remove_from_blacklist(999));
        assert!(office.notifications().is_empty());
    }

    #[test]
    fn double_reject_is_idempotent() {
        let mut office = office();
        assert!(office.reject_profile(5));
        assert!(!office.reject_profile(5));
        assert!(office.repo().profile(5).is_none());
        assert_eq!(office.notifications().len(), 1);
    }

    #[test]
    fn toggles_flip_back() {
        let mut office = office();
        assert_eq!(office.toggle_featured(3), Some(true));
        assert_eq!(office.toggle_featured(3), Some(false));
        assert_eq!(office.toggle_vip(3), Some(true));
        assert!(office.set_membership(3, Some(MembershipTier::Gold)));
        assert_eq!(office.repo().profile(3).unwrap().membership_tier, Some(MembershipTier::Gold));
    }

    #[test]
    fn bulk_verify_over_filtered_selection() {
        let mut office = office();
        let pending_only = ProfileFilter {
            status: Choice::Only(ProfileStatus::Pending),
            ..Default::default()
        };
        office.set_profile_panel("", Choice::All, pending_only, SortKey::Newest);
        let pending = office.profiles_view().len();
        office.toggle_all_profiles();
        assert_eq!(office.profile_list.selection().len(), pending);

        assert_eq!(office.bulk(BulkAction::Verify), pending);
        assert!(office.profile_list.selection().is_empty());
        assert!(!office.profile_list.selection().all_selected());
        assert!(office.repo().profiles.iter().all(|p| p.is_verified));

        assert_eq!(office.notifications().len(), 1);
        assert_eq!(office.notifications()[0].message, format!("{pending} profiles verified"));
    }

    #[test]
    fn selection_is_scoped_to_the_panel() {
        let mut office = office();
        let berlin = ProfileFilter {
            location: "berlin".into(),
            ..Default::default()
        };
        office.set_profile_panel("", Choice::All, berlin.clone(), SortKey::Newest);

        // Hidden rows cannot be picked.
        assert_eq!(office.toggle_profile_selection(2), None);
        assert_eq!(office.toggle_profile_selection(1), Some(true));
        assert_eq!(office.toggle_profile_selection(4), Some(true));

        // Narrowing the search keeps the selection, but the bulk action only
        // touches rows still shown.
        office.set_profile_panel("olivia", Choice::All, berlin, SortKey::Newest);
        assert_eq!(office.profile_panel().selection().len(), 2);
        assert_eq!(office.bulk(BulkAction::Feature), 1);
        assert!(office.repo().profile(4).unwrap().is_featured);
        assert_eq!(office.notifications()[0].message, "1 profiles featured");

        // A filter change drops the selection.
        office.toggle_profile_selection(4);
        office.set_profile_panel("", Choice::Only(ProfileStatus::Verified), ProfileFilter::default(), SortKey::Newest);
        assert!(office.profile_panel().selection().is_empty());

        office.reset_profile_panel();
        assert_eq!(office.profiles_view().len(), 12);
    }

    #[test]
    fn bulk_delete_and_membership() {
        let mut office = office();
        office.toggle_profile_selection(1);
        office.toggle_profile_selection(2);
        assert_eq!(office.bulk(BulkAction::SetMembership(None)), 2);
        assert_eq!(office.repo().profile(1).unwrap().membership_tier, None);

        office.toggle_profile_selection(1);
        office.toggle_profile_selection(2);
        assert_eq!(office.bulk(BulkAction::Delete), 2);
        assert_eq!(office.repo().profiles.len(), 10);
        assert_eq!(office.notifications()[0].kind, NotificationKind::Warning);
    }

    #[test]
    fn bulk_on_empty_selection_does_nothing() {
        let mut office = office();
        assert_eq!(office.bulk(BulkAction::Feature), 0);
        assert!(office.notifications().is_empty());
    }

    #[test]
    fn bulk_skips_ids_removed_meanwhile() {
        let mut office = office();
        office.toggle_profile_selection(3);
        office.toggle_profile_selection(4);
        office.reject_profile(4);
        assert_eq!(office.bulk(BulkAction::Feature), 1);
    }

    #[test]
    fn create_profile_validates_draft() {
        let mut office = office();
        let draft = ProfileDraft {
            name: "Nora".into(),
            age: 17,
            location: "Bremen".into(),
            image: String::new(),
            about: String::new(),
            price: Some(1000),
            membership_tier: None,
            is_vip: false,
            contact: ContactInfo::default(),
        };
        assert!(office.create_profile(draft.clone()).is_err());
        assert!(office.notifications().is_empty());

        let id = office.create_profile(ProfileDraft { age: 21, ..draft }).unwrap();
        let profile = office.repo().profile(id).unwrap();
        assert_eq!(profile.submitted_at, date(10, 19));
        assert!(!profile.is_verified);
    }

    #[test]
    fn review_moderation() {
        let mut office = office();
        assert!(office.approve_review(3));
        assert_eq!(office.repo().review(3).unwrap().status, ReviewStatus::Approved);
        assert!(office.reject_review(5));
        assert_eq!(office.repo().review(5).unwrap().status, ReviewStatus::Rejected);
        assert_eq!(office.stats().pending_reviews, 0);
    }

    #[test]
    fn event_lifecycle() {
        let mut office = office();
        let id = office
            .create_event(EventDraft {
                title: "Winter Ball".into(),
                location: "Vienna".into(),
                description: String::new(),
                start_date: date(12, 20),
                end_date: date(12, 21),
            })
            .unwrap();
        assert_eq!(office.repo().event(id).unwrap().status, EventStatus::Draft);

        assert!(office.publish_event(id));
        assert!(!office.repo().event(id).unwrap().is_past);

        assert!(office.end_event(id));
        assert!(office.repo().event(id).unwrap().is_past);

        assert!(office.delete_event(id));
        assert!(office.repo().event(id).is_none());
    }

    #[test]
    fn ad_lifecycle() {
        let mut office = office();
        let draft = AdDraft {
            title: "Spa Weekend".into(),
            advertiser: "Thermal Spa".into(),
            placement: "sidebar".into(),
            start_date: date(11, 1),
            end_date: date(11, 30),
        };
        let id = office.create_ad(draft.clone()).unwrap();
        assert!(office.activate_ad(id));
        assert!(office.update_ad(id, AdDraft { title: "Spa Week".into(), ..draft }).unwrap());
        let ad = office.repo().ads.iter().find(|a| a.id == id).unwrap();
        assert_eq!(ad.title, "Spa Week");
        assert_eq!(ad.status, AdStatus::Active);
        assert!(office.end_ad(id));
    }

    #[test]
    fn blacklist_requires_reason_and_evidence() {
        let mut office = office();
        let err = office.blacklist_member(1, "Abuse", "  ").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::BlacklistDetailsRequired));
        assert!(!office.repo().members[0].is_blacklisted);

        assert!(office.blacklist_member(1, "Abuse", "Screenshots").unwrap());
        let member = &office.repo().members[0];
        assert!(member.is_blacklisted);
        assert_eq!(member.blacklist_reason.as_deref(), Some("Abuse"));

        assert!(office.remove_from_blacklist(1));
        let member = &office.repo().members[0];
        assert!(!member.is_blacklisted);
        assert!(member.blacklist_reason.is_none() && member.blacklist_evidence.is_none());
    }

    #[test]
    fn member_activation() {
        let mut office = office();
        assert!(office.set_member_active(3, true));
        assert_eq!(office.repo().members[2].status, MemberStatus::Active);
    }

    #[test]
    fn notification_feed_management() {
        let mut office = office();
        office.verify_profile(3);
        office.toggle_vip(3);
        office.notify_payment(1, 999);
        assert_eq!(office.stats().unread_notifications, 3);
        assert_eq!(office.notifications()[0].message, "Contact for Sophia unlocked (9.99)");

        let id = office.notifications()[2].id;
        assert!(office.mark_notification_read(id));
        assert_eq!(office.mark_all_notifications_read(), 2);
        office.clear_notifications();
        assert!(office.notifications().is_empty());
    }

    #[test]
    fn reset_restores_everything() {
        let mut office = office();
        office.toggle_profile_selection(1);
        office.bulk(BulkAction::Delete);
        office.reset();
        assert_eq!(office.repo().profiles.len(), 12);
        assert!(office.notifications().is_empty());
        assert!(office.profile_list.selection().is_empty());
    }

    #[test]
    fn dashboard_counts_seed() {
        let stats = office().stats();
        assert_eq!(stats.total_profiles, 12);
        assert_eq!(stats.pending_verifications, 5);
        assert_eq!(stats.featured_profiles, 3);
        assert_eq!(stats.vip_profiles, 3);
        assert_eq!(stats.pending_reviews, 2);
        assert_eq!(stats.published_events, 2);
        assert_eq!(stats.active_ads, 1);
        assert_eq!(stats.blacklisted_members, 1);
    }
}
