use chrono::{Duration, NaiveDate};

use vitrine_catalog::{
    AdStatus, Advertisement, ContactInfo, Event, EventStatus, MemberAccount, MemberStatus, MembershipTier, Profile,
    Review, ReviewStatus, VerificationStatus,
};

/// Owned in-memory collections behind every screen.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    pub profiles: Vec<Profile>,
    pub reviews: Vec<Review>,
    pub events: Vec<Event>,
    pub ads: Vec<Advertisement>,
    pub members: Vec<MemberAccount>,
    seeded_on: Option<NaiveDate>,
    next_id: u64,
}

impl Repository {
    pub fn empty() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Demo data with dates laid out around `today`.
    pub fn seeded(today: NaiveDate) -> Self {
        let days_ago = |n: i64| today - Duration::days(n);
        let days_ahead = |n: i64| today + Duration::days(n);

        let profiles = vec![
            seed_profile(1, "Sophia", 24, "Berlin", Some(3000), days_ago(2))
                .verified()
                .featured()
                .tier(MembershipTier::Diamond)
                .vip()
                .contact("+49 30 1234567", "sophia@vitrine.test"),
            seed_profile(2, "Isabella", 27, "Munich", Some(2500), days_ago(5))
                .verified()
                .tier(MembershipTier::Gold)
                .contact("+49 89 7654321", "isabella@vitrine.test"),
            seed_profile(3, "Emma", 22, "Hamburg", Some(1800), days_ago(1)),
            seed_profile(4, "Olivia", 29, "Berlin", Some(4000), days_ago(12))
                .verified()
                .featured()
                .vip()
                .tier(MembershipTier::Gold),
            seed_profile(5, "Ava", 25, "Cologne", None, days_ago(3)),
            seed_profile(6, "Mia", 23, "Frankfurt", Some(0), days_ago(8)).tier(MembershipTier::Silver),
            seed_profile(7, "Charlotte", 31, "Munich", Some(5000), days_ago(20))
                .verified()
                .tier(MembershipTier::Diamond)
                .contact("+49 89 1112223", "charlotte@vitrine.test"),
            seed_profile(8, "amelia", 26, "Stuttgart", Some(2200), days_ago(6)).verified(),
            seed_profile(9, "Harper", 28, "Düsseldorf", Some(2800), days_ago(4)).tier(MembershipTier::Silver),
            seed_profile(10, "Evelyn", 30, "Leipzig", Some(1500), days_ago(9)).verified().vip(),
            seed_profile(11, "Luna", 21, "Berlin", Some(1200), days_ago(0)),
            seed_profile(12, "Chloe", 24, "Hamburg", Some(3500), days_ago(15))
                .verified()
                .featured()
                .tier(MembershipTier::Silver),
        ];

        let reviews = vec![
            seed_review(1, 1, "Sophia", "Alex", 5, "Wonderful company, very professional.", days_ago(3), ReviewStatus::Approved, 12, 1),
            seed_review(2, 2, "Isabella", "Marco", 4, "Great evening, arrived on time.", days_ago(4), ReviewStatus::Approved, 7, 0),
            seed_review(3, 4, "Olivia", "Jonas", 3, "Nice, but the photos are a bit old.", days_ago(1), ReviewStatus::Pending, 2, 3),
            seed_review(4, 7, "Charlotte", "Liam", 5, "Elegant and charming.", days_ago(10), ReviewStatus::Approved, 20, 2),
            seed_review(5, 3, "Emma", "Noah", 1, "Did not show up.", days_ago(2), ReviewStatus::Pending, 0, 5),
            seed_review(6, 10, "Evelyn", "Felix", 4, "Friendly and relaxed.", days_ago(6), ReviewStatus::Rejected, 1, 1),
        ];

        let events = vec![
            seed_event(1, "Summer Gala", "Berlin", days_ahead(14), days_ahead(14), EventStatus::Published, 120),
            seed_event(2, "Spring Mixer", "Munich", days_ago(30), days_ago(30), EventStatus::Ended, 80),
            seed_event(3, "Autumn Soirée", "Hamburg", days_ahead(45), days_ahead(46), EventStatus::Draft, 0),
            seed_event(4, "VIP Night", "Frankfurt", days_ago(3), days_ago(2), EventStatus::Published, 45),
        ];

        let ads = vec![
            seed_ad(1, "Homepage Banner", "Luxe Hotels", "homepage-top", days_ago(10), days_ahead(20), AdStatus::Active, 340, 12000),
            seed_ad(2, "Sidebar Spot", "Night Club Aurora", "sidebar", days_ago(40), days_ago(10), AdStatus::Ended, 95, 5000),
            seed_ad(3, "Profile Footer", "Limousine Service", "profile-footer", days_ahead(5), days_ahead(35), AdStatus::Draft, 0, 0),
        ];

        let members = vec![
            seed_member(1, "alex", "alex@mail.test", days_ago(100), MemberStatus::Active),
            seed_member(2, "marco", "marco@mail.test", days_ago(80), MemberStatus::Active),
            seed_member(3, "jonas", "jonas@mail.test", days_ago(45), MemberStatus::Inactive),
            MemberAccount {
                is_blacklisted: true,
                blacklist_reason: Some("Repeated no-shows".into()),
                blacklist_evidence: Some("Reports #112, #118".into()),
                ..seed_member(4, "spammer", "spam@mail.test", days_ago(20), MemberStatus::Inactive)
            },
            seed_member(5, "noah", "noah@mail.test", days_ago(5), MemberStatus::Active),
        ];

        let mut repo = Self {
            profiles,
            reviews,
            events,
            ads,
            members,
            seeded_on: Some(today),
            next_id: 100,
        };
        repo.refresh_events(today);
        repo
    }

    /// Back to the state this repository was created in.
    pub fn reset(&mut self) {
        *self = match self.seeded_on {
            Some(today) => Self::seeded(today),
            None => Self::empty(),
        };
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded_on.is_some()
    }

    /// Next free record ID, shared by every collection.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn refresh_events(&mut self, today: NaiveDate) {
        for event in &mut self.events {
            event.refresh_past(today);
        }
    }

    pub fn profile(&self, id: u64) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn profile_mut(&mut self, id: u64) -> Option<&mut Profile> {
        self.profiles.iter_mut().find(|p| p.id == id)
    }

    pub fn review(&self, id: u64) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == id)
    }

    pub fn review_mut(&mut self, id: u64) -> Option<&mut Review> {
        self.reviews.iter_mut().find(|r| r.id == id)
    }

    pub fn event(&self, id: u64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn event_mut(&mut self, id: u64) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id)
    }

    pub fn ad_mut(&mut self, id: u64) -> Option<&mut Advertisement> {
        self.ads.iter_mut().find(|a| a.id == id)
    }

    pub fn member_mut(&mut self, id: u64) -> Option<&mut MemberAccount> {
        self.members.iter_mut().find(|m| m.id == id)
    }
}

// --- Seed helpers ---

fn seed_profile(id: u64, name: &str, age: u32, location: &str, price: Option<u32>, submitted_at: NaiveDate) -> Profile {
    Profile {
        id,
        name: name.to_string(),
        age,
        location: location.to_string(),
        image: format!("https://images.vitrine.test/profiles/{id}.jpg"),
        about: format!("Hi, I'm {name} from {location}."),
        price,
        verification_status: Some(VerificationStatus::Pending),
        submitted_at,
        ..Default::default()
    }
}

trait SeedProfile {
    fn verified(self) -> Self;
    fn featured(self) -> Self;
    fn vip(self) -> Self;
    fn tier(self, tier: MembershipTier) -> Self;
    fn contact(self, phone: &str, email: &str) -> Self;
}

impl SeedProfile for Profile {
    fn verified(mut self) -> Self {
        self.is_verified = true;
        self.verification_status = Some(VerificationStatus::Verified);
        self
    }

    fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    fn vip(mut self) -> Self {
        self.is_vip = true;
        self
    }

    fn tier(mut self, tier: MembershipTier) -> Self {
        self.membership_tier = Some(tier);
        self
    }

    fn contact(mut self, phone: &str, email: &str) -> Self {
        self.contact = ContactInfo {
            phone: Some(phone.to_string()),
            email: Some(email.to_string()),
            ..Default::default()
        };
        self
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_review(
    id: u64,
    profile_id: u64,
    profile_name: &str,
    reviewer_name: &str,
    rating: u8,
    content: &str,
    date: NaiveDate,
    status: ReviewStatus,
    likes: u32,
    dislikes: u32,
) -> Review {
    Review {
        id,
        reviewer_id: id + 1000,
        reviewer_name: reviewer_name.to_string(),
        profile_id,
        profile_name: profile_name.to_string(),
        rating,
        content: content.to_string(),
        date,
        likes,
        dislikes,
        status,
    }
}

fn seed_event(
    id: u64,
    title: &str,
    location: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: EventStatus,
    attendees: u32,
) -> Event {
    Event {
        id,
        title: title.to_string(),
        location: location.to_string(),
        description: format!("{title} in {location}."),
        start_date,
        end_date,
        status,
        is_past: false,
        attendees,
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_ad(
    id: u64,
    title: &str,
    advertiser: &str,
    placement: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: AdStatus,
    clicks: u32,
    impressions: u32,
) -> Advertisement {
    Advertisement {
        id,
        title: title.to_string(),
        advertiser: advertiser.to_string(),
        placement: placement.to_string(),
        start_date,
        end_date,
        status,
        clicks,
        impressions,
    }
}

fn seed_member(id: u64, username: &str, email: &str, joined_at: NaiveDate, status: MemberStatus) -> MemberAccount {
    MemberAccount {
        id,
        username: username.to_string(),
        email: email.to_string(),
        status,
        joined_at,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn seed_flags_past_events() {
        let repo = Repository::seeded(today());
        let past: Vec<u64> = repo.events.iter().filter(|e| e.is_past).map(|e| e.id).collect();
        assert_eq!(past, vec![2, 4]);
    }

    #[test]
    fn blacklisted_seeds_carry_reason_and_evidence() {
        let repo = Repository::seeded(today());
        for member in repo.members.iter().filter(|m| m.is_blacklisted) {
            assert!(member.blacklist_reason.is_some());
            assert!(member.blacklist_evidence.is_some());
        }
    }

    #[test]
    fn ids_do_not_collide_with_seeds() {
        let mut repo = Repository::seeded(today());
        let id = repo.next_id();
        assert!(repo.profile(id).is_none());
        assert_eq!(repo.next_id(), id + 1);
    }

    #[test]
    fn reset_restores_seed() {
        let mut repo = Repository::seeded(today());
        repo.profiles.clear();
        repo.next_id();
        repo.reset();
        assert_eq!(repo.profiles.len(), 12);
        assert_eq!(repo.next_id(), 100);
    }

    #[test]
    fn empty_reset_stays_empty() {
        let mut repo = Repository::empty();
        repo.profiles.push(Profile::default());
        repo.reset();
        assert!(repo.profiles.is_empty());
        assert!(!repo.is_seeded());
    }
}
