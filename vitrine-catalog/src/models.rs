use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type ProfileId = u64;
pub type ReviewId = u64;
pub type EventId = u64;
pub type AdId = u64;
pub type MemberId = u64;

// --- Profile ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    Silver,
    Gold,
    Diamond,
}

impl MembershipTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipTier::Silver => "silver",
            MembershipTier::Gold => "gold",
            MembershipTier::Diamond => "diamond",
        }
    }
}

impl std::fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

/// Contact fields revealed by an unlock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_contact: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none()
            && self.email.is_none()
            && self.telegram.is_none()
            && self.whatsapp.is_none()
            && self.other_contact.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub age: u32,
    pub location: String,
    pub image: String,
    pub about: String,
    pub price: Option<u32>,
    pub is_verified: bool,
    pub is_featured: bool,
    pub is_vip: bool,
    pub membership_tier: Option<MembershipTier>,
    #[serde(default)]
    pub contact: ContactInfo,
    pub verification_status: Option<VerificationStatus>,
    pub submitted_at: NaiveDate,
}

/// Listing card for the public browse screen: contact fields stay hidden until unlocked.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileCard {
    pub id: ProfileId,
    pub name: String,
    pub age: u32,
    pub location: String,
    pub image: String,
    pub price: Option<u32>,
    pub is_verified: bool,
    pub is_featured: bool,
    pub is_vip: bool,
    pub membership_tier: Option<MembershipTier>,
    pub has_contact: bool,
}

impl From<&Profile> for ProfileCard {
    fn from(p: &Profile) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            age: p.age,
            location: p.location.clone(),
            image: p.image.clone(),
            price: p.price,
            is_verified: p.is_verified,
            is_featured: p.is_featured,
            is_vip: p.is_vip,
            membership_tier: p.membership_tier,
            has_contact: !p.contact.is_empty(),
        }
    }
}

// --- Review ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub reviewer_id: u64,
    pub reviewer_name: String,
    pub profile_id: ProfileId,
    pub profile_name: String,
    pub rating: u8,
    pub content: String,
    pub date: NaiveDate,
    pub likes: u32,
    pub dislikes: u32,
    pub status: ReviewStatus,
}

// --- Event ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    Ended,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub location: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: EventStatus,
    pub is_past: bool,
    pub attendees: u32,
}

impl Event {
    /// Re-derive `is_past` against today: ended status or an end date already behind us.
    pub fn refresh_past(&mut self, today: NaiveDate) {
        self.is_past = self.status == EventStatus::Ended || self.end_date < today;
    }
}

// --- Advertisement ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdStatus {
    #[default]
    Draft,
    Active,
    Ended,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Advertisement {
    pub id: AdId,
    pub title: String,
    pub advertiser: String,
    pub placement: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: AdStatus,
    pub clicks: u32,
    pub impressions: u32,
}

impl Advertisement {
    /// Click-through rate in percent, 0 when nothing was shown yet.
    pub fn ctr(&self) -> f64 {
        if self.impressions == 0 {
            0.0
        } else {
            f64::from(self.clicks) * 100.0 / f64::from(self.impressions)
        }
    }
}

// --- Member (admin view of a user account) ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberAccount {
    pub id: MemberId,
    pub username: String,
    pub email: String,
    pub status: MemberStatus,
    pub joined_at: NaiveDate,
    pub is_blacklisted: bool,
    pub blacklist_reason: Option<String>,
    pub blacklist_evidence: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_hides_contact_fields() {
        let profile = Profile {
            id: 7,
            name: "Mia".into(),
            contact: ContactInfo {
                telegram: Some("@mia".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let card = ProfileCard::from(&profile);
        assert!(card.has_contact);
        let json = serde_json::to_value(&card).unwrap();
        assert!(json.get("contact").is_none());
    }

    #[test]
    fn event_past_follows_end_date_or_status() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut event = Event {
            end_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            status: EventStatus::Published,
            ..Default::default()
        };
        event.refresh_past(today);
        assert!(!event.is_past);

        event.status = EventStatus::Ended;
        event.refresh_past(today);
        assert!(event.is_past);
    }

    #[test]
    fn ad_ctr_handles_zero_impressions() {
        let mut ad = Advertisement::default();
        assert_eq!(ad.ctr(), 0.0);
        ad.impressions = 200;
        ad.clicks = 5;
        assert!((ad.ctr() - 2.5).abs() < f64::EPSILON);
    }
}
