use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use vitrine_catalog::{
    AdId, Advertisement, ContactInfo, Event, EventId, MembershipTier, Profile, ProfileId, VerificationStatus,
};
use vitrine_shared::{AppError, AppResult, ErrorCode};

fn check_dates(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
    if end < start {
        return Err(AppError::new(ErrorCode::ValidationError, "end date must not be before start date"));
    }
    Ok(())
}

// --- Profile ---

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProfileDraft {
    #[validate(length(min = 1, max = 80, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 18, max = 99, message = "age must be between 18 and 99"))]
    pub age: u32,
    #[validate(length(min = 1, max = 120, message = "location is required"))]
    pub location: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub price: Option<u32>,
    #[serde(default)]
    pub membership_tier: Option<MembershipTier>,
    #[serde(default)]
    pub is_vip: bool,
    #[serde(default)]
    pub contact: ContactInfo,
}

impl ProfileDraft {
    pub fn check(&self) -> AppResult<()> {
        self.validate().map_err(|e| {
            let details = serde_json::to_value(e.field_errors()).unwrap_or_default();
            AppError::with_details(ErrorCode::InvalidProfileDraft, "profile draft is incomplete", details)
        })?;
        if self.name.trim().is_empty() || self.location.trim().is_empty() {
            return Err(AppError::new(ErrorCode::InvalidProfileDraft, "name and location are required"));
        }
        Ok(())
    }

    /// New unverified profile submitted today.
    pub fn into_profile(self, id: ProfileId, today: NaiveDate) -> Profile {
        Profile {
            id,
            name: self.name.trim().to_string(),
            age: self.age,
            location: self.location.trim().to_string(),
            image: self.image,
            about: self.about,
            price: self.price,
            is_verified: false,
            is_featured: false,
            is_vip: self.is_vip,
            membership_tier: self.membership_tier,
            contact: self.contact,
            verification_status: Some(VerificationStatus::Pending),
            submitted_at: today,
        }
    }
}

// --- Event ---

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EventDraft {
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    #[validate(length(min = 1, max = 120))]
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl EventDraft {
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        check_dates(self.start_date, self.end_date)
    }

    pub fn into_event(self, id: EventId, today: NaiveDate) -> Event {
        let mut event = Event { id, ..Default::default() };
        self.apply_to(&mut event, today);
        event
    }

    /// Overwrite the editable fields; status, attendees and ID stay.
    pub fn apply_to(self, event: &mut Event, today: NaiveDate) {
        event.title = self.title;
        event.location = self.location;
        event.description = self.description;
        event.start_date = self.start_date;
        event.end_date = self.end_date;
        event.refresh_past(today);
    }
}

// --- Advertisement ---

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdDraft {
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    #[validate(length(min = 1, max = 120))]
    pub advertiser: String,
    #[validate(length(min = 1, max = 60))]
    pub placement: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl AdDraft {
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        check_dates(self.start_date, self.end_date)
    }

    pub fn into_ad(self, id: AdId) -> Advertisement {
        let mut ad = Advertisement { id, ..Default::default() };
        self.apply_to(&mut ad);
        ad
    }

    pub fn apply_to(self, ad: &mut Advertisement) {
        ad.title = self.title;
        ad.advertiser = self.advertiser;
        ad.placement = self.placement;
        ad.start_date = self.start_date;
        ad.end_date = self.end_date;
    }
}
