use serde::Deserialize;

use crate::error::CatalogError;
use crate::models::{
    AdStatus, Advertisement, Event, EventStatus, MemberAccount, MemberStatus, MembershipTier,
    Profile, ProfileId, Review, ReviewStatus,
};
use crate::sort::SortKey;

// --- Predicate ---

/// Conjunction of clauses over one record. Clauses run in insertion order and
/// evaluation stops at the first one that fails. No clauses means "accept all".
pub struct Predicate<'a, T: ?Sized> {
    clauses: Vec<Box<dyn Fn(&T) -> bool + 'a>>,
}

impl<'a, T: ?Sized> Predicate<'a, T> {
    pub fn always() -> Self {
        Self { clauses: Vec::new() }
    }

    pub fn and(mut self, clause: impl Fn(&T) -> bool + 'a) -> Self {
        self.clauses.push(Box::new(clause));
        self
    }

    pub fn is_vacuous(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn test(&self, record: &T) -> bool {
        self.clauses.iter().all(|clause| clause(record))
    }
}

impl<T: ?Sized> Default for Predicate<'_, T> {
    fn default() -> Self {
        Self::always()
    }
}

/// Filter settings that can be turned into a [`Predicate`].
pub trait RecordFilter<T> {
    fn predicate(&self) -> Predicate<'_, T>;
}

/// A screen with no quick filter.
impl<T> RecordFilter<T> for () {
    fn predicate(&self) -> Predicate<'_, T> {
        Predicate::always()
    }
}

// --- Tokens ---

/// Wire spelling of a single-select filter value.
pub trait Token: Sized + Copy + 'static {
    const FIELD: &'static str;
    const TABLE: &'static [(&'static str, Self)];

    fn parse_token(value: &str) -> Result<Self, CatalogError> {
        let wanted = value.trim().to_ascii_lowercase();
        Self::TABLE
            .iter()
            .find(|(token, _)| *token == wanted)
            .map(|(_, v)| *v)
            .ok_or_else(|| CatalogError::UnknownToken {
                field: Self::FIELD,
                value: value.to_string(),
            })
    }
}

/// `"all"` (or empty) versus one concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice<S> {
    All,
    Only(S),
}

impl<S> Default for Choice<S> {
    fn default() -> Self {
        Choice::All
    }
}

impl<S: Token + PartialEq> Choice<S> {
    pub fn parse(value: &str) -> Result<Self, CatalogError> {
        match value.trim() {
            "" => Ok(Choice::All),
            v if v.eq_ignore_ascii_case("all") => Ok(Choice::All),
            v => S::parse_token(v).map(Choice::Only),
        }
    }

    pub fn admits(&self, value: S) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => *wanted == value,
        }
    }
}

// --- Profiles ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStatus {
    /// Not verified yet.
    Pending,
    Verified,
    Featured,
}

impl Token for ProfileStatus {
    const FIELD: &'static str = "status";
    const TABLE: &'static [(&'static str, Self)] = &[
        ("pending", ProfileStatus::Pending),
        ("verified", ProfileStatus::Verified),
        ("featured", ProfileStatus::Featured),
    ];
}

pub type StatusFilter = Choice<ProfileStatus>;

impl RecordFilter<Profile> for StatusFilter {
    fn predicate(&self) -> Predicate<'_, Profile> {
        match self {
            Choice::All => Predicate::always(),
            Choice::Only(ProfileStatus::Pending) => Predicate::always().and(|p: &Profile| !p.is_verified),
            Choice::Only(ProfileStatus::Verified) => Predicate::always().and(|p: &Profile| p.is_verified),
            Choice::Only(ProfileStatus::Featured) => Predicate::always().and(|p: &Profile| p.is_featured),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TierFilter {
    #[default]
    All,
    /// Profiles without any tier.
    None,
    Tier(MembershipTier),
}

impl TierFilter {
    pub fn parse(value: &str) -> Result<Self, CatalogError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(TierFilter::All),
            "none" => Ok(TierFilter::None),
            "silver" => Ok(TierFilter::Tier(MembershipTier::Silver)),
            "gold" => Ok(TierFilter::Tier(MembershipTier::Gold)),
            "diamond" => Ok(TierFilter::Tier(MembershipTier::Diamond)),
            _ => Err(CatalogError::UnknownToken {
                field: "membership_tier",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VipFilter {
    #[default]
    All,
    Vip,
    NonVip,
}

impl VipFilter {
    pub fn parse(value: &str) -> Result<Self, CatalogError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(VipFilter::All),
            "vip" => Ok(VipFilter::Vip),
            "non-vip" => Ok(VipFilter::NonVip),
            _ => Err(CatalogError::UnknownToken {
                field: "vip",
                value: value.to_string(),
            }),
        }
    }
}

/// Inclusive price bounds. Unset bounds add no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl PriceRange {
    /// Parse the two text inputs of the price form; an empty input means unset.
    pub fn parse(min: &str, max: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            min: parse_bound("min", min)?,
            max: parse_bound("max", max)?,
        })
    }
}

fn parse_bound(bound: &'static str, value: &str) -> Result<Option<u32>, CatalogError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| CatalogError::InvalidPrice {
            bound,
            value: value.to_string(),
        })
}

/// Advanced filter of the profiles screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFilter {
    pub status: StatusFilter,
    pub membership_tier: TierFilter,
    pub vip: VipFilter,
    pub price_range: PriceRange,
    pub location: String,
}

impl ProfileFilter {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl RecordFilter<Profile> for ProfileFilter {
    fn predicate(&self) -> Predicate<'_, Profile> {
        let mut pred = self.status.predicate();

        match self.membership_tier {
            TierFilter::All => {}
            TierFilter::None => pred = pred.and(|p: &Profile| p.membership_tier.is_none()),
            TierFilter::Tier(tier) => pred = pred.and(move |p: &Profile| p.membership_tier == Some(tier)),
        }

        match self.vip {
            VipFilter::All => {}
            VipFilter::Vip => pred = pred.and(|p: &Profile| p.is_vip),
            VipFilter::NonVip => pred = pred.and(|p: &Profile| !p.is_vip),
        }

        if let Some(min) = self.price_range.min {
            // A zero price counts as "no price" and never satisfies a minimum.
            pred = pred.and(move |p: &Profile| matches!(p.price, Some(price) if price != 0 && price >= min));
        }

        if let Some(max) = self.price_range.max {
            pred = pred.and(move |p: &Profile| p.price.map_or(true, |price| price <= max));
        }

        if !self.location.is_empty() {
            let needle = self.location.to_lowercase();
            pred = pred.and(move |p: &Profile| p.location.to_lowercase().contains(&needle));
        }

        pred
    }
}

/// Raw query of the profiles screen as it arrives from a form or query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileQuery {
    pub search: String,
    /// Legacy quick filter tabs, same tokens as `status`.
    pub filter: String,
    pub status: String,
    pub membership_tier: String,
    pub vip: String,
    pub min_price: String,
    pub max_price: String,
    pub location: String,
    pub sort: String,
}

impl ProfileQuery {
    pub fn parse(&self) -> Result<(StatusFilter, ProfileFilter, SortKey), CatalogError> {
        let quick = StatusFilter::parse(&self.filter)?;
        let filter = ProfileFilter {
            status: StatusFilter::parse(&self.status)?,
            membership_tier: TierFilter::parse(&self.membership_tier)?,
            vip: VipFilter::parse(&self.vip)?,
            price_range: PriceRange::parse(&self.min_price, &self.max_price)?,
            location: self.location.clone(),
        };
        let sort = SortKey::parse_or_default(&self.sort)?;
        Ok((quick, filter, sort))
    }
}

// --- Reviews ---

impl Token for ReviewStatus {
    const FIELD: &'static str = "status";
    const TABLE: &'static [(&'static str, Self)] = &[
        ("pending", ReviewStatus::Pending),
        ("approved", ReviewStatus::Approved),
        ("rejected", ReviewStatus::Rejected),
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub status: Choice<ReviewStatus>,
    /// Lowest accepted rating, 1..=5.
    pub min_rating: Option<u8>,
    pub profile_id: Option<ProfileId>,
}

impl RecordFilter<Review> for ReviewFilter {
    fn predicate(&self) -> Predicate<'_, Review> {
        let mut pred = Predicate::always();
        if let Choice::Only(status) = self.status {
            pred = pred.and(move |r: &Review| r.status == status);
        }
        if let Some(min) = self.min_rating {
            pred = pred.and(move |r: &Review| r.rating >= min);
        }
        if let Some(profile_id) = self.profile_id {
            pred = pred.and(move |r: &Review| r.profile_id == profile_id);
        }
        pred
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewQuery {
    pub search: String,
    pub status: String,
    pub min_rating: Option<u8>,
    pub profile_id: Option<ProfileId>,
    pub sort: String,
}

impl ReviewQuery {
    pub fn parse(&self) -> Result<(ReviewFilter, SortKey), CatalogError> {
        if let Some(rating) = self.min_rating {
            if !(1..=5).contains(&rating) {
                return Err(CatalogError::InvalidRating(rating));
            }
        }
        let filter = ReviewFilter {
            status: Choice::parse(&self.status)?,
            min_rating: self.min_rating,
            profile_id: self.profile_id,
        };
        Ok((filter, SortKey::parse_or_default(&self.sort)?))
    }
}

// --- Events ---

impl Token for EventStatus {
    const FIELD: &'static str = "status";
    const TABLE: &'static [(&'static str, Self)] = &[
        ("draft", EventStatus::Draft),
        ("published", EventStatus::Published),
        ("ended", EventStatus::Ended),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    pub status: Choice<EventStatus>,
    pub show_past: bool,
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            status: Choice::All,
            show_past: true,
        }
    }
}

impl RecordFilter<Event> for EventFilter {
    fn predicate(&self) -> Predicate<'_, Event> {
        let mut pred = Predicate::always();
        if let Choice::Only(status) = self.status {
            pred = pred.and(move |e: &Event| e.status == status);
        }
        if !self.show_past {
            pred = pred.and(|e: &Event| !e.is_past);
        }
        pred
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EventQuery {
    pub search: String,
    pub status: String,
    pub show_past: bool,
    pub sort: String,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: String::new(),
            show_past: true,
            sort: String::new(),
        }
    }
}

impl EventQuery {
    pub fn parse(&self) -> Result<(EventFilter, SortKey), CatalogError> {
        let filter = EventFilter {
            status: Choice::parse(&self.status)?,
            show_past: self.show_past,
        };
        Ok((filter, SortKey::parse_or_default(&self.sort)?))
    }
}

// --- Advertisements ---

impl Token for AdStatus {
    const FIELD: &'static str = "status";
    const TABLE: &'static [(&'static str, Self)] = &[
        ("draft", AdStatus::Draft),
        ("active", AdStatus::Active),
        ("ended", AdStatus::Ended),
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdFilter {
    pub status: Choice<AdStatus>,
}

impl RecordFilter<Advertisement> for AdFilter {
    fn predicate(&self) -> Predicate<'_, Advertisement> {
        match self.status {
            Choice::All => Predicate::always(),
            Choice::Only(status) => Predicate::always().and(move |a: &Advertisement| a.status == status),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdQuery {
    pub search: String,
    pub status: String,
    pub sort: String,
}

impl AdQuery {
    pub fn parse(&self) -> Result<(AdFilter, SortKey), CatalogError> {
        let filter = AdFilter { status: Choice::parse(&self.status)? };
        Ok((filter, SortKey::parse_or_default(&self.sort)?))
    }
}

// --- Members ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberState {
    Active,
    Inactive,
    Blacklisted,
}

impl Token for MemberState {
    const FIELD: &'static str = "status";
    const TABLE: &'static [(&'static str, Self)] = &[
        ("active", MemberState::Active),
        ("inactive", MemberState::Inactive),
        ("blacklisted", MemberState::Blacklisted),
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    pub status: Choice<MemberState>,
}

impl RecordFilter<MemberAccount> for MemberFilter {
    fn predicate(&self) -> Predicate<'_, MemberAccount> {
        match self.status {
            Choice::All => Predicate::always(),
            Choice::Only(MemberState::Active) => {
                Predicate::always().and(|m: &MemberAccount| m.status == MemberStatus::Active)
            }
            Choice::Only(MemberState::Inactive) => {
                Predicate::always().and(|m: &MemberAccount| m.status == MemberStatus::Inactive)
            }
            Choice::Only(MemberState::Blacklisted) => {
                Predicate::always().and(|m: &MemberAccount| m.is_blacklisted)
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MemberQuery {
    pub search: String,
    pub status: String,
    pub sort: String,
}

impl MemberQuery {
    pub fn parse(&self) -> Result<(MemberFilter, SortKey), CatalogError> {
        let filter = MemberFilter { status: Choice::parse(&self.status)? };
        Ok((filter, SortKey::parse_or_default(&self.sort)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: u64) -> Profile {
        Profile {
            id,
            name: format!("P{id}"),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Profile> {
        vec![
            Profile { price: Some(0), location: "Berlin".into(), ..profile(1) },
            Profile { price: Some(5000), is_verified: true, location: "Paris".into(), ..profile(2) },
            Profile {
                price: None,
                is_featured: true,
                is_vip: true,
                membership_tier: Some(MembershipTier::Gold),
                location: "North Berlin".into(),
                ..profile(3)
            },
            Profile {
                price: Some(1000),
                is_verified: true,
                membership_tier: Some(MembershipTier::Diamond),
                location: "Rome".into(),
                ..profile(4)
            },
        ]
    }

    fn passing(filter: &ProfileFilter, records: &[Profile]) -> Vec<u64> {
        let pred = filter.predicate();
        records.iter().filter(|p| pred.test(p)).map(|p| p.id).collect()
    }

    #[test]
    fn default_filter_is_vacuous() {
        let filter = ProfileFilter::default();
        let pred = filter.predicate();
        assert!(pred.is_vacuous());
        assert!(sample().iter().all(|p| pred.test(p)));
    }

    #[test]
    fn empty_strings_parse_to_defaults() {
        let (quick, filter, sort) = ProfileQuery::default().parse().unwrap();
        assert_eq!(quick, Choice::All);
        assert!(filter.is_default());
        assert_eq!(sort, SortKey::Newest);
    }

    #[test]
    fn zero_price_fails_min_bound() {
        let filter = ProfileFilter {
            price_range: PriceRange::parse("1000", "").unwrap(),
            ..Default::default()
        };
        // id 1 has price 0, id 3 has no price.
        assert_eq!(passing(&filter, &sample()), vec![2, 4]);
    }

    #[test]
    fn min_bound_of_zero_still_excludes_missing_prices() {
        let filter = ProfileFilter {
            price_range: PriceRange::parse("0", "").unwrap(),
            ..Default::default()
        };
        assert_eq!(passing(&filter, &sample()), vec![2, 4]);
    }

    #[test]
    fn max_bound_is_inclusive_and_passes_missing_price() {
        let filter = ProfileFilter {
            price_range: PriceRange::parse("", "1000").unwrap(),
            ..Default::default()
        };
        assert_eq!(passing(&filter, &sample()), vec![1, 3, 4]);
    }

    #[test]
    fn both_bounds_inclusive() {
        let filter = ProfileFilter {
            price_range: PriceRange::parse("1000", "5000").unwrap(),
            ..Default::default()
        };
        assert_eq!(passing(&filter, &sample()), vec![2, 4]);
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let err = PriceRange::parse("cheap", "").unwrap_err();
        assert_eq!(
            err,
            CatalogError::InvalidPrice { bound: "min", value: "cheap".into() }
        );
    }

    #[test]
    fn status_variants() {
        let records = sample();
        let by_status = |s: &str| {
            let filter = ProfileFilter { status: StatusFilter::parse(s).unwrap(), ..Default::default() };
            passing(&filter, &records)
        };
        assert_eq!(by_status("all"), vec![1, 2, 3, 4]);
        assert_eq!(by_status("pending"), vec![1, 3]);
        assert_eq!(by_status("verified"), vec![2, 4]);
        assert_eq!(by_status("featured"), vec![3]);
    }

    #[test]
    fn tier_and_vip_variants() {
        let records = sample();
        let tier = |t: &str| {
            let filter = ProfileFilter { membership_tier: TierFilter::parse(t).unwrap(), ..Default::default() };
            passing(&filter, &records)
        };
        assert_eq!(tier("none"), vec![1, 2]);
        assert_eq!(tier("gold"), vec![3]);
        assert_eq!(tier("diamond"), vec![4]);

        let vip = |v: &str| {
            let filter = ProfileFilter { vip: VipFilter::parse(v).unwrap(), ..Default::default() };
            passing(&filter, &records)
        };
        assert_eq!(vip("vip"), vec![3]);
        assert_eq!(vip("non-vip"), vec![1, 2, 4]);
    }

    #[test]
    fn location_is_case_insensitive_substring() {
        let filter = ProfileFilter { location: "berLIN".into(), ..Default::default() };
        assert_eq!(passing(&filter, &sample()), vec![1, 3]);
    }

    #[test]
    fn two_fields_combine_with_and() {
        let records = sample();
        let status = ProfileFilter { status: StatusFilter::parse("verified").unwrap(), ..Default::default() };
        let tier = ProfileFilter { membership_tier: TierFilter::parse("diamond").unwrap(), ..Default::default() };
        let both = ProfileFilter {
            status: status.status,
            membership_tier: tier.membership_tier,
            ..Default::default()
        };

        let (ps, pt, pb) = (status.predicate(), tier.predicate(), both.predicate());
        for record in &records {
            assert_eq!(pb.test(record), ps.test(record) && pt.test(record), "record {}", record.id);
        }
    }

    #[test]
    fn evaluation_stops_at_first_failing_clause() {
        use std::cell::Cell;
        let calls = Cell::new(0);
        let pred = Predicate::<Profile>::always()
            .and(|_| false)
            .and(|_| {
                calls.set(calls.get() + 1);
                true
            });
        assert!(!pred.test(&profile(1)));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn unknown_tokens_are_errors() {
        assert!(StatusFilter::parse("archived").is_err());
        assert!(TierFilter::parse("platinum").is_err());
        assert!(VipFilter::parse("yes").is_err());
        assert!(ProfileQuery { sort: "random".into(), ..Default::default() }.parse().is_err());
    }

    #[test]
    fn tokens_are_trimmed_and_case_folded() {
        assert_eq!(StatusFilter::parse(" Verified ").unwrap(), Choice::Only(ProfileStatus::Verified));
        assert_eq!(TierFilter::parse("GOLD").unwrap(), TierFilter::Tier(MembershipTier::Gold));
    }

    #[test]
    fn review_filter_combines_status_rating_and_profile() {
        let reviews = vec![
            Review { id: 1, rating: 5, profile_id: 1, status: ReviewStatus::Approved, ..Default::default() },
            Review { id: 2, rating: 2, profile_id: 1, status: ReviewStatus::Approved, ..Default::default() },
            Review { id: 3, rating: 5, profile_id: 2, status: ReviewStatus::Pending, ..Default::default() },
        ];
        let query = ReviewQuery {
            status: "approved".into(),
            min_rating: Some(4),
            ..Default::default()
        };
        let (filter, _) = query.parse().unwrap();
        let pred = filter.predicate();
        let ids: Vec<_> = reviews.iter().filter(|r| pred.test(r)).map(|r| r.id).collect();
        assert_eq!(ids, vec![1]);

        let bad = ReviewQuery { min_rating: Some(6), ..Default::default() };
        assert_eq!(bad.parse().unwrap_err(), CatalogError::InvalidRating(6));
    }

    #[test]
    fn event_filter_can_hide_past() {
        let events = vec![
            Event { id: 1, is_past: true, status: EventStatus::Ended, ..Default::default() },
            Event { id: 2, status: EventStatus::Published, ..Default::default() },
        ];
        let filter = EventFilter { show_past: false, ..Default::default() };
        let pred = filter.predicate();
        let ids: Vec<_> = events.iter().filter(|e| pred.test(e)).map(|e| e.id).collect();
        assert_eq!(ids, vec![2]);
        assert!(EventFilter::default().predicate().is_vacuous());
    }

    #[test]
    fn member_filter_blacklisted() {
        let members = vec![
            MemberAccount { id: 1, is_blacklisted: true, status: MemberStatus::Inactive, ..Default::default() },
            MemberAccount { id: 2, ..Default::default() },
        ];
        let filter = MemberFilter { status: Choice::parse("blacklisted").unwrap() };
        let pred = filter.predicate();
        assert!(pred.test(&members[0]));
        assert!(!pred.test(&members[1]));
    }
}
