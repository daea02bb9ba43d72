use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::models::{Advertisement, Event, MemberAccount, Profile, Review};

/// Sort selection shared by every list screen.
///
/// Keys that mean nothing for a record type compare as equal there, so the
/// stable sort keeps the incoming order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    PriceHigh,
    PriceLow,
    NameAsc,
    NameDesc,
    RatingHigh,
    RatingLow,
    MostLiked,
}

impl SortKey {
    pub const ALL: [SortKey; 9] = [
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::PriceHigh,
        SortKey::PriceLow,
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::RatingHigh,
        SortKey::RatingLow,
        SortKey::MostLiked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::PriceHigh => "price-high",
            SortKey::PriceLow => "price-low",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::RatingHigh => "rating-high",
            SortKey::RatingLow => "rating-low",
            SortKey::MostLiked => "most-liked",
        }
    }

    /// Empty input selects the default key.
    pub fn parse_or_default(value: &str) -> Result<Self, CatalogError> {
        if value.trim().is_empty() {
            Ok(SortKey::default())
        } else {
            value.parse()
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| CatalogError::UnknownSortKey(s.to_string()))
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-folded name order; names differing only in case put lowercase first.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

pub fn compare_profiles(a: &Profile, b: &Profile, key: SortKey) -> Ordering {
    match key {
        SortKey::Newest => b.submitted_at.cmp(&a.submitted_at),
        SortKey::Oldest => a.submitted_at.cmp(&b.submitted_at),
        SortKey::PriceHigh => b.price.unwrap_or(0).cmp(&a.price.unwrap_or(0)),
        SortKey::PriceLow => a.price.unwrap_or(0).cmp(&b.price.unwrap_or(0)),
        SortKey::NameAsc => compare_names(&a.name, &b.name),
        SortKey::NameDesc => compare_names(&b.name, &a.name),
        SortKey::RatingHigh | SortKey::RatingLow | SortKey::MostLiked => Ordering::Equal,
    }
}

pub fn compare_reviews(a: &Review, b: &Review, key: SortKey) -> Ordering {
    match key {
        SortKey::Newest => b.date.cmp(&a.date),
        SortKey::Oldest => a.date.cmp(&b.date),
        SortKey::RatingHigh => b.rating.cmp(&a.rating),
        SortKey::RatingLow => a.rating.cmp(&b.rating),
        SortKey::MostLiked => b.likes.cmp(&a.likes),
        SortKey::NameAsc => compare_names(&a.reviewer_name, &b.reviewer_name),
        SortKey::NameDesc => compare_names(&b.reviewer_name, &a.reviewer_name),
        SortKey::PriceHigh | SortKey::PriceLow => Ordering::Equal,
    }
}

/// Past events always trail upcoming ones; the key only orders within each group.
pub fn compare_events(a: &Event, b: &Event, key: SortKey) -> Ordering {
    a.is_past.cmp(&b.is_past).then_with(|| match key {
        SortKey::Oldest => a.start_date.cmp(&b.start_date),
        SortKey::NameAsc => compare_names(&a.title, &b.title),
        SortKey::NameDesc => compare_names(&b.title, &a.title),
        SortKey::MostLiked => b.attendees.cmp(&a.attendees),
        _ => b.start_date.cmp(&a.start_date),
    })
}

pub fn compare_ads(a: &Advertisement, b: &Advertisement, key: SortKey) -> Ordering {
    match key {
        SortKey::Newest => b.start_date.cmp(&a.start_date),
        SortKey::Oldest => a.start_date.cmp(&b.start_date),
        SortKey::NameAsc => compare_names(&a.title, &b.title),
        SortKey::NameDesc => compare_names(&b.title, &a.title),
        SortKey::MostLiked => b.clicks.cmp(&a.clicks),
        _ => Ordering::Equal,
    }
}

pub fn compare_members(a: &MemberAccount, b: &MemberAccount, key: SortKey) -> Ordering {
    match key {
        SortKey::Newest => b.joined_at.cmp(&a.joined_at),
        SortKey::Oldest => a.joined_at.cmp(&b.joined_at),
        SortKey::NameAsc => compare_names(&a.username, &b.username),
        SortKey::NameDesc => compare_names(&b.username, &a.username),
        _ => Ordering::Equal,
    }
}
