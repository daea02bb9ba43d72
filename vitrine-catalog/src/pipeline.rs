use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt::Debug;

use crate::filter::{AdFilter, EventFilter, MemberFilter, ProfileFilter, RecordFilter, ReviewFilter, StatusFilter};
use crate::models::{Advertisement, Event, MemberAccount, Profile, Review};
use crate::selection::Selection;
use crate::sort::{self, SortKey};

/// A record type that can be shown on a list screen.
pub trait Listing: Sized {
    type Id: Copy + Ord + Debug;
    /// Single-select tabs above the list.
    type Quick: RecordFilter<Self> + Default + Clone + PartialEq;
    /// The advanced filter panel.
    type Filter: RecordFilter<Self> + Default + Clone + PartialEq;

    fn id(&self) -> Self::Id;

    /// Free-text match; `needle` is already lowercased and non-empty.
    fn matches_text(&self, needle: &str) -> bool;

    fn compare(a: &Self, b: &Self, key: SortKey) -> Ordering;
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl Listing for Profile {
    type Id = u64;
    type Quick = StatusFilter;
    type Filter = ProfileFilter;

    fn id(&self) -> u64 {
        self.id
    }

    fn matches_text(&self, needle: &str) -> bool {
        contains_folded(&self.name, needle) || contains_folded(&self.location, needle)
    }

    fn compare(a: &Self, b: &Self, key: SortKey) -> Ordering {
        sort::compare_profiles(a, b, key)
    }
}

impl Listing for Review {
    type Id = u64;
    type Quick = ();
    type Filter = ReviewFilter;

    fn id(&self) -> u64 {
        self.id
    }

    fn matches_text(&self, needle: &str) -> bool {
        contains_folded(&self.reviewer_name, needle)
            || contains_folded(&self.profile_name, needle)
            || contains_folded(&self.content, needle)
    }

    fn compare(a: &Self, b: &Self, key: SortKey) -> Ordering {
        sort::compare_reviews(a, b, key)
    }
}

impl Listing for Event {
    type Id = u64;
    type Quick = ();
    type Filter = EventFilter;

    fn id(&self) -> u64 {
        self.id
    }

    fn matches_text(&self, needle: &str) -> bool {
        contains_folded(&self.title, needle) || contains_folded(&self.location, needle)
    }

    fn compare(a: &Self, b: &Self, key: SortKey) -> Ordering {
        sort::compare_events(a, b, key)
    }
}

impl Listing for Advertisement {
    type Id = u64;
    type Quick = ();
    type Filter = AdFilter;

    fn id(&self) -> u64 {
        self.id
    }

    fn matches_text(&self, needle: &str) -> bool {
        contains_folded(&self.title, needle) || contains_folded(&self.advertiser, needle)
    }

    fn compare(a: &Self, b: &Self, key: SortKey) -> Ordering {
        sort::compare_ads(a, b, key)
    }
}

impl Listing for MemberAccount {
    type Id = u64;
    type Quick = ();
    type Filter = MemberFilter;

    fn id(&self) -> u64 {
        self.id
    }

    fn matches_text(&self, needle: &str) -> bool {
        contains_folded(&self.username, needle) || contains_folded(&self.email, needle)
    }

    fn compare(a: &Self, b: &Self, key: SortKey) -> Ordering {
        sort::compare_members(a, b, key)
    }
}

/// Search, quick filter, advanced filter, then a stable sort. `source` is only borrowed.
pub fn run_pipeline<'s, T: Listing>(
    source: &'s [T],
    search: &str,
    quick: &T::Quick,
    filter: &T::Filter,
    sort_key: SortKey,
) -> Vec<&'s T> {
    let needle = search.to_lowercase();
    let searched: Vec<&T> = if needle.is_empty() {
        source.iter().collect()
    } else {
        source.iter().filter(|r| r.matches_text(&needle)).collect()
    };

    let mut filtered = searched;
    for pred in [quick.predicate(), filter.predicate()] {
        if !pred.is_vacuous() {
            filtered.retain(|r| pred.test(r));
        }
    }

    filtered.sort_by(|a, b| T::compare(a, b, sort_key));
    filtered
}

/// Everything a list screen keeps between renders.
pub struct ListState<T: Listing> {
    search: String,
    quick: T::Quick,
    filter: T::Filter,
    sort: SortKey,
    selection: Selection<T::Id>,
}

impl<T: Listing> Default for ListState<T> {
    fn default() -> Self {
        Self {
            search: String::new(),
            quick: T::Quick::default(),
            filter: T::Filter::default(),
            sort: SortKey::default(),
            selection: Selection::new(),
        }
    }
}

impl<T: Listing> ListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Changing the quick tabs drops the selection.
    pub fn set_quick(&mut self, quick: T::Quick) {
        if self.quick != quick {
            self.quick = quick;
            self.selection.clear();
        }
    }

    /// Changing the advanced filter drops the selection.
    pub fn set_filter(&mut self, filter: T::Filter) {
        if self.filter != filter {
            self.filter = filter;
            self.selection.clear();
        }
    }

    pub fn reset_filters(&mut self) {
        self.set_quick(T::Quick::default());
        self.set_filter(T::Filter::default());
        self.search.clear();
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.sort = key;
    }

    pub fn view<'s>(&self, source: &'s [T]) -> Vec<&'s T> {
        run_pipeline(source, &self.search, &self.quick, &self.filter, self.sort)
    }

    pub fn visible_ids(&self, source: &[T]) -> Vec<T::Id> {
        self.view(source).into_iter().map(|r| r.id()).collect()
    }

    pub fn selection(&self) -> &Selection<T::Id> {
        &self.selection
    }

    pub fn toggle(&mut self, id: T::Id) {
        self.selection.toggle(id);
    }

    /// "Select all" over what the current filters show, never the whole source.
    pub fn toggle_all(&mut self, source: &[T]) {
        let visible = self.visible_ids(source);
        self.selection.toggle_all(visible);
    }

    pub fn take_selection(&mut self) -> BTreeSet<T::Id> {
        self.selection.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Choice, PriceRange, ProfileStatus, TierFilter};
    use crate::models::MembershipTier;
    use chrono::NaiveDate;

    fn profiles() -> Vec<Profile> {
        (1..=10)
            .map(|id| Profile {
                id,
                name: format!("Model {id}"),
                location: if id % 2 == 0 { "Berlin".into() } else { "Munich".into() },
                price: Some(id as u32 * 100),
                is_verified: id <= 3,
                is_featured: id == 2,
                membership_tier: (id == 5).then_some(MembershipTier::Gold),
                submitted_at: NaiveDate::from_ymd_opt(2024, 1, id as u32).unwrap(),
                ..Default::default()
            })
            .collect()
    }

    fn ids(list: &[&Profile]) -> Vec<u64> {
        list.iter().map(|p| p.id).collect()
    }

    #[test]
    fn vacuous_pipeline_only_sorts() {
        let source = profiles();
        let state = ListState::<Profile>::new();
        let view = state.view(&source);
        assert_eq!(ids(&view), (1..=10).rev().collect::<Vec<_>>());
    }

    #[test]
    fn search_matches_name_or_location() {
        let source = profiles();
        let mut state = ListState::<Profile>::new();
        state.set_sort(SortKey::Oldest);

        state.set_search("BERLIN");
        assert_eq!(ids(&state.view(&source)), vec![2, 4, 6, 8, 10]);

        state.set_search("model 1");
        assert_eq!(ids(&state.view(&source)), vec![1, 10]);
    }

    #[test]
    fn quick_and_advanced_status_must_both_pass() {
        let source = profiles();
        let mut state = ListState::<Profile>::new();
        state.set_sort(SortKey::Oldest);
        state.set_quick(Choice::Only(ProfileStatus::Verified));
        state.set_filter(ProfileFilter {
            status: Choice::Only(ProfileStatus::Featured),
            ..Default::default()
        });
        assert_eq!(ids(&state.view(&source)), vec![2]);

        state.set_quick(Choice::Only(ProfileStatus::Pending));
        assert!(state.view(&source).is_empty());
    }

    #[test]
    fn pipeline_does_not_touch_source() {
        let source = profiles();
        let copy = source.clone();
        let mut state = ListState::<Profile>::new();
        state.set_sort(SortKey::PriceHigh);
        state.set_filter(ProfileFilter {
            price_range: PriceRange { min: Some(300), max: None },
            ..Default::default()
        });
        let _ = state.view(&source);
        assert_eq!(source, copy);
    }

    #[test]
    fn select_all_is_scoped_to_filtered_list() {
        let source = profiles();
        let mut state = ListState::<Profile>::new();
        state.set_filter(ProfileFilter {
            status: Choice::Only(ProfileStatus::Verified),
            ..Default::default()
        });
        state.toggle_all(&source);
        let selected: Vec<u64> = state.selection().ids().iter().copied().collect();
        assert_eq!(selected, vec![1, 2, 3]);
    }

    #[test]
    fn filter_change_clears_selection() {
        let source = profiles();
        let mut state = ListState::<Profile>::new();
        state.toggle_all(&source);
        assert_eq!(state.selection().len(), 10);

        state.set_filter(ProfileFilter {
            membership_tier: TierFilter::Tier(MembershipTier::Gold),
            ..Default::default()
        });
        assert!(state.selection().is_empty());
        assert!(!state.selection().all_selected());
    }

    #[test]
    fn identical_filter_keeps_selection() {
        let mut state = ListState::<Profile>::new();
        state.toggle(3);
        state.set_filter(ProfileFilter::default());
        state.set_search("model");
        assert!(state.selection().contains(&3));
    }

    #[test]
    fn reviews_search_content() {
        let reviews = vec![
            Review { id: 1, content: "Lovely evening".into(), ..Default::default() },
            Review { id: 2, reviewer_name: "Evelyn".into(), ..Default::default() },
            Review { id: 3, content: "ok".into(), ..Default::default() },
        ];
        let mut state = ListState::<Review>::new();
        state.set_search("eve");
        let mut found: Vec<u64> = state.view(&reviews).iter().map(|r| r.id).collect();
        found.sort_unstable();
        assert_eq!(found, vec![1, 2]);
    }
}
