use std::collections::BTreeSet;

/// Selected record IDs for bulk actions, with the cached "select all" checkbox.
///
/// The flag is not derived from the set: it is set by [`Selection::toggle_all`]
/// and only cleared by `toggle_all`, [`Selection::clear`] or [`Selection::take`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<Id: Ord> {
    ids: BTreeSet<Id>,
    select_all: bool,
}

impl<Id: Ord + Copy> Selection<Id> {
    pub fn new() -> Self {
        Self {
            ids: BTreeSet::new(),
            select_all: false,
        }
    }

    pub fn toggle(&mut self, id: Id) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Clear when the checkbox is on, otherwise select exactly `visible`.
    pub fn toggle_all(&mut self, visible: impl IntoIterator<Item = Id>) {
        if self.select_all {
            self.ids.clear();
            self.select_all = false;
        } else {
            self.ids = visible.into_iter().collect();
            self.select_all = true;
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.select_all = false;
    }

    /// Hand the selected IDs to a bulk action and reset.
    pub fn take(&mut self) -> BTreeSet<Id> {
        self.select_all = false;
        std::mem::take(&mut self.ids)
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &BTreeSet<Id> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn all_selected(&self) -> bool {
        self.select_all
    }
}

impl<Id: Ord + Copy> Default for Selection<Id> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(sel: &Selection<u64>) -> Vec<u64> {
        sel.ids().iter().copied().collect()
    }

    #[test]
    fn toggle_twice_restores() {
        let mut sel = Selection::new();
        sel.toggle(4);
        let before = sel.clone();
        sel.toggle(9);
        sel.toggle(9);
        assert_eq!(sel, before);
        sel.toggle(4);
        assert!(sel.is_empty());
    }

    #[test]
    fn toggle_all_selects_only_visible() {
        let mut sel = Selection::new();
        sel.toggle_all([3u64, 7, 8]);
        assert_eq!(ids(&sel), vec![3, 7, 8]);
        assert!(sel.all_selected());
    }

    #[test]
    fn toggle_all_twice_with_grown_list() {
        let mut sel = Selection::new();
        sel.toggle_all([2u64, 3]);
        assert_eq!(ids(&sel), vec![2, 3]);

        // The visible list grew to [2, 3, 4]; the checkbox is still on.
        sel.toggle_all([2u64, 3, 4]);
        assert!(sel.is_empty());
        assert!(!sel.all_selected());

        sel.toggle_all([2u64, 3, 4]);
        assert_eq!(ids(&sel), vec![2, 3, 4]);
    }

    #[test]
    fn single_toggle_does_not_touch_flag() {
        let mut sel = Selection::new();
        sel.toggle_all([1u64, 2]);
        sel.toggle(1);
        assert!(sel.all_selected());
        assert_eq!(ids(&sel), vec![2]);
    }

    #[test]
    fn take_resets_set_and_flag() {
        let mut sel = Selection::new();
        sel.toggle_all([5u64, 6]);
        let taken = sel.take();
        assert_eq!(taken.into_iter().collect::<Vec<_>>(), vec![5, 6]);
        assert!(sel.is_empty());
        assert!(!sel.all_selected());
    }
}
