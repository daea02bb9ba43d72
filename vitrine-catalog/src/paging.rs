/// "Load more" window over an already filtered and sorted list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMore {
    page_size: usize,
    pages: usize,
}

impl LoadMore {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            pages: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn visible_len(&self, total: usize) -> usize {
        (self.page_size * self.pages).min(total)
    }

    pub fn window<'a, T>(&self, list: &'a [T]) -> &'a [T] {
        &list[..self.visible_len(list.len())]
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible_len(total) < total
    }

    /// Reveal one more page; a no-op once everything is shown.
    pub fn load_more(&mut self, total: usize) -> bool {
        if self.has_more(total) {
            self.pages += 1;
            true
        } else {
            false
        }
    }

    /// Back to the first page, e.g. after the filters changed.
    pub fn reset(&mut self) {
        self.pages = 1;
    }
}

impl Default for LoadMore {
    fn default() -> Self {
        Self::new(12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_by_one_page_until_exhausted() {
        let list: Vec<u32> = (0..25).collect();
        let mut paging = LoadMore::new(10);
        assert_eq!(paging.window(&list).len(), 10);
        assert!(paging.load_more(list.len()));
        assert_eq!(paging.window(&list).len(), 20);
        assert!(paging.load_more(list.len()));
        assert_eq!(paging.window(&list).len(), 25);
        assert!(!paging.has_more(list.len()));
        assert!(!paging.load_more(list.len()));
    }

    #[test]
    fn reset_returns_to_first_page() {
        let list: Vec<u32> = (0..25).collect();
        let mut paging = LoadMore::new(10);
        paging.load_more(list.len());
        paging.reset();
        assert_eq!(paging.window(&list), &list[..10]);
    }

    #[test]
    fn short_list_fits_first_page() {
        let list = [1, 2, 3];
        let paging = LoadMore::default();
        assert_eq!(paging.window(&list), &list);
        assert!(!paging.has_more(list.len()));
    }
}
