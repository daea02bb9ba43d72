use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Review, ReviewId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Like,
    Dislike,
}

/// Helpful / not helpful votes: at most one active vote per viewer and review.
#[derive(Debug, Clone, Default)]
pub struct ReviewVotes<V: Eq + std::hash::Hash> {
    active: HashMap<(ReviewId, V), Vote>,
}

impl<V: Eq + std::hash::Hash + Clone> ReviewVotes<V> {
    pub fn new() -> Self {
        Self { active: HashMap::new() }
    }

    pub fn current(&self, review_id: ReviewId, viewer: &V) -> Option<Vote> {
        self.active.get(&(review_id, viewer.clone())).copied()
    }

    /// Apply a click on `vote`. Repeating the active vote withdraws it,
    /// the other button moves it. Returns the vote left active.
    pub fn cast(&mut self, review: &mut Review, viewer: V, vote: Vote) -> Option<Vote> {
        let key = (review.id, viewer);
        match self.active.get(&key).copied() {
            Some(active) if active == vote => {
                self.active.remove(&key);
                withdraw(review, vote);
                None
            }
            Some(active) => {
                withdraw(review, active);
                add(review, vote);
                self.active.insert(key, vote);
                Some(vote)
            }
            None => {
                add(review, vote);
                self.active.insert(key, vote);
                Some(vote)
            }
        }
    }

}

fn add(review: &mut Review, vote: Vote) {
    match vote {
        Vote::Like => review.likes = review.likes.saturating_add(1),
        Vote::Dislike => review.dislikes = review.dislikes.saturating_add(1),
    }
}

fn withdraw(review: &mut Review, vote: Vote) {
    match vote {
        Vote::Like => review.likes = review.likes.saturating_sub(1),
        Vote::Dislike => review.dislikes = review.dislikes.saturating_sub(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review() -> Review {
        Review { id: 1, likes: 4, dislikes: 1, ..Default::default() }
    }

    #[test]
    fn repeat_vote_toggles_off() {
        let mut votes = ReviewVotes::new();
        let mut r = review();
        assert_eq!(votes.cast(&mut r, "viewer-a", Vote::Like), Some(Vote::Like));
        assert_eq!(r.likes, 5);
        assert_eq!(votes.cast(&mut r, "viewer-a", Vote::Like), None);
        assert_eq!(r.likes, 4);
        assert_eq!(votes.current(1, &"viewer-a"), None);
    }

    #[test]
    fn switching_moves_the_vote() {
        let mut votes = ReviewVotes::new();
        let mut r = review();
        votes.cast(&mut r, "viewer-a", Vote::Like);
        votes.cast(&mut r, "viewer-a", Vote::Dislike);
        assert_eq!((r.likes, r.dislikes), (4, 2));
        assert_eq!(votes.current(1, &"viewer-a"), Some(Vote::Dislike));
    }

    #[test]
    fn viewers_vote_independently() {
        let mut votes = ReviewVotes::new();
        let mut r = review();
        votes.cast(&mut r, "viewer-a", Vote::Like);
        votes.cast(&mut r, "viewer-b", Vote::Like);
        assert_eq!(r.likes, 6);
        assert_eq!(votes.current(1, &"viewer-b"), Some(Vote::Like));
    }
}
