use std::collections::HashMap;

use itertools::Itertools;

use crate::{
    model::{Review, Reviewer},
    overlay::IndexedReview,
};

/// Reviewers paired with their ready review, in the order the reviewer lookup
/// returned them.
#[derive(Debug, Clone, Default)]
pub struct ReviewerMap {
    /// One entry per reviewer id.
    entries: Vec<(Reviewer, IndexedReview)>,
}

impl ReviewerMap {
    /// Pairs each fetched reviewer with their ready review. Reviewers without
    /// a ready review are left out, as are repeated reviewer ids.
    pub fn build<'a, I>(reviewers: Vec<Reviewer>, ready: I) -> Self
    where
        I: IntoIterator<Item = &'a Review>,
    {
        let mut by_reviewer: HashMap<u64, &Review> = HashMap::new();
        for review in ready {
            by_reviewer.entry(review.reviewer_id).or_insert(review);
        }

        let entries = reviewers
            .into_iter()
            .unique_by(|r| r.id)
            .filter_map(|reviewer| {
                by_reviewer
                    .get(&reviewer.id)
                    .map(|&review| (reviewer, IndexedReview::new(review.clone())))
            })
            .collect();

        Self { entries }
    }

    /// Returns the review of the reviewer with `reviewer_id`.
    pub fn get(&self, reviewer_id: u64) -> Option<&IndexedReview> {
        self.entries
            .iter()
            .find(|(r, _)| r.id == reviewer_id)
            .map(|(_, review)| review)
    }

    /// Iterates over reviewers and their reviews in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&Reviewer, &IndexedReview)> {
        self.entries.iter().map(|(r, review)| (r, review))
    }

    /// Iterates over the reviewers in column order.
    pub fn reviewers(&self) -> impl Iterator<Item = &Reviewer> {
        self.entries.iter().map(|(r, _)| r)
    }

    /// Number of reviewers (matrix columns).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no reviewer matched a ready review.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
