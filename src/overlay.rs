#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Merges reviewer overlays onto the grading template.
//!
//! A review is a sparse patch over the template: it carries copies of some of
//! the template's benchmarks and criteria, matched back to the template by id.
//! Anything the review does not carry falls back to the template entry.

use std::{collections::HashMap, fmt::Display};

use colored::{ColoredString, Colorize};

use crate::model::{Grade, GradingBenchmark, GradingCriterion, Review};

/// A review together with id lookups into its overlay.
///
/// Built once per review so that resolving a cell is a hash lookup rather than
/// a scan over the reviewer's benchmarks.
#[derive(Debug, Clone)]
pub struct IndexedReview {
    /// The underlying review.
    review:     Review,
    /// Benchmark id to position in `review.benchmarks`.
    benchmarks: HashMap<u64, usize>,
    /// Criterion id to (benchmark position, criterion position).
    criteria:   HashMap<u64, (usize, usize)>,
}

impl IndexedReview {
    /// Indexes `review`. If an id occurs more than once the first occurrence
    /// in overlay order wins.
    pub fn new(review: Review) -> Self {
        let mut benchmarks = HashMap::new();
        let mut criteria = HashMap::new();
        for (bi, bm) in review.benchmarks.iter().enumerate() {
            benchmarks.entry(bm.id).or_insert(bi);
            for (ci, c) in bm.criteria.iter().enumerate() {
                criteria.entry(c.id).or_insert((bi, ci));
            }
        }

        Self {
            review,
            benchmarks,
            criteria,
        }
    }

    /// Returns the underlying review.
    pub fn review(&self) -> &Review {
        &self.review
    }

    /// Returns the overlay benchmark with the given id, if the review has one.
    pub fn benchmark(&self, id: u64) -> Option<&GradingBenchmark> {
        self.benchmarks
            .get(&id)
            .map(|&bi| &self.review.benchmarks[bi])
    }

    /// Returns the overlay criterion with the given id, searching every
    /// overlay benchmark.
    pub fn criterion(&self, id: u64) -> Option<&GradingCriterion> {
        self.criteria
            .get(&id)
            .map(|&(bi, ci)| &self.review.benchmarks[bi].criteria[ci])
    }
}

impl From<Review> for IndexedReview {
    fn from(review: Review) -> Self {
        Self::new(review)
    }
}

/// Resolves what a reviewer sees for a template benchmark: their overlay if
/// they have one with the same id, the template benchmark otherwise.
pub fn resolve_benchmark<'a>(
    overlay: Option<&'a IndexedReview>,
    template: &'a GradingBenchmark,
) -> &'a GradingBenchmark {
    overlay
        .and_then(|r| r.benchmark(template.id))
        .unwrap_or(template)
}

/// Resolves what a reviewer sees for a template criterion: their overlay if
/// any of their benchmarks carries the same criterion id, the template
/// criterion (ungraded) otherwise.
pub fn resolve_criterion<'a>(
    overlay: Option<&'a IndexedReview>,
    template: &'a GradingCriterion,
) -> &'a GradingCriterion {
    overlay
        .and_then(|r| r.criterion(template.id))
        .unwrap_or(template)
}

/// How a resolved criterion is marked in the release matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// The criterion passed.
    Success,
    /// The criterion failed.
    Failure,
    /// Not graded.
    Neutral,
}

impl Indicator {
    /// Returns the indicator with terminal colors applied.
    pub fn paint(self) -> ColoredString {
        match self {
            Indicator::Success => self.to_string().green(),
            Indicator::Failure => self.to_string().red(),
            Indicator::Neutral => self.to_string().dimmed(),
        }
    }
}

impl From<Grade> for Indicator {
    fn from(grade: Grade) -> Self {
        match grade {
            Grade::Passed => Indicator::Success,
            Grade::Failed => Indicator::Failure,
            Grade::None => Indicator::Neutral,
        }
    }
}

impl From<&GradingCriterion> for Indicator {
    fn from(criterion: &GradingCriterion) -> Self {
        criterion.grade.into()
    }
}

impl Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Indicator::Success => "✔",
            Indicator::Failure => "✘",
            Indicator::Neutral => "⊘",
        };
        write!(f, "{symbol}")
    }
}
