#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{borrow::Borrow, fmt::Display};

use crate::model::{Assignment, Review, Submission};

/// Returns the reviews of `submission` that their reviewers marked ready, in
/// their original order.
pub fn select_ready_reviews(submission: &Submission) -> Vec<&Review> {
    submission.reviews.iter().filter(|r| r.ready).collect()
}

/// Combines review scores into one score for the submission.
///
/// An empty set scores 0 and a single review scores its own score. Callers
/// should not rely on anything else about how several reviews combine.
pub fn total_score<I>(reviews: I) -> f64
where
    I: IntoIterator,
    I::Item: Borrow<Review>,
{
    let (sum, count) = reviews
        .into_iter()
        .fold((0f64, 0usize), |acc, r| (acc.0 + r.borrow().score, acc.1 + 1));

    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Score of the submission as shown to the teacher or student.
///
/// Assignments that skip automated tests are scored by their ready reviews;
/// every other assignment shows the stored submission score.
pub fn effective_score(assignment: &Assignment, submission: &Submission) -> f64 {
    if assignment.skip_tests {
        total_score(select_ready_reviews(submission))
    } else {
        submission.score
    }
}

/// Returns true if `latest` is approved, or `score` is enough to approve it
/// automatically.
pub fn is_approved(assignment: &Assignment, latest: &Submission, score: f64) -> bool {
    latest.approved || (assignment.auto_approve && score >= assignment.score_limit)
}

/// A score as presented in panel headers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreDisplay {
    /// The assignment is not manually graded.
    NotApplicable,
    /// Aggregated score.
    Value(f64),
}

impl ScoreDisplay {
    /// Presents the total score of `reviews`, or N/A when `assignment` has no
    /// reviewer quota.
    pub fn for_reviews<I>(assignment: &Assignment, reviews: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<Review>,
    {
        if assignment.is_manually_graded() {
            ScoreDisplay::Value(total_score(reviews))
        } else {
            ScoreDisplay::NotApplicable
        }
    }
}

impl Display for ScoreDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreDisplay::NotApplicable => write!(f, "N/A"),
            ScoreDisplay::Value(v) => write!(f, "{v}"),
        }
    }
}
