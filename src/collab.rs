#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! External collaborators of the release workflow.
//!
//! Implementations own the data-access layer. They report failure through
//! their return values (an empty reviewer list, `false`), never by erroring.

use async_trait::async_trait;

use crate::model::{Reviewer, Submission, SubmissionStatus};

/// Looks up who reviewed a submission.
#[async_trait]
pub trait ReviewerDirectory: Send + Sync {
    /// Returns the reviewers of `submission_id` in display order. Returns an
    /// empty list when the lookup fails.
    async fn reviewers_for_submission(&self, submission_id: u64) -> Vec<Reviewer>;
}

/// Grade and release changes for one submission.
#[async_trait]
pub trait GradeService: Send + Sync {
    /// Sets the grading status. Returns true iff the change was accepted.
    async fn set_grade_status(&self, status: SubmissionStatus, approved: bool) -> bool;

    /// Releases or withdraws the reviews.
    async fn set_released(&self, released: bool);
}

/// Reviewer lookup for the student's own page, which may not query the
/// course's reviewers: every ready review stands in for its reviewer.
#[derive(Debug, Clone, Default)]
pub struct ReadyReviewReviewers {
    /// Reviewers in the order of their ready reviews.
    reviewers: Vec<Reviewer>,
}

impl ReadyReviewReviewers {
    /// Collects reviewers from the ready reviews of `submission`.
    pub fn new(submission: &Submission) -> Self {
        let reviewers = submission
            .reviews
            .iter()
            .filter(|r| r.ready)
            .map(|r| Reviewer::builder().id(r.reviewer_id).build())
            .collect();
        Self { reviewers }
    }
}

#[async_trait]
impl ReviewerDirectory for ReadyReviewReviewers {
    async fn reviewers_for_submission(&self, _submission_id: u64) -> Vec<Reviewer> {
        self.reviewers.clone()
    }
}
