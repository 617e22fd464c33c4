#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! A JSON-file-backed stand-in for the course server.
//!
//! A fixture holds one assignment, the course's reviewers and every student's
//! latest submission. Release and status changes are written back to the file
//! the fixture was loaded from.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{
    collab::{GradeService, ReviewerDirectory},
    error::ManualGradingError,
    model::{Assignment, Reviewer, Submission, SubmissionStatus},
};

/// A student and their latest submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionRecord {
    /// Student or group name.
    pub author_name:  String,
    /// Student or group login.
    pub author_login: String,
    /// Latest submission, if the student delivered.
    pub submission:   Option<Submission>,
}

/// Contents of a fixture file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    /// The assignment with its grading template.
    pub assignment:  Assignment,
    /// Course reviewers in display order.
    pub reviewers:   Vec<Reviewer>,
    /// One record per student.
    pub submissions: Vec<SubmissionRecord>,
}

impl Fixture {
    /// Returns the submission with `id`.
    fn submission_mut(&mut self, id: u64) -> Result<&mut Submission, ManualGradingError> {
        self.submissions
            .iter_mut()
            .filter_map(|r| r.submission.as_mut())
            .find(|s| s.id == id)
            .ok_or(ManualGradingError::UnknownSubmission(id))
    }
}

/// Shared handle on a fixture, optionally persisted to disk.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    /// The fixture.
    fixture: Arc<Mutex<Fixture>>,
    /// File to write changes to.
    path:    Option<PathBuf>,
}

impl FixtureStore {
    /// Wraps an in-memory fixture. Changes are not persisted.
    pub fn new(fixture: Fixture) -> Self {
        Self {
            fixture: Arc::new(Mutex::new(fixture)),
            path:    None,
        }
    }

    /// Loads the fixture at `path`; changes are written back to it.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ManualGradingError> {
        let path = path.as_ref().to_path_buf();
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ManualGradingError::ReadFixture {
                path: path.clone(),
                source,
            })?;
        let fixture = serde_json::from_str(&text).map_err(|source| {
            ManualGradingError::ParseFixture {
                path: path.clone(),
                source,
            }
        })?;

        tracing::debug!("Loaded fixture from {}", path.display());
        Ok(Self {
            fixture: Arc::new(Mutex::new(fixture)),
            path:    Some(path),
        })
    }

    /// Returns a copy of the current fixture.
    pub async fn snapshot(&self) -> Fixture {
        self.fixture.lock().await.clone()
    }

    /// Grade service bound to one submission.
    pub fn submission(&self, submission_id: u64) -> SubmissionGrades {
        SubmissionGrades {
            store: self.clone(),
            submission_id,
        }
    }

    /// Sets status and approval of a submission.
    pub async fn set_grade_status(
        &self,
        submission_id: u64,
        status: SubmissionStatus,
        approved: bool,
    ) -> Result<(), ManualGradingError> {
        self.update(submission_id, |_, submission| {
            submission.status = status;
            submission.approved = approved;
            Ok(())
        })
        .await
    }

    /// Releases or withdraws the reviews of a submission. Releasing needs as
    /// many reviews as the assignment's reviewer quota.
    pub async fn set_released(
        &self,
        submission_id: u64,
        released: bool,
    ) -> Result<(), ManualGradingError> {
        self.update(submission_id, |assignment, submission| {
            let required = assignment.reviewers;
            if released && submission.reviews.len() < required as usize {
                return Err(ManualGradingError::QuotaNotMet {
                    required,
                    actual: submission.reviews.len(),
                });
            }
            submission.released = released;
            Ok(())
        })
        .await
    }

    /// Applies `change` to a copy of the fixture and keeps the copy only once
    /// it is written to the backing file.
    async fn update<F>(&self, submission_id: u64, change: F) -> Result<(), ManualGradingError>
    where
        F: FnOnce(&Assignment, &mut Submission) -> Result<(), ManualGradingError>,
    {
        let mut fixture = self.fixture.lock().await;
        let mut updated = fixture.clone();
        let assignment = updated.assignment.clone();
        change(&assignment, updated.submission_mut(submission_id)?)?;

        self.persist(&updated).await?;
        *fixture = updated;
        Ok(())
    }

    /// Writes `fixture` to the backing file, if any.
    async fn persist(&self, fixture: &Fixture) -> Result<(), ManualGradingError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let text = serde_json::to_string_pretty(fixture)?;
        tokio::fs::write(path, text)
            .await
            .map_err(|source| ManualGradingError::WriteFixture {
                path: path.clone(),
                source,
            })
    }
}

#[async_trait]
impl ReviewerDirectory for FixtureStore {
    /// Course reviewers who reviewed the submission, in course order.
    async fn reviewers_for_submission(&self, submission_id: u64) -> Vec<Reviewer> {
        let fixture = self.fixture.lock().await;
        let Some(submission) = fixture
            .submissions
            .iter()
            .filter_map(|r| r.submission.as_ref())
            .find(|s| s.id == submission_id)
        else {
            tracing::warn!("No submission with id {submission_id}");
            return Vec::new();
        };

        fixture
            .reviewers
            .iter()
            .filter(|u| submission.reviews.iter().any(|r| r.reviewer_id == u.id))
            .cloned()
            .collect()
    }
}

/// [`GradeService`] for one submission of a [`FixtureStore`].
#[derive(Debug, Clone)]
pub struct SubmissionGrades {
    /// The store.
    store:         FixtureStore,
    /// The submission changes apply to.
    submission_id: u64,
}

#[async_trait]
impl GradeService for SubmissionGrades {
    async fn set_grade_status(&self, status: SubmissionStatus, approved: bool) -> bool {
        match self
            .store
            .set_grade_status(self.submission_id, status, approved)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Could not set status of submission {}: {e}", self.submission_id);
                false
            }
        }
    }

    async fn set_released(&self, released: bool) {
        if let Err(e) = self.store.set_released(self.submission_id, released).await {
            tracing::warn!("Could not update release of submission {}: {e}", self.submission_id);
        }
    }
}
