#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The release panel: one per submission in a teacher's list, or a single one
//! on a student's results page.
//!
//! A panel moves between [`PanelState::Collapsed`], [`PanelState::Loading`]
//! and [`PanelState::Expanded`]. Opening a panel with ready reviews asks the
//! reviewer directory who reviewed the submission and pairs each reviewer with
//! their ready review; the pairing is thrown away again on collapse.

/// The release toggle.
pub mod control;
/// Reviewer to ready-review pairing.
pub mod reviewers;
/// Grading status changes.
pub mod status;

use std::sync::Arc;

pub use control::{ReleaseControl, ReleaseLabel};
pub use reviewers::ReviewerMap;
pub use status::{StatusAction, StatusUpdate};
use typed_builder::TypedBuilder;

use crate::{
    accordion::{AccordionParent, OpenLease},
    collab::{GradeService, ReviewerDirectory},
    model::{Assignment, Review, Reviewer, Submission, SubmissionStatus},
    render::{PanelHeader, ReleaseMatrix},
    score::{ScoreDisplay, effective_score, is_approved, select_ready_reviews, total_score},
};

/// Who is looking at the panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelMode {
    /// Teacher's list of submissions: header, info table and release matrix.
    #[default]
    Teacher,
    /// Student's own results: release matrix only, open from the start.
    Student,
}

/// Ready reviews and their reviewers, captured when the panel opened.
#[derive(Debug, Clone)]
pub struct ReviewSnapshot {
    /// Reviewer columns.
    reviewers:     ReviewerMap,
    /// Ready reviews at the time the panel opened.
    ready_reviews: Vec<Review>,
    /// Total score of `ready_reviews`.
    score:         f64,
}

impl ReviewSnapshot {
    /// Reviewer columns.
    pub fn reviewers(&self) -> &ReviewerMap {
        &self.reviewers
    }

    /// Ready reviews at the time the panel opened.
    pub fn ready_reviews(&self) -> &[Review] {
        &self.ready_reviews
    }

    /// Total score of the ready reviews.
    pub fn score(&self) -> f64 {
        self.score
    }
}

/// What an open panel holds.
#[derive(Debug, Clone)]
pub enum Expansion {
    /// Ready reviews were loaded.
    Reviews(ReviewSnapshot),
    /// Opened without anything to aggregate.
    Empty,
}

/// Lifecycle of a panel.
#[derive(Debug, Clone, Default)]
pub enum PanelState {
    /// Closed, nothing held.
    #[default]
    Collapsed,
    /// Waiting for the reviewer lookup started as load `epoch`.
    Loading {
        /// Load counter value of the pending lookup.
        epoch: u64,
    },
    /// Open.
    Expanded(Expansion),
}

impl PanelState {
    /// Returns true unless collapsed.
    pub fn is_open(&self) -> bool {
        !matches!(self, PanelState::Collapsed)
    }
}

/// A pending reviewer lookup. Hand it back to
/// [`ReleasePanel::complete_load`] with the lookup's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
    /// Load counter value when the lookup started.
    epoch:         u64,
    /// Submission to look up reviewers for.
    submission_id: u64,
}

impl LoadTicket {
    /// Submission to look up reviewers for.
    pub fn submission_id(&self) -> u64 {
        self.submission_id
    }
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The panel closed.
    Collapsed,
    /// The panel opened with nothing to load.
    Expanded,
    /// The panel is loading reviewers.
    Load(LoadTicket),
}

/// Informational message shown by an open panel instead of the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The assignment has no reviewer quota.
    NotManuallyGraded,
    /// The student has not submitted.
    NoSubmission,
    /// No reviewer has finished yet.
    NoReadyReviews,
}

impl Notice {
    /// The message for an assignment called `assignment`.
    pub fn message(&self, assignment: &str) -> String {
        match self {
            Notice::NotManuallyGraded => format!("{assignment} is not for manual grading"),
            Notice::NoSubmission => format!("No submissions for {assignment}"),
            Notice::NoReadyReviews => format!("No ready reviews for {assignment}"),
        }
    }
}

/// What a panel currently shows below its header.
#[derive(Debug, Clone, Copy)]
pub enum PanelView<'a> {
    /// Nothing, the panel is collapsed.
    Hidden,
    /// Reviewers are being loaded.
    Loading,
    /// A message instead of the matrix.
    Notice(Notice),
    /// The release matrix.
    Reviews(&'a ReviewSnapshot),
}

/// Inputs of a panel, owned by whoever renders the list.
#[derive(TypedBuilder)]
pub struct PanelProps {
    /// The assignment, shared by every panel of the list.
    assignment:     Arc<Assignment>,
    /// The student's latest submission, if any.
    #[builder(default)]
    submission:     Option<Submission>,
    /// Student or group name.
    #[builder(default, setter(into))]
    author_name:    String,
    /// Student or group login.
    #[builder(default, setter(into))]
    author_login:   String,
    /// Position in the list, starting at 1.
    #[builder(default)]
    student_number: usize,
    /// Teacher or student view.
    #[builder(default)]
    mode:           PanelMode,
    /// The list's accordion.
    parent:         Arc<dyn AccordionParent>,
}

/// One submission's review aggregation and release panel.
pub struct ReleasePanel {
    /// Inputs.
    props:  PanelProps,
    /// Lifecycle state.
    state:  PanelState,
    /// Broadcast epoch this panel opened at.
    lease:  Option<OpenLease>,
    /// Local view of the grading status.
    status: SubmissionStatus,
    /// Number of reviewer lookups started so far.
    loads:  u64,
}

impl ReleasePanel {
    /// Creates a collapsed panel.
    pub fn new(props: PanelProps) -> Self {
        let status = props
            .submission
            .as_ref()
            .map(|s| s.status)
            .unwrap_or_default();

        Self {
            props,
            state: PanelState::Collapsed,
            lease: None,
            status,
            loads: 0,
        }
    }

    /// The assignment.
    pub fn assignment(&self) -> &Assignment {
        &self.props.assignment
    }

    /// The submission, if any.
    pub fn submission(&self) -> Option<&Submission> {
        self.props.submission.as_ref()
    }

    /// Replaces the submission after its owner changed it, e.g. after a
    /// release. Takes effect for the header at once and for the matrix on the
    /// next expansion.
    pub fn set_submission(&mut self, submission: Option<Submission>) {
        self.props.submission = submission;
    }

    /// Student or group name.
    pub fn author_name(&self) -> &str {
        &self.props.author_name
    }

    /// Student or group login.
    pub fn author_login(&self) -> &str {
        &self.props.author_login
    }

    /// Teacher or student view.
    pub fn mode(&self) -> PanelMode {
        self.props.mode
    }

    /// Lifecycle state, regardless of sibling broadcasts.
    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Local view of the grading status.
    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Ready reviews of the current submission.
    pub fn ready_reviews(&self) -> Vec<&Review> {
        self.submission()
            .map(select_ready_reviews)
            .unwrap_or_default()
    }

    /// Returns true if the panel renders expanded: it is open and no sibling
    /// has opened since.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
            && self
                .lease
                .is_some_and(|lease| lease.is_current(self.props.parent.as_ref()))
    }

    /// Handles a click on the panel header.
    ///
    /// A visibly open panel collapses. Otherwise the panel first asks the
    /// parent to close every sibling, then opens: directly if there is
    /// nothing to aggregate, or by starting a reviewer lookup whose result
    /// goes to [`ReleasePanel::complete_load`].
    pub fn toggle(&mut self) -> Toggle {
        if self.is_open() {
            self.collapse();
            return Toggle::Collapsed;
        }
        if self.state.is_open() {
            // closed by a sibling; drop what we held and reopen
            self.collapse();
        }

        let epoch = self.props.parent.request_close_all();
        self.lease = Some(OpenLease::new(epoch));

        let reviewed = self
            .submission()
            .filter(|s| !select_ready_reviews(s).is_empty())
            .map(|s| s.id);
        let Some(submission_id) = reviewed else {
            tracing::debug!("Opening panel of {} without reviews", self.props.author_name);
            self.state = PanelState::Expanded(Expansion::Empty);
            return Toggle::Expanded;
        };

        self.loads += 1;
        self.state = PanelState::Loading { epoch: self.loads };
        tracing::debug!("Loading reviewers for submission {submission_id}");
        Toggle::Load(LoadTicket {
            epoch: self.loads,
            submission_id,
        })
    }

    /// Finishes the lookup started by `ticket`.
    ///
    /// Returns false and keeps the current state if the panel collapsed or
    /// started another lookup in the meantime.
    pub fn complete_load(&mut self, ticket: LoadTicket, reviewers: Vec<Reviewer>) -> bool {
        match self.state {
            PanelState::Loading { epoch } if epoch == ticket.epoch => {}
            _ => {
                tracing::debug!(
                    "Discarding stale reviewer lookup for submission {}",
                    ticket.submission_id
                );
                return false;
            }
        }

        let ready_reviews: Vec<Review> = self.ready_reviews().into_iter().cloned().collect();
        let reviewers = ReviewerMap::build(reviewers, &ready_reviews);
        let score = total_score(&ready_reviews);
        self.status = self.submission().map(|s| s.status).unwrap_or_default();

        tracing::debug!(
            "Submission {}: {} of {} ready reviews matched a reviewer",
            ticket.submission_id,
            reviewers.len(),
            ready_reviews.len()
        );
        self.state = PanelState::Expanded(Expansion::Reviews(ReviewSnapshot {
            reviewers,
            ready_reviews,
            score,
        }));
        true
    }

    /// Toggles the panel and, if that started a lookup, runs it against
    /// `directory`. Returns whether the panel ends up visibly open.
    pub async fn toggle_and_load<D>(&mut self, directory: &D) -> bool
    where
        D: ReviewerDirectory + ?Sized,
    {
        if let Toggle::Load(ticket) = self.toggle() {
            let reviewers = directory
                .reviewers_for_submission(ticket.submission_id())
                .await;
            self.complete_load(ticket, reviewers);
        }
        self.is_open()
    }

    /// Returns true if the student may see the reviews: the assignment is
    /// manually graded and the submission has been released.
    pub fn is_released(&self) -> bool {
        self.assignment().is_manually_graded() && self.submission().is_some_and(|s| s.released)
    }

    /// Opens a student-view panel once its reviews are released. Teacher
    /// panels start collapsed and are left alone.
    pub async fn mount<D>(&mut self, directory: &D)
    where
        D: ReviewerDirectory + ?Sized,
    {
        if self.props.mode != PanelMode::Student || self.is_open() {
            return;
        }
        if !self.is_released() {
            tracing::debug!("Reviews of {} are not released", self.props.author_name);
            return;
        }
        self.toggle_and_load(directory).await;
    }

    /// Closes the panel and drops the reviewer pairing.
    pub fn collapse(&mut self) {
        self.state = PanelState::Collapsed;
        self.lease = None;
    }

    /// What the panel shows below its header.
    pub fn view(&self) -> PanelView<'_> {
        if !self.is_open() {
            return PanelView::Hidden;
        }
        if !self.assignment().is_manually_graded() {
            return PanelView::Notice(Notice::NotManuallyGraded);
        }
        if self.submission().is_none() {
            return PanelView::Notice(Notice::NoSubmission);
        }

        match &self.state {
            PanelState::Loading { .. } => PanelView::Loading,
            PanelState::Expanded(Expansion::Reviews(snapshot))
                if !snapshot.ready_reviews.is_empty() =>
            {
                PanelView::Reviews(snapshot)
            }
            _ => PanelView::Notice(Notice::NoReadyReviews),
        }
    }

    /// Score of the submission: the ready reviews' total when the assignment
    /// skips automated tests, the stored score otherwise.
    pub fn effective_score(&self) -> f64 {
        self.submission()
            .map(|s| effective_score(self.assignment(), s))
            .unwrap_or_default()
    }

    /// Returns true if the submission is approved, by a teacher or because
    /// its effective score reached the assignment's limit.
    pub fn is_approved(&self) -> bool {
        self.submission()
            .is_some_and(|s| is_approved(self.assignment(), s, self.effective_score()))
    }

    /// The release matrix, if the panel shows reviews.
    pub fn matrix(&self) -> Option<ReleaseMatrix> {
        match self.view() {
            PanelView::Reviews(snapshot) => Some(ReleaseMatrix::build(
                &self.assignment().grading_benchmarks,
                snapshot.reviewers(),
                self.effective_score(),
            )),
            _ => None,
        }
    }

    /// The release toggle.
    pub fn release_control(&self) -> ReleaseControl {
        ReleaseControl::new(self.assignment(), self.submission())
    }

    /// Handles a click on the release toggle. Returns the requested `released`
    /// flag, or `None` if the control is inert.
    ///
    /// The submission's `released` flag belongs to its owner, who should call
    /// [`ReleasePanel::set_submission`] once the change is stored.
    pub async fn click_release<G>(&self, grades: &G) -> Option<bool>
    where
        G: GradeService + ?Sized,
    {
        let target = self.release_control().click_target()?;
        tracing::debug!("Setting released = {target} for {}", self.props.author_name);
        grades.set_released(target).await;
        Some(target)
    }

    /// Handles a selection in the status drop-down.
    ///
    /// The local status changes only if `grades` accepts the change.
    pub async fn update_status<G>(&mut self, action: StatusAction, grades: &G) -> StatusUpdate
    where
        G: GradeService + ?Sized,
    {
        let Some(submission_id) = self.submission().map(|s| s.id) else {
            return StatusUpdate::NoSubmission;
        };

        let status = action.status();
        if grades.set_grade_status(status, action.approved()).await {
            self.status = status;
            StatusUpdate::Applied(status)
        } else {
            tracing::warn!("Status change to {status} for submission {submission_id} was refused");
            StatusUpdate::Rejected
        }
    }

    /// The header line of a teacher-view panel.
    pub fn header(&self) -> PanelHeader {
        let reviews = self
            .submission()
            .map(|s| s.reviews.as_slice())
            .unwrap_or_default();
        let quota = self.assignment().reviewers;

        PanelHeader {
            number:  self.props.student_number,
            author:  self.props.author_name.clone(),
            score:   ScoreDisplay::for_reviews(self.assignment(), reviews),
            reviews: (quota > 0).then_some((reviews.len(), quota)),
            release: self.release_control(),
        }
    }
}
