#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use typed_builder::TypedBuilder;

/// Grade a reviewer gave a single criterion.
///
/// Accepts the numeric wire form (`0`, `1`, `2`) as well as the variant
/// names. Anything unrecognised reads as [`Grade::None`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Grade {
    /// Not graded yet.
    #[default]
    None,
    /// The criterion is satisfied.
    Passed,
    /// The criterion is not satisfied.
    Failed,
}

impl From<Value> for Grade {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => match n.as_u64() {
                Some(1) => Grade::Passed,
                Some(2) => Grade::Failed,
                _ => Grade::None,
            },
            Value::String(s) => match s.to_ascii_uppercase().as_str() {
                "PASSED" => Grade::Passed,
                "FAILED" => Grade::Failed,
                _ => Grade::None,
            },
            _ => Grade::None,
        }
    }
}

/// Grading status of a submission, set by a teacher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    /// No status set.
    #[default]
    None,
    /// Approved.
    Approved,
    /// Rejected.
    Rejected,
    /// Needs revision.
    Revision,
}

impl From<Value> for SubmissionStatus {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => match n.as_u64() {
                Some(1) => SubmissionStatus::Approved,
                Some(2) => SubmissionStatus::Rejected,
                Some(3) => SubmissionStatus::Revision,
                _ => SubmissionStatus::None,
            },
            Value::String(s) => match s.to_ascii_uppercase().as_str() {
                "APPROVED" => SubmissionStatus::Approved,
                "REJECTED" => SubmissionStatus::Rejected,
                "REVISION" => SubmissionStatus::Revision,
                _ => SubmissionStatus::None,
            },
            _ => SubmissionStatus::None,
        }
    }
}

impl Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SubmissionStatus::None => "None",
            SubmissionStatus::Approved => "Approved",
            SubmissionStatus::Rejected => "Rejected",
            SubmissionStatus::Revision => "Revision",
        };
        write!(f, "{s}")
    }
}

/// A single criterion of a grading benchmark.
///
/// In the assignment template `grade` is always [`Grade::None`] and `comment`
/// is empty; a reviewer's copy fills them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
#[serde(default)]
pub struct GradingCriterion {
    /// Identity shared between the template and every reviewer's copy.
    pub id:          u64,
    /// What the reviewer checks.
    pub description: String,
    /// Grade assigned by a reviewer.
    pub grade:       Grade,
    /// Reviewer comment for this criterion.
    pub comment:     String,
}

/// A benchmark groups criteria under a heading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
#[serde(default)]
pub struct GradingBenchmark {
    /// Identity shared between the template and every reviewer's copy.
    pub id:       u64,
    /// Heading shown above the criteria.
    pub heading:  String,
    /// Reviewer comment for the benchmark as a whole.
    pub comment:  String,
    /// Ordered criteria.
    pub criteria: Vec<GradingCriterion>,
}

/// One reviewer's filled-in copy of (a subset of) the grading template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
#[serde(default)]
pub struct Review {
    /// Review id.
    pub id:            u64,
    /// Submission the review belongs to.
    pub submission_id: u64,
    /// The user who wrote the review.
    pub reviewer_id:   u64,
    /// The reviewer has finished grading.
    pub ready:         bool,
    /// Score in percent, 0 to 100.
    pub score:         f64,
    /// Free-form feedback to the student.
    pub feedback:      String,
    /// Sparse overlay of the template's benchmarks.
    pub benchmarks:    Vec<GradingBenchmark>,
}

/// A student's submission for an assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
#[serde(default)]
pub struct Submission {
    /// Submission id.
    pub id:       u64,
    /// Stored score.
    pub score:    f64,
    /// Grading status.
    pub status:   SubmissionStatus,
    /// Whether the teacher approved the submission.
    pub approved: bool,
    /// Whether reviews are visible to the student.
    pub released: bool,
    /// Reviews of this submission, in the order the server returned them.
    pub reviews:  Vec<Review>,
}

/// The parts of an assignment the release workflow needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
#[serde(default)]
pub struct Assignment {
    /// Assignment id.
    pub id:                 u64,
    /// Assignment name.
    pub name:               String,
    /// Number of reviewers required before release; zero disables manual
    /// grading.
    pub reviewers:          u32,
    /// Automated tests are skipped and reviews decide the score.
    pub skip_tests:         bool,
    /// Score needed for auto-approval.
    pub score_limit:        f64,
    /// Approve automatically once `score_limit` is reached.
    pub auto_approve:       bool,
    /// The grading template.
    pub grading_benchmarks: Vec<GradingBenchmark>,
}

impl Assignment {
    /// Returns true if the assignment is graded manually.
    pub fn is_manually_graded(&self) -> bool {
        self.reviewers > 0
    }
}

/// A user who can review submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
#[serde(default)]
pub struct Reviewer {
    /// User id; matches [`Review::reviewer_id`].
    pub id:    u64,
    /// Display name.
    pub name:  String,
    /// Login name.
    pub login: String,
}
