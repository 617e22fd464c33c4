//! # manual-grading
//!
//! Review aggregation and release workflow for manually graded assignments.
//! Merges reviewers' copies of a grading template onto the template, scores
//! the result and drives releasing reviews to students.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Exclusive-open coordination across sibling panels
pub mod accordion;
/// Interfaces to the course server
pub mod collab;
/// Environment-driven configuration
pub mod config;
/// Error type for loading and storing fixtures
pub mod error;
/// JSON-file-backed course data
pub mod fixture;
/// Assignments, submissions, reviews and grading templates
pub mod model;
/// Resolving reviewer overlays against the template
pub mod overlay;
/// The per-submission release panel
pub mod release;
/// Text rendering of panels
pub mod render;
/// Aggregating review scores
pub mod score;

pub use accordion::{AccordionParent, AccordionRegistry};
pub use collab::{GradeService, ReadyReviewReviewers, ReviewerDirectory};
pub use error::ManualGradingError;
pub use fixture::{Fixture, FixtureStore, SubmissionGrades, SubmissionRecord};
pub use release::{PanelMode, PanelProps, PanelView, ReleasePanel, StatusAction, StatusUpdate};
pub use render::ReleaseMatrix;
