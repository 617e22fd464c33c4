use std::fmt::Display;

use crate::model::{Assignment, Submission};

/// Text on the release control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseLabel {
    /// Nothing to release.
    NotApplicable,
    /// Reviews are hidden from the student.
    Release,
    /// Reviews are visible to the student.
    Released,
}

impl Display for ReleaseLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReleaseLabel::NotApplicable => "N/A",
            ReleaseLabel::Release => "Release",
            ReleaseLabel::Released => "Released",
        };
        write!(f, "{s}")
    }
}

/// State of the release toggle for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseControl {
    /// What the control says.
    pub label:     ReleaseLabel,
    /// Clicking does something.
    pub enabled:   bool,
    /// The submission has as many reviews as the assignment requires.
    pub quota_met: bool,
}

impl ReleaseControl {
    /// Derives the control from the assignment and the (possibly absent)
    /// submission.
    pub fn new(assignment: &Assignment, submission: Option<&Submission>) -> Self {
        let quota = assignment.reviewers as usize;
        match submission {
            Some(s) if quota > 0 => Self {
                label:     if s.released {
                    ReleaseLabel::Released
                } else {
                    ReleaseLabel::Release
                },
                enabled:   true,
                quota_met: s.reviews.len() >= quota,
            },
            _ => Self {
                label:     ReleaseLabel::NotApplicable,
                enabled:   false,
                quota_met: false,
            },
        }
    }

    /// The `released` flag a click requests, or `None` if the control is
    /// inert.
    pub fn click_target(&self) -> Option<bool> {
        match (self.enabled, self.label) {
            (true, ReleaseLabel::Released) => Some(false),
            (true, ReleaseLabel::Release) => Some(true),
            _ => None,
        }
    }
}

impl Display for ReleaseControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.label)
    }
}
