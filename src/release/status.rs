use crate::model::SubmissionStatus;

/// Entries of the status drop-down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusAction {
    /// "Set status"
    #[default]
    None,
    /// "Approved"
    Approve,
    /// "Rejected"
    Reject,
    /// "Revision"
    Revision,
}

impl StatusAction {
    /// Status the action sets.
    pub fn status(self) -> SubmissionStatus {
        match self {
            StatusAction::None => SubmissionStatus::None,
            StatusAction::Approve => SubmissionStatus::Approved,
            StatusAction::Reject => SubmissionStatus::Rejected,
            StatusAction::Revision => SubmissionStatus::Revision,
        }
    }

    /// Only approval raises the approved flag.
    pub fn approved(self) -> bool {
        matches!(self, StatusAction::Approve)
    }
}

/// Unknown values select [`StatusAction::None`].
impl From<&str> for StatusAction {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "approve" => StatusAction::Approve,
            "reject" => StatusAction::Reject,
            "revision" => StatusAction::Revision,
            _ => StatusAction::None,
        }
    }
}

/// Outcome of a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    /// The server accepted the change and the local status now shows it.
    Applied(SubmissionStatus),
    /// The server refused; the local status is unchanged.
    Rejected,
    /// There is no submission to grade.
    NoSubmission,
}
