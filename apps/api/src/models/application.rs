use serde::{Deserialize, Serialize};

/// Lifecycle of a job application. Transitions are driven by recruiters
/// elsewhere; the matcher only reads applications to exclude applied jobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Submitted,
    UnderReview,
    Shortlisted,
    Rejected,
    Withdrawn,
    Hired,
}

impl ApplicationStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Rejected | ApplicationStatus::Withdrawn | ApplicationStatus::Hired
        )
    }

    /// Forward moves only; nothing leaves a terminal state.
    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        match (self, next) {
            (from, _) if from.is_terminal() => false,
            (_, Rejected | Withdrawn) => true,
            (Submitted, UnderReview) => true,
            (UnderReview, Shortlisted) => true,
            (Shortlisted, Hired) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub job_id: String,
    #[serde(default)]
    pub status: ApplicationStatus,
}
