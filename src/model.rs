use serde::{Deserialize, Serialize};

/// One reviewed-work entry as the status endpoint reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Homework {
    pub homework_name: String,
    pub status: String,
}

/// The fixed set of review states the API may report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReviewStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl ReviewStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "approved" => Some(ReviewStatus::Approved),
            "reviewing" => Some(ReviewStatus::Reviewing),
            "rejected" => Some(ReviewStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Approved => "approved",
            ReviewStatus::Reviewing => "reviewing",
            ReviewStatus::Rejected => "rejected",
        }
    }

    /// Fixed human-readable verdict attached to notifications for this state.
    pub fn verdict(&self) -> &'static str {
        match self {
            ReviewStatus::Approved => "Work reviewed: the reviewer liked it. Hooray!",
            ReviewStatus::Reviewing => "Work was taken up for review.",
            ReviewStatus::Rejected => "Work reviewed: the reviewer has remarks.",
        }
    }
}

/// Cross-cycle notification state. Owned exclusively by the polling loop and
/// mutated only at the end of a cycle; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    pub last_message: Option<String>,
    pub last_error: Option<String>,
}
