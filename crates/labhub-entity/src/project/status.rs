//! Project review status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review status of a project submission.
///
/// `Pending` is the only initial state. `Completed` is terminal: leaving it
/// is a correction that needs the edit capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Submitted, not yet looked at.
    Pending,
    /// A reviewer has opened the review.
    UnderReview,
    /// Accepted by a reviewer.
    Approved,
    /// Declined by a reviewer.
    Rejected,
    /// Work on the project has finished.
    Completed,
}

impl ProjectStatus {
    /// Every status, in pipeline order.
    pub const ALL: [ProjectStatus; 5] = [
        Self::Pending,
        Self::UnderReview,
        Self::Approved,
        Self::Rejected,
        Self::Completed,
    ];

    /// Check if the status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Whether entering this status is a review decision that must carry comments.
    pub fn is_decision(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Whether the submitter is told when the project enters this status.
    pub fn notifies_submitter(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Completed)
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::UnderReview => "Under Review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = labhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "pending" => Ok(Self::Pending),
            "under_review" => Ok(Self::UnderReview),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            _ => Err(labhub_core::AppError::invalid_field(
                "status",
                format!(
                    "Invalid project status: '{s}'. Expected one of: pending, under_review, approved, rejected, completed"
                ),
            )),
        }
    }
}
