//! Project submission entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::ProjectCategory;
use super::status::ProjectStatus;

/// A student's project proposal and its review state.
///
/// `version` increases by one on every write and backs conditional updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique project identifier (immutable).
    pub id: Uuid,
    /// The account that submitted the proposal.
    pub submitted_by: Uuid,
    /// Student's full name.
    pub student_name: String,
    /// Student's email address.
    pub student_email: String,
    /// Roll number / student identifier.
    pub roll_number: String,
    /// Academic branch.
    pub branch: String,
    /// Year of study.
    pub year: String,
    /// Contact phone number.
    pub contact_number: Option<String>,
    /// Whether this is a team project.
    pub is_team_project: bool,
    /// Team size (team projects only, at least 2).
    pub team_size: Option<i32>,
    /// Free-text team member description (team projects only).
    pub team_members: Option<String>,
    /// Category.
    pub category: ProjectCategory,
    /// Proposal title.
    pub project_title: String,
    /// Proposal description.
    pub description: String,
    /// Expected outcomes.
    pub expected_outcomes: Option<String>,
    /// Planned duration, free text.
    pub duration: String,
    /// Requested lab resources.
    pub required_resources: Vec<String>,
    /// Details for the `"Other"` resource entry.
    pub other_resources: Option<String>,
    /// Current review status.
    pub status: ProjectStatus,
    /// Latest reviewer comments.
    pub faculty_comments: Option<String>,
    /// Reviewer behind the latest transition; `None` while pending.
    pub reviewed_by: Option<Uuid>,
    /// Time of the latest transition; `None` while pending.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency version.
    pub version: i64,
    /// When the project was submitted.
    pub created_at: DateTime<Utc>,
    /// When the project was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Return a copy with the review patch applied and the version bumped.
    pub fn with_patch(&self, patch: &ReviewPatch) -> Self {
        Self {
            status: patch.status,
            faculty_comments: patch.faculty_comments.clone(),
            reviewed_by: patch.reviewed_by,
            reviewed_at: patch.reviewed_at,
            updated_at: patch.updated_at,
            version: self.version + 1,
            ..self.clone()
        }
    }
}

/// The complete set of fields a status transition writes.
///
/// Applied as one unit: either all fields change or none do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewPatch {
    /// New status.
    pub status: ProjectStatus,
    /// Comments after the transition.
    pub faculty_comments: Option<String>,
    /// Reviewer after the transition.
    pub reviewed_by: Option<Uuid>,
    /// Review timestamp after the transition.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Filter for the read-only project listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectFilter {
    /// Only projects in this status.
    pub status: Option<ProjectStatus>,
    /// Only projects submitted under this email (case-insensitive).
    pub submitter_email: Option<String>,
}

impl ProjectFilter {
    /// Check whether a project passes this filter.
    pub fn matches(&self, project: &Project) -> bool {
        if let Some(status) = self.status {
            if project.status != status {
                return false;
            }
        }
        if let Some(email) = &self.submitter_email {
            if !project.student_email.eq_ignore_ascii_case(email.trim()) {
                return false;
            }
        }
        true
    }
}
