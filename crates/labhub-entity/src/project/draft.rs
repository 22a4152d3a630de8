//! Unvalidated submission input and its validated form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::ProjectCategory;
use super::model::Project;
use super::status::ProjectStatus;

/// A submission exactly as the form sent it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDraft {
    pub student_name: Option<String>,
    pub student_email: Option<String>,
    pub roll_number: Option<String>,
    pub branch: Option<String>,
    pub year: Option<String>,
    pub contact_number: Option<String>,
    pub is_team_project: bool,
    pub team_size: Option<i64>,
    pub team_members: Option<String>,
    pub category: Option<String>,
    pub project_title: Option<String>,
    pub description: Option<String>,
    pub expected_outcomes: Option<String>,
    pub duration: Option<String>,
    pub required_resources: Vec<String>,
    pub other_resources: Option<String>,
}

/// A submission that passed validation, with optional fields normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub student_name: String,
    pub student_email: String,
    pub roll_number: String,
    pub branch: String,
    pub year: String,
    pub contact_number: Option<String>,
    pub is_team_project: bool,
    pub team_size: Option<i32>,
    pub team_members: Option<String>,
    pub category: ProjectCategory,
    pub project_title: String,
    pub description: String,
    pub expected_outcomes: Option<String>,
    pub duration: String,
    pub required_resources: Vec<String>,
    pub other_resources: Option<String>,
}

impl NewProject {
    /// Build the stored record: status `pending`, no review data, version 1.
    pub fn into_project(self, submitted_by: Uuid, now: DateTime<Utc>) -> Project {
        Project {
            id: Uuid::new_v4(),
            submitted_by,
            student_name: self.student_name,
            student_email: self.student_email,
            roll_number: self.roll_number,
            branch: self.branch,
            year: self.year,
            contact_number: self.contact_number,
            is_team_project: self.is_team_project,
            team_size: self.team_size,
            team_members: self.team_members,
            category: self.category,
            project_title: self.project_title,
            description: self.description,
            expected_outcomes: self.expected_outcomes,
            duration: self.duration,
            required_resources: self.required_resources,
            other_resources: self.other_resources,
            status: ProjectStatus::Pending,
            faculty_comments: None,
            reviewed_by: None,
            reviewed_at: None,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }
}
