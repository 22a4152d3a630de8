//! Structural validation of project submissions.
//!
//! Checks run in a fixed order and the first failure is returned, so the
//! same draft always reports the same field:
//!
//! 1. required fields present and non-blank
//! 2. email well-formed
//! 3. category known
//! 4. team fields consistent with `is_team_project`
//! 5. resources free of duplicates, `"Other"` explained

use std::collections::HashSet;

use validator::ValidateEmail;

use labhub_core::error::AppError;
use labhub_core::result::AppResult;

use super::category::ProjectCategory;
use super::draft::{NewProject, ProjectDraft};

/// Resource entry that requires an `other_resources` explanation.
pub const OTHER_RESOURCE: &str = "Other";

/// Validate a draft and return its normalized form.
pub fn validate(draft: &ProjectDraft) -> AppResult<NewProject> {
    let student_name = required("student_name", &draft.student_name)?;
    let student_email = required("student_email", &draft.student_email)?;
    let roll_number = required("roll_number", &draft.roll_number)?;
    let branch = required("branch", &draft.branch)?;
    let year = required("year", &draft.year)?;
    let project_title = required("project_title", &draft.project_title)?;
    let description = required("description", &draft.description)?;
    let duration = required("duration", &draft.duration)?;
    let category = required("category", &draft.category)?;

    if !student_email.validate_email() {
        return Err(AppError::invalid_field(
            "student_email",
            format!("'{student_email}' is not a valid email address"),
        ));
    }

    let category: ProjectCategory = category.parse()?;

    let (team_size, team_members) = team_fields(draft)?;

    let required_resources = resources(&draft.required_resources)?;
    let other_resources = optional(&draft.other_resources);
    if required_resources.iter().any(|r| r == OTHER_RESOURCE) && other_resources.is_none() {
        return Err(AppError::invalid_field(
            "other_resources",
            "Describe the other resources you need",
        ));
    }

    Ok(NewProject {
        student_name,
        student_email,
        roll_number,
        branch,
        year,
        contact_number: optional(&draft.contact_number),
        is_team_project: draft.is_team_project,
        team_size,
        team_members,
        category,
        project_title,
        description,
        expected_outcomes: optional(&draft.expected_outcomes),
        duration,
        required_resources,
        other_resources,
    })
}

fn required(field: &str, value: &Option<String>) -> AppResult<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::invalid_field(field, format!("{field} is required"))),
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn team_fields(draft: &ProjectDraft) -> AppResult<(Option<i32>, Option<String>)> {
    let members = optional(&draft.team_members);

    if !draft.is_team_project {
        if draft.team_size.is_some() {
            return Err(AppError::invalid_field(
                "team_size",
                "team_size must be empty for an individual project",
            ));
        }
        if members.is_some() {
            return Err(AppError::invalid_field(
                "team_members",
                "team_members must be empty for an individual project",
            ));
        }
        return Ok((None, None));
    }

    let size = match draft.team_size {
        Some(n) if n >= 2 => i32::try_from(n)
            .map_err(|_| AppError::invalid_field("team_size", "team_size is too large"))?,
        _ => {
            return Err(AppError::invalid_field(
                "team_size",
                "A team project needs a team size of at least 2",
            ));
        }
    };
    let Some(members) = members else {
        return Err(AppError::invalid_field(
            "team_members",
            "A team project must list its members",
        ));
    };

    Ok((Some(size), Some(members)))
}

fn resources(entries: &[String]) -> AppResult<Vec<String>> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(entries.len());
    for entry in entries.iter().map(|e| e.trim()) {
        if entry.is_empty() {
            return Err(AppError::invalid_field(
                "required_resources",
                "Resource names cannot be blank",
            ));
        }
        if !seen.insert(entry) {
            return Err(AppError::invalid_field(
                "required_resources",
                format!("'{entry}' is listed more than once"),
            ));
        }
        out.push(entry.to_string());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use labhub_core::error::ErrorKind;

    fn draft() -> ProjectDraft {
        ProjectDraft {
            student_name: Some("Asha Verma".into()),
            student_email: Some("asha@example.edu".into()),
            roll_number: Some("221030".into()),
            branch: Some("ECE".into()),
            year: Some("3".into()),
            category: Some("robotics".into()),
            project_title: Some("Line follower".into()),
            description: Some("PID line follower with LiDAR".into()),
            duration: Some("3 months".into()),
            required_resources: vec!["Raspberry Pi 5".into()],
            ..ProjectDraft::default()
        }
    }

    fn failing_field(draft: &ProjectDraft) -> String {
        let err = validate(draft).expect_err("draft should be rejected");
        assert_eq!(err.kind, ErrorKind::Validation);
        err.field.expect("validation error names a field")
    }

    #[test]
    fn test_valid_individual_draft() {
        let project = validate(&draft()).expect("valid");
        assert_eq!(project.category, ProjectCategory::Robotics);
        assert_eq!(project.team_size, None);
        assert_eq!(project.team_members, None);
    }

    #[test]
    fn test_first_failure_wins() {
        let mut d = draft();
        d.student_name = Some("   ".into());
        d.student_email = Some("not-an-email".into());
        d.category = Some("gardening".into());
        assert_eq!(failing_field(&d), "student_name");

        d.student_name = Some("Asha".into());
        assert_eq!(failing_field(&d), "student_email");

        d.student_email = Some("asha@example.edu".into());
        assert_eq!(failing_field(&d), "category");
    }

    #[test]
    fn test_category_checked_for_presence_before_email() {
        let mut d = draft();
        d.category = None;
        d.student_email = Some("broken".into());
        assert_eq!(failing_field(&d), "category");
    }

    #[test]
    fn test_team_project_round_trip() {
        let mut d = draft();
        d.is_team_project = true;
        d.team_size = Some(3);
        d.team_members = Some("A, B, C".into());
        let project = validate(&d).expect("valid team draft");
        assert!(project.is_team_project);
        assert_eq!(project.team_size, Some(3));
        assert_eq!(project.team_members.as_deref(), Some("A, B, C"));

        d.is_team_project = false;
        assert_eq!(failing_field(&d), "team_size");
    }

    #[test]
    fn test_team_project_rules() {
        let mut d = draft();
        d.is_team_project = true;
        d.team_size = Some(1);
        d.team_members = Some("A".into());
        assert_eq!(failing_field(&d), "team_size");

        d.team_size = Some(2);
        d.team_members = Some("  ".into());
        assert_eq!(failing_field(&d), "team_members");
    }

    #[test]
    fn test_individual_project_normalizes_blank_members() {
        let mut d = draft();
        d.team_members = Some("".into());
        let project = validate(&d).expect("blank members normalize to none");
        assert_eq!(project.team_members, None);
    }

    #[test]
    fn test_resources_rules() {
        let mut d = draft();
        d.required_resources = vec!["LiDAR".into(), "LiDAR".into()];
        assert_eq!(failing_field(&d), "required_resources");

        d.required_resources = vec!["LiDAR".into(), OTHER_RESOURCE.into()];
        assert_eq!(failing_field(&d), "other_resources");

        d.other_resources = Some("Soldering station".into());
        let project = validate(&d).expect("other explained");
        assert_eq!(project.other_resources.as_deref(), Some("Soldering station"));
    }

    #[test]
    fn test_empty_resources_allowed() {
        let mut d = draft();
        d.required_resources.clear();
        assert!(validate(&d).is_ok());
    }
}
