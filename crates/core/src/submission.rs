//! Submission form rules.
//!
//! The form runs in one of two modes. With no editing target it creates a
//! new project for the verified member; with a target it edits that record.
//! Both modes validate required fields and apply the duplicate rule, the
//! edit path excluding the record being edited.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::member::Member;
use crate::project::{DuplicateKey, NewProject, ProjectRecord, UpdateProject};
use crate::types::ProjectId;

pub const MSG_VERIFY_MEMBERSHIP_FIRST: &str = "Please verify your membership first";
pub const MSG_DUPLICATE_SUBMISSION: &str =
    "A project with this name and creator has already been submitted";

/// Text fields of the submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub creator_name: String,
    #[serde(default)]
    pub project_link: String,
    #[serde(default)]
    pub project_description: String,
}

/// Which path a submit takes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(ProjectId),
}

/// Serializable snapshot of the form mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub mode: &'static str,
    pub editing_project_id: Option<ProjectId>,
}

impl FormMode {
    pub fn editing_id(&self) -> Option<&ProjectId> {
        match self {
            Self::Create => None,
            Self::Edit(id) => Some(id),
        }
    }

    pub fn state(&self) -> FormState {
        match self {
            Self::Create => FormState {
                mode: "create",
                editing_project_id: None,
            },
            Self::Edit(id) => FormState {
                mode: "edit",
                editing_project_id: Some(id.clone()),
            },
        }
    }
}

impl FormFields {
    /// Populate the form from an existing record (entering edit mode).
    pub fn from_record(record: &ProjectRecord) -> Self {
        Self {
            project_name: record.name.clone(),
            creator_name: record.creator.clone(),
            project_link: record.link.clone(),
            project_description: record.description.clone(),
        }
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            project_name: self.project_name.trim().to_string(),
            creator_name: self.creator_name.trim().to_string(),
            project_link: self.project_link.trim().to_string(),
            project_description: self.project_description.trim().to_string(),
        }
    }

    /// Check the four required fields, reporting the first one missing.
    pub fn validate_required(&self) -> Result<(), CoreError> {
        let required = [
            ("project name", &self.project_name),
            ("creator name", &self.creator_name),
            ("project link", &self.project_link),
            ("project description", &self.project_description),
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((label, _)) => Err(CoreError::Validation(format!(
                "Missing required field: {label}"
            ))),
            None => Ok(()),
        }
    }

    pub fn duplicate_key(&self, member_id: &str) -> DuplicateKey {
        DuplicateKey::new(&self.project_name, &self.creator_name, member_id)
    }

    pub fn into_new_project(self, member: &Member, image: Option<String>) -> NewProject {
        NewProject {
            name: self.project_name,
            creator: self.creator_name,
            link: self.project_link,
            description: self.project_description,
            image,
            member_email: member.id().to_string(),
        }
    }

    /// Build an update. A `None` image keeps the stored one.
    pub fn into_update(self, image: Option<String>) -> UpdateProject {
        UpdateProject {
            name: Some(self.project_name),
            creator: Some(self.creator_name),
            link: Some(self.project_link),
            description: Some(self.project_description),
            image,
        }
    }
}

/// Gate for the create path: a verified member must be present.
pub fn require_member(member: Option<&Member>) -> Result<&Member, CoreError> {
    member.ok_or_else(|| CoreError::Unauthorized(MSG_VERIFY_MEMBERSHIP_FIRST.into()))
}
