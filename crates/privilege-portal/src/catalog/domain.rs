use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::eligibility::{deserialize_lenient, AcademicProfile, CriteriaSet, StudentId};

/// Identifier wrapper for privileges, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrivilegeId(pub u32);

impl PrivilegeId {
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().map(Self)
    }
}

impl fmt::Display for PrivilegeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A benefit offered to students, gated by optional eligibility criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Privilege {
    pub id: PrivilegeId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub reward: String,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub criteria: Option<CriteriaSet>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Staff-submitted privilege form. Criteria arrive as a loose document and are
/// normalised on deserialisation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivilegeDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reward: String,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub criteria: Option<CriteriaSet>,
}

impl PrivilegeDraft {
    pub fn validate(&self) -> Result<(), DraftError> {
        let missing: Vec<&'static str> = [
            ("title", &self.title),
            ("description", &self.description),
            ("reward", &self.reward),
            ("type", &self.kind),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DraftError::MissingFields(missing))
        }
    }

    pub fn into_privilege(self, id: PrivilegeId, updated_at: DateTime<Utc>) -> Privilege {
        Privilege {
            id,
            title: self.title,
            kind: self.kind,
            description: self.description,
            reward: self.reward,
            criteria: self.criteria.filter(|criteria| !criteria.is_empty()),
            updated_at,
        }
    }
}

impl From<Privilege> for PrivilegeDraft {
    fn from(privilege: Privilege) -> Self {
        Self {
            title: privilege.title,
            kind: privilege.kind,
            description: privilege.description,
            reward: privilege.reward,
            criteria: privilege.criteria,
        }
    }
}

/// Rejection for incomplete privilege forms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Registrar record for a student: the academic profile plus display details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    #[serde(flatten)]
    pub profile: AcademicProfile,
    pub name: String,
    pub faculty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl StudentRecord {
    pub fn id(&self) -> &StudentId {
        &self.profile.id
    }

    pub fn summary(&self) -> StudentSummary {
        StudentSummary {
            id: self.profile.id.clone(),
            name: self.name.clone(),
            faculty: self.faculty.clone(),
            major: self.major.clone(),
            gpax: self.profile.gpax,
            study_year: self.profile.study_year,
        }
    }
}

/// Transcript-free view of a student for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: StudentId,
    pub name: String,
    pub faculty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    pub gpax: f64,
    pub study_year: u32,
}

/// Staff directory identifier, chosen by the administrator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(pub String);

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Faculty officer or administrator who manages the privilege catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    pub role: String,
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Staff registration form as submitted by an administrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffDraft {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl StaffDraft {
    pub fn validate(&self) -> Result<(), DraftError> {
        let missing: Vec<&'static str> = [
            ("id", &self.id),
            ("name", &self.name),
            ("role", &self.role),
            ("avatarUrl", &self.avatar_url),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DraftError::MissingFields(missing))
        }
    }

    pub fn into_member(self) -> StaffMember {
        StaffMember {
            id: StaffId(self.id.trim().to_string()),
            name: self.name,
            role: self.role,
            avatar_url: self.avatar_url,
            email: self
                .email
                .map(|email| email.trim().to_string())
                .filter(|email| !email.is_empty()),
        }
    }
}
