use chrono::{DateTime, Utc};

use super::domain::{Privilege, PrivilegeDraft, PrivilegeId, StaffId, StaffMember, StudentRecord};
use crate::eligibility::StudentId;

/// Storage abstraction for privileges so the service can be exercised in isolation.
pub trait PrivilegeRepository: Send + Sync {
    /// All privileges, ordered by id.
    fn list(&self) -> Result<Vec<Privilege>, RepositoryError>;
    fn fetch(&self, id: PrivilegeId) -> Result<Option<Privilege>, RepositoryError>;
    /// Persist a validated draft under a store-assigned id. Ids are never reused.
    fn create(
        &self,
        draft: PrivilegeDraft,
        now: DateTime<Utc>,
    ) -> Result<Privilege, RepositoryError>;
    fn update(
        &self,
        id: PrivilegeId,
        draft: PrivilegeDraft,
        now: DateTime<Utc>,
    ) -> Result<Privilege, RepositoryError>;
    fn delete(&self, id: PrivilegeId) -> Result<(), RepositoryError>;
}

/// Read-only access to registrar data.
pub trait StudentRepository: Send + Sync {
    fn list(&self) -> Result<Vec<StudentRecord>, RepositoryError>;
    fn fetch(&self, id: &StudentId) -> Result<Option<StudentRecord>, RepositoryError>;
}

/// Staff directory. Ids and email addresses are unique.
pub trait StaffRepository: Send + Sync {
    fn list(&self) -> Result<Vec<StaffMember>, RepositoryError>;
    fn fetch(&self, id: &StaffId) -> Result<Option<StaffMember>, RepositoryError>;
    fn create(&self, member: StaffMember) -> Result<StaffMember, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
