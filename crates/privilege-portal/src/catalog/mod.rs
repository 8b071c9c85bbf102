//! Privilege catalog, registrar and staff lookups, and the HTTP surface over the eligibility engine.

pub mod domain;
pub mod memory;
pub mod repository;
pub mod roster;
pub mod router;
pub mod seed;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    DraftError, Privilege, PrivilegeDraft, PrivilegeId, StaffDraft, StaffId, StaffMember,
    StudentRecord, StudentSummary,
};
pub use memory::{InMemoryPrivilegeRepository, InMemoryStaffRepository, InMemoryStudentRepository};
pub use repository::{PrivilegeRepository, RepositoryError, StaffRepository, StudentRepository};
pub use roster::{RosterImportError, RosterImporter};
pub use router::{portal_router, staff_router};
pub use seed::{SeedData, SeedError};
pub use service::{PortalServiceError, PrivilegePortalService, StaffDirectoryService};
pub use views::{NearlyAchievedPrivilege, PrivilegeChecklist, StudentDashboard};
