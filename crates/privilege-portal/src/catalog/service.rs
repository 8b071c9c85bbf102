use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{
    DraftError, Privilege, PrivilegeDraft, PrivilegeId, StaffDraft, StaffId, StaffMember,
    StudentRecord, StudentSummary,
};
use super::repository::{
    PrivilegeRepository, RepositoryError, StaffRepository, StudentRepository,
};
use super::views::{PrivilegeChecklist, StudentDashboard};
use crate::eligibility::{EligibilityEngine, StudentId};

/// Service composing the privilege and student stores with the eligibility engine.
pub struct PrivilegePortalService<P, S> {
    privileges: Arc<P>,
    students: Arc<S>,
    engine: Arc<EligibilityEngine>,
}

impl<P, S> PrivilegePortalService<P, S>
where
    P: PrivilegeRepository + 'static,
    S: StudentRepository + 'static,
{
    pub fn new(privileges: Arc<P>, students: Arc<S>) -> Self {
        Self::with_engine(privileges, students, EligibilityEngine::default())
    }

    pub fn with_engine(privileges: Arc<P>, students: Arc<S>, engine: EligibilityEngine) -> Self {
        Self {
            privileges,
            students,
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    pub fn list_privileges(&self) -> Result<Vec<Privilege>, PortalServiceError> {
        Ok(self.privileges.list()?)
    }

    pub fn get_privilege(&self, id: PrivilegeId) -> Result<Privilege, PortalServiceError> {
        self.privileges
            .fetch(id)?
            .ok_or(PortalServiceError::PrivilegeNotFound(id))
    }

    /// Validate and persist a new privilege.
    pub fn create_privilege(&self, draft: PrivilegeDraft) -> Result<Privilege, PortalServiceError> {
        draft.validate()?;
        let privilege = self.privileges.create(draft, Utc::now())?;
        info!(privilege_id = %privilege.id, title = %privilege.title, "privilege created");
        Ok(privilege)
    }

    /// Replace every field of an existing privilege.
    pub fn update_privilege(
        &self,
        id: PrivilegeId,
        draft: PrivilegeDraft,
    ) -> Result<Privilege, PortalServiceError> {
        draft.validate()?;
        let privilege = self
            .privileges
            .update(id, draft, Utc::now())
            .map_err(|err| not_found_as(err, PortalServiceError::PrivilegeNotFound(id)))?;
        info!(privilege_id = %id, "privilege updated");
        Ok(privilege)
    }

    pub fn delete_privilege(&self, id: PrivilegeId) -> Result<(), PortalServiceError> {
        self.privileges
            .delete(id)
            .map_err(|err| not_found_as(err, PortalServiceError::PrivilegeNotFound(id)))?;
        info!(privilege_id = %id, "privilege deleted");
        Ok(())
    }

    pub fn list_students(&self) -> Result<Vec<StudentRecord>, PortalServiceError> {
        Ok(self.students.list()?)
    }

    pub fn get_student(&self, id: &StudentId) -> Result<StudentRecord, PortalServiceError> {
        self.students
            .fetch(id)?
            .ok_or_else(|| PortalServiceError::StudentNotFound(id.clone()))
    }

    /// Classify every catalog privilege for one student.
    pub fn dashboard(&self, id: &StudentId) -> Result<StudentDashboard, PortalServiceError> {
        let student = self.get_student(id)?;
        let privileges = self.privileges.list()?;

        let classification = self.engine.classify(
            &student.profile,
            privileges
                .iter()
                .map(|privilege| (privilege, privilege.criteria.as_ref())),
        );
        debug!(
            student_id = %id,
            achieved = classification.achieved.len(),
            nearly_achieved = classification.nearly_achieved.len(),
            not_achieved = classification.not_achieved.len(),
            "dashboard classified"
        );

        Ok(StudentDashboard::new(student.summary(), classification))
    }

    /// Itemised criteria check for one student against one privilege.
    pub fn checklist(
        &self,
        student_id: &StudentId,
        privilege_id: PrivilegeId,
    ) -> Result<PrivilegeChecklist, PortalServiceError> {
        let student = self.get_student(student_id)?;
        let privilege = self.get_privilege(privilege_id)?;
        let criteria = privilege.criteria.as_ref();

        let checks = crate::eligibility::explain(&student.profile, criteria);
        let result = self.engine.evaluate(&student.profile, criteria);
        let classification = self.engine.bucket(&student.profile, criteria);

        Ok(PrivilegeChecklist {
            student: student.summary(),
            privilege,
            result,
            checks,
            classification,
        })
    }

    /// Students who meet every criterion of the privilege, in registrar order.
    pub fn qualified_students(
        &self,
        privilege_id: PrivilegeId,
    ) -> Result<Vec<StudentSummary>, PortalServiceError> {
        let privilege = self.get_privilege(privilege_id)?;
        let criteria = privilege.criteria.as_ref();
        let students = self.students.list()?;
        let total = students.len();

        let qualified: Vec<StudentSummary> = students
            .iter()
            .filter(|student| self.engine.evaluate(&student.profile, criteria).is_qualified)
            .map(StudentRecord::summary)
            .collect();
        debug!(
            privilege_id = %privilege_id,
            qualified = qualified.len(),
            total,
            "qualifier run"
        );

        Ok(qualified)
    }
}

/// Staff directory backing the admin users page.
pub struct StaffDirectoryService<T> {
    staff: Arc<T>,
}

impl<T> StaffDirectoryService<T>
where
    T: StaffRepository + 'static,
{
    pub fn new(staff: Arc<T>) -> Self {
        Self { staff }
    }

    pub fn list_staff(&self) -> Result<Vec<StaffMember>, PortalServiceError> {
        Ok(self.staff.list()?)
    }

    pub fn get_staff(&self, id: &StaffId) -> Result<StaffMember, PortalServiceError> {
        self.staff
            .fetch(id)?
            .ok_or_else(|| PortalServiceError::StaffNotFound(id.clone()))
    }

    /// Register a staff member; duplicate ids or emails are a repository conflict.
    pub fn create_staff(&self, draft: StaffDraft) -> Result<StaffMember, PortalServiceError> {
        draft.validate()?;
        let member = self.staff.create(draft.into_member())?;
        info!(staff_id = %member.id, role = %member.role, "staff member registered");
        Ok(member)
    }
}

fn not_found_as(err: RepositoryError, replacement: PortalServiceError) -> PortalServiceError {
    match err {
        RepositoryError::NotFound => replacement,
        other => PortalServiceError::Repository(other),
    }
}

/// Error raised by the portal service.
#[derive(Debug, thiserror::Error)]
pub enum PortalServiceError {
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error("privilege {0} not found")]
    PrivilegeNotFound(PrivilegeId),
    #[error("student {0} not found")]
    StudentNotFound(StudentId),
    #[error("staff member {0} not found")]
    StaffNotFound(StaffId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
