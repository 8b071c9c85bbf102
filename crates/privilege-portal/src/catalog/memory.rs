use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::domain::{
    Privilege, PrivilegeDraft, PrivilegeId, StaffId, StaffMember, StudentRecord,
};
use super::repository::{
    PrivilegeRepository, RepositoryError, StaffRepository, StudentRepository,
};
use crate::eligibility::StudentId;

/// Process-local privilege store. Ids come from a monotonic counter seeded
/// past the highest loaded id, so deleted ids are never handed out again.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPrivilegeRepository {
    table: Arc<Mutex<PrivilegeTable>>,
}

#[derive(Debug)]
struct PrivilegeTable {
    records: BTreeMap<PrivilegeId, Privilege>,
    /// `None` once the id space is exhausted.
    next_id: Option<u32>,
}

impl Default for PrivilegeTable {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: Some(1),
        }
    }
}

impl InMemoryPrivilegeRepository {
    pub fn with_privileges(privileges: impl IntoIterator<Item = Privilege>) -> Self {
        let records: BTreeMap<PrivilegeId, Privilege> = privileges
            .into_iter()
            .map(|privilege| (privilege.id, privilege))
            .collect();
        let next_id = match records.keys().next_back() {
            Some(highest) => highest.0.checked_add(1),
            None => Some(1),
        };
        Self {
            table: Arc::new(Mutex::new(PrivilegeTable { records, next_id })),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, PrivilegeTable>, RepositoryError> {
        self.table
            .lock()
            .map_err(|_| RepositoryError::Unavailable("privilege store poisoned".to_string()))
    }
}

impl PrivilegeRepository for InMemoryPrivilegeRepository {
    fn list(&self) -> Result<Vec<Privilege>, RepositoryError> {
        Ok(self.lock()?.records.values().cloned().collect())
    }

    fn fetch(&self, id: PrivilegeId) -> Result<Option<Privilege>, RepositoryError> {
        Ok(self.lock()?.records.get(&id).cloned())
    }

    fn create(
        &self,
        draft: PrivilegeDraft,
        now: DateTime<Utc>,
    ) -> Result<Privilege, RepositoryError> {
        let mut table = self.lock()?;
        let next = table
            .next_id
            .ok_or_else(|| RepositoryError::Conflict("privilege ids exhausted".to_string()))?;
        let id = PrivilegeId(next);
        if table.records.contains_key(&id) {
            return Err(RepositoryError::Conflict(format!(
                "privilege {id} already exists"
            )));
        }

        table.next_id = next.checked_add(1);
        let privilege = draft.into_privilege(id, now);
        table.records.insert(id, privilege.clone());
        Ok(privilege)
    }

    fn update(
        &self,
        id: PrivilegeId,
        draft: PrivilegeDraft,
        now: DateTime<Utc>,
    ) -> Result<Privilege, RepositoryError> {
        let mut table = self.lock()?;
        let slot = table.records.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        *slot = draft.into_privilege(id, now);
        Ok(slot.clone())
    }

    fn delete(&self, id: PrivilegeId) -> Result<(), RepositoryError> {
        self.lock()?
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

/// Process-local registrar snapshot, kept in load order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStudentRepository {
    records: Arc<Mutex<Vec<StudentRecord>>>,
}

impl InMemoryStudentRepository {
    pub fn with_students(students: impl IntoIterator<Item = StudentRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(students.into_iter().collect())),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<StudentRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("student store poisoned".to_string()))
    }
}

impl StudentRepository for InMemoryStudentRepository {
    fn list(&self) -> Result<Vec<StudentRecord>, RepositoryError> {
        Ok(self.lock()?.clone())
    }

    fn fetch(&self, id: &StudentId) -> Result<Option<StudentRecord>, RepositoryError> {
        Ok(self
            .lock()?
            .iter()
            .find(|student| student.id() == id)
            .cloned())
    }
}

/// Process-local staff directory, kept in registration order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStaffRepository {
    records: Arc<Mutex<Vec<StaffMember>>>,
}

impl InMemoryStaffRepository {
    pub fn with_staff(staff: impl IntoIterator<Item = StaffMember>) -> Self {
        Self {
            records: Arc::new(Mutex::new(staff.into_iter().collect())),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<StaffMember>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("staff store poisoned".to_string()))
    }
}

impl StaffRepository for InMemoryStaffRepository {
    fn list(&self) -> Result<Vec<StaffMember>, RepositoryError> {
        Ok(self.lock()?.clone())
    }

    fn fetch(&self, id: &StaffId) -> Result<Option<StaffMember>, RepositoryError> {
        Ok(self.lock()?.iter().find(|member| &member.id == id).cloned())
    }

    fn create(&self, member: StaffMember) -> Result<StaffMember, RepositoryError> {
        let mut records = self.lock()?;
        if records.iter().any(|existing| existing.id == member.id) {
            return Err(RepositoryError::Conflict(format!(
                "staff member {} already exists",
                member.id
            )));
        }
        if let Some(email) = &member.email {
            let taken = records.iter().any(|existing| {
                existing
                    .email
                    .as_deref()
                    .is_some_and(|other| other.eq_ignore_ascii_case(email))
            });
            if taken {
                return Err(RepositoryError::Conflict(format!(
                    "email {email} is already registered"
                )));
            }
        }

        records.push(member.clone());
        Ok(member)
    }
}
