use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::catalog::domain::{Privilege, PrivilegeDraft, PrivilegeId, StudentRecord};
use crate::catalog::repository::{PrivilegeRepository, RepositoryError, StudentRepository};
use crate::catalog::{
    portal_router, staff_router, InMemoryPrivilegeRepository, InMemoryStaffRepository,
    InMemoryStudentRepository, PrivilegePortalService, SeedData, StaffDirectoryService,
};
use crate::eligibility::{CriteriaSet, StudentId};

pub(super) type MemoryService =
    PrivilegePortalService<InMemoryPrivilegeRepository, InMemoryStudentRepository>;

pub(super) fn seeded_service() -> MemoryService {
    let seed = SeedData::standard();
    PrivilegePortalService::new(
        Arc::new(InMemoryPrivilegeRepository::with_privileges(seed.privileges)),
        Arc::new(InMemoryStudentRepository::with_students(seed.students)),
    )
}

pub(super) fn seeded_router() -> axum::Router {
    portal_router(Arc::new(seeded_service()))
}

pub(super) fn seeded_staff_directory() -> StaffDirectoryService<InMemoryStaffRepository> {
    StaffDirectoryService::new(Arc::new(InMemoryStaffRepository::with_staff(
        SeedData::standard().staff,
    )))
}

pub(super) fn seeded_staff_router() -> axum::Router {
    staff_router(Arc::new(seeded_staff_directory()))
}

pub(super) fn student_id(raw: &str) -> StudentId {
    StudentId(raw.to_string())
}

pub(super) fn library_pass_draft() -> PrivilegeDraft {
    PrivilegeDraft {
        title: "Extended Library Hours".to_string(),
        kind: "Faculty".to_string(),
        description: "Late-night access to the engineering library".to_string(),
        reward: "24h access card".to_string(),
        criteria: Some(CriteriaSet::default().with_min_gpa(3.0)),
    }
}

pub(super) struct UnavailablePrivileges;

impl PrivilegeRepository for UnavailablePrivileges {
    fn list(&self) -> Result<Vec<Privilege>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: PrivilegeId) -> Result<Option<Privilege>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn create(
        &self,
        _draft: PrivilegeDraft,
        _now: DateTime<Utc>,
    ) -> Result<Privilege, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(
        &self,
        _id: PrivilegeId,
        _draft: PrivilegeDraft,
        _now: DateTime<Utc>,
    ) -> Result<Privilege, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: PrivilegeId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct EmptyStudents;

impl StudentRepository for EmptyStudents {
    fn list(&self) -> Result<Vec<StudentRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn fetch(&self, _id: &StudentId) -> Result<Option<StudentRecord>, RepositoryError> {
        Ok(None)
    }
}

pub(super) fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request builds"),
        None => builder.body(Body::empty()).expect("request builds"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 64)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
