use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use super::domain::{PrivilegeDraft, PrivilegeId, StaffDraft, StaffId};
use super::repository::{
    PrivilegeRepository, RepositoryError, StaffRepository, StudentRepository,
};
use super::service::{PortalServiceError, PrivilegePortalService, StaffDirectoryService};
use crate::eligibility::{
    deserialize_lenient, AcademicProfile, ClassificationBucket, CriteriaSet, CriterionCheck,
    QualificationResult, StudentId,
};

type SharedService<P, S> = Arc<PrivilegePortalService<P, S>>;

/// Router builder exposing the privilege catalog, student lookups, and eligibility checks.
pub fn portal_router<P, S>(service: SharedService<P, S>) -> Router
where
    P: PrivilegeRepository + 'static,
    S: StudentRepository + 'static,
{
    Router::new()
        .route(
            "/api/privileges",
            get(list_privileges_handler::<P, S>).post(create_privilege_handler::<P, S>),
        )
        .route(
            "/api/privileges/:privilege_id",
            get(get_privilege_handler::<P, S>)
                .put(update_privilege_handler::<P, S>)
                .delete(delete_privilege_handler::<P, S>),
        )
        .route(
            "/api/privileges/:privilege_id/qualified-students",
            get(qualified_students_handler::<P, S>),
        )
        .route("/api/students", get(list_students_handler::<P, S>))
        .route("/api/students/:student_id", get(get_student_handler::<P, S>))
        .route(
            "/api/students/:student_id/dashboard",
            get(dashboard_handler::<P, S>),
        )
        .route(
            "/api/students/:student_id/privileges/:privilege_id",
            get(checklist_handler::<P, S>),
        )
        .route("/api/eligibility/evaluate", post(evaluate_handler::<P, S>))
        .with_state(service)
}

/// Router builder for the staff directory.
pub fn staff_router<T>(service: Arc<StaffDirectoryService<T>>) -> Router
where
    T: StaffRepository + 'static,
{
    Router::new()
        .route(
            "/api/staff",
            get(list_staff_handler::<T>).post(create_staff_handler::<T>),
        )
        .route("/api/staff/:staff_id", get(get_staff_handler::<T>))
        .with_state(service)
}

/// Ad-hoc evaluation payload: a profile plus a loose criteria document.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub profile: AcademicProfile,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub criteria: Option<CriteriaSet>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    #[serde(flatten)]
    pub result: QualificationResult,
    pub checks: Vec<CriterionCheck>,
    pub classification: ClassificationBucket,
}

pub(crate) async fn list_privileges_handler<P, S>(
    State(service): State<SharedService<P, S>>,
) -> Response
where
    P: PrivilegeRepository + 'static,
    S: StudentRepository + 'static,
{
    match service.list_privileges() {
        Ok(privileges) => (StatusCode::OK, axum::Json(privileges)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_privilege_handler<P, S>(
    State(service): State<SharedService<P, S>>,
    axum::Json(draft): axum::Json<PrivilegeDraft>,
) -> Response
where
    P: PrivilegeRepository + 'static,
    S: StudentRepository + 'static,
{
    match service.create_privilege(draft) {
        Ok(privilege) => (StatusCode::CREATED, axum::Json(privilege)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_privilege_handler<P, S>(
    State(service): State<SharedService<P, S>>,
    Path(raw_id): Path<String>,
) -> Response
where
    P: PrivilegeRepository + 'static,
    S: StudentRepository + 'static,
{
    let Some(id) = PrivilegeId::parse(&raw_id) else {
        return invalid_privilege_id(&raw_id);
    };
    match service.get_privilege(id) {
        Ok(privilege) => (StatusCode::OK, axum::Json(privilege)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_privilege_handler<P, S>(
    State(service): State<SharedService<P, S>>,
    Path(raw_id): Path<String>,
    axum::Json(draft): axum::Json<PrivilegeDraft>,
) -> Response
where
    P: PrivilegeRepository + 'static,
    S: StudentRepository + 'static,
{
    let Some(id) = PrivilegeId::parse(&raw_id) else {
        return invalid_privilege_id(&raw_id);
    };
    match service.update_privilege(id, draft) {
        Ok(privilege) => (StatusCode::OK, axum::Json(privilege)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_privilege_handler<P, S>(
    State(service): State<SharedService<P, S>>,
    Path(raw_id): Path<String>,
) -> Response
where
    P: PrivilegeRepository + 'static,
    S: StudentRepository + 'static,
{
    let Some(id) = PrivilegeId::parse(&raw_id) else {
        return invalid_privilege_id(&raw_id);
    };
    match service.delete_privilege(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn qualified_students_handler<P, S>(
    State(service): State<SharedService<P, S>>,
    Path(raw_id): Path<String>,
) -> Response
where
    P: PrivilegeRepository + 'static,
    S: StudentRepository + 'static,
{
    let Some(id) = PrivilegeId::parse(&raw_id) else {
        return invalid_privilege_id(&raw_id);
    };
    match service.qualified_students(id) {
        Ok(students) => (StatusCode::OK, axum::Json(students)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_students_handler<P, S>(
    State(service): State<SharedService<P, S>>,
) -> Response
where
    P: PrivilegeRepository + 'static,
    S: StudentRepository + 'static,
{
    match service.list_students() {
        Ok(students) => (StatusCode::OK, axum::Json(students)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_student_handler<P, S>(
    State(service): State<SharedService<P, S>>,
    Path(student_id): Path<String>,
) -> Response
where
    P: PrivilegeRepository + 'static,
    S: StudentRepository + 'static,
{
    match service.get_student(&StudentId(student_id)) {
        Ok(student) => (StatusCode::OK, axum::Json(student)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn dashboard_handler<P, S>(
    State(service): State<SharedService<P, S>>,
    Path(student_id): Path<String>,
) -> Response
where
    P: PrivilegeRepository + 'static,
    S: StudentRepository + 'static,
{
    match service.dashboard(&StudentId(student_id)) {
        Ok(dashboard) => (StatusCode::OK, axum::Json(dashboard)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn checklist_handler<P, S>(
    State(service): State<SharedService<P, S>>,
    Path((student_id, raw_id)): Path<(String, String)>,
) -> Response
where
    P: PrivilegeRepository + 'static,
    S: StudentRepository + 'static,
{
    let Some(privilege_id) = PrivilegeId::parse(&raw_id) else {
        return invalid_privilege_id(&raw_id);
    };
    match service.checklist(&StudentId(student_id), privilege_id) {
        Ok(checklist) => (StatusCode::OK, axum::Json(checklist)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn evaluate_handler<P, S>(
    State(service): State<SharedService<P, S>>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response
where
    P: PrivilegeRepository + 'static,
    S: StudentRepository + 'static,
{
    let engine = service.engine();
    let criteria = request.criteria.as_ref();
    let response = EvaluateResponse {
        result: engine.evaluate(&request.profile, criteria),
        checks: crate::eligibility::explain(&request.profile, criteria),
        classification: engine.bucket(&request.profile, criteria),
    };
    (StatusCode::OK, axum::Json(response)).into_response()
}

pub(crate) async fn list_staff_handler<T>(
    State(service): State<Arc<StaffDirectoryService<T>>>,
) -> Response
where
    T: StaffRepository + 'static,
{
    match service.list_staff() {
        Ok(staff) => (StatusCode::OK, axum::Json(staff)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_staff_handler<T>(
    State(service): State<Arc<StaffDirectoryService<T>>>,
    axum::Json(draft): axum::Json<StaffDraft>,
) -> Response
where
    T: StaffRepository + 'static,
{
    match service.create_staff(draft) {
        Ok(member) => (StatusCode::CREATED, axum::Json(member)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_staff_handler<T>(
    State(service): State<Arc<StaffDirectoryService<T>>>,
    Path(staff_id): Path<String>,
) -> Response
where
    T: StaffRepository + 'static,
{
    match service.get_staff(&StaffId(staff_id)) {
        Ok(member) => (StatusCode::OK, axum::Json(member)).into_response(),
        Err(err) => error_response(err),
    }
}

fn invalid_privilege_id(raw_id: &str) -> Response {
    let payload = json!({
        "error": format!("invalid privilege id '{raw_id}'"),
    });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

fn error_response(err: PortalServiceError) -> Response {
    let status = match &err {
        PortalServiceError::Draft(_) => StatusCode::BAD_REQUEST,
        PortalServiceError::PrivilegeNotFound(_)
        | PortalServiceError::StudentNotFound(_)
        | PortalServiceError::StaffNotFound(_) => StatusCode::NOT_FOUND,
        PortalServiceError::Repository(RepositoryError::Conflict(_)) => {
            warn!(error = %err, "portal write rejected");
            StatusCode::CONFLICT
        }
        PortalServiceError::Repository(_) => {
            error!(error = %err, "portal repository failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
