use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::{
    json_request, read_json_body, seeded_router, seeded_staff_router, EmptyStudents,
    UnavailablePrivileges,
};
use crate::catalog::{
    portal_router, InMemoryPrivilegeRepository, InMemoryStudentRepository, PrivilegeDraft,
    PrivilegeId, PrivilegePortalService,
};

#[tokio::test]
async fn lists_seeded_privileges() {
    let response = seeded_router()
        .oneshot(json_request(Method::GET, "/api/privileges", None))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let privileges = body.as_array().expect("array payload");
    assert_eq!(privileges.len(), 4);
    assert_eq!(privileges[0]["type"], "University-wide");
    assert_eq!(privileges[0]["criteria"]["gpax"], 3.75);
    assert_eq!(privileges[0]["criteria"]["studyYear"]["min"], 2);
}

#[tokio::test]
async fn create_without_required_fields_is_bad_request() {
    let response = seeded_router()
        .oneshot(json_request(
            Method::POST,
            "/api/privileges",
            Some(json!({ "title": "Gym pass", "type": "Faculty" })),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "missing required fields: description, reward");
}

#[tokio::test]
async fn created_privilege_is_served_back() {
    let router = seeded_router();
    let payload = json!({
        "title": "Gym pass",
        "type": "Faculty",
        "description": "Free entry to the faculty gym",
        "reward": "Membership card",
        "criteria": { "gpax": "3.0", "studyYear": { "min": 0, "max": 2 }, "requiredCourses": "" }
    });

    let created = router
        .clone()
        .oneshot(json_request(Method::POST, "/api/privileges", Some(payload)))
        .await
        .expect("router responds");
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = read_json_body(created).await;
    assert_eq!(created["id"], 5);

    let fetched = router
        .oneshot(json_request(Method::GET, "/api/privileges/5", None))
        .await
        .expect("router responds");
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched = read_json_body(fetched).await;
    assert_eq!(fetched["title"], "Gym pass");
    assert_eq!(fetched["criteria"]["gpax"], 3.0);
    assert_eq!(fetched["criteria"]["studyYear"]["max"], 2);
    assert!(fetched["criteria"]["studyYear"]["min"].is_null());
}

#[tokio::test]
async fn malformed_and_unknown_ids_are_distinguished() {
    let router = seeded_router();

    let malformed = router
        .clone()
        .oneshot(json_request(Method::GET, "/api/privileges/abc", None))
        .await
        .expect("router responds");
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(malformed).await;
    assert_eq!(body["error"], "invalid privilege id 'abc'");

    let unknown = router
        .oneshot(json_request(Method::GET, "/api/privileges/99", None))
        .await
        .expect("router responds");
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_and_delete_round() {
    let router = seeded_router();
    let payload = json!({
        "title": "Zone B Parking Reservation",
        "type": "University-wide",
        "description": "Reserved parking next to the dormitories",
        "reward": "Zone B parking sticker",
        "criteria": { "studyYear": { "min": 3 } }
    });

    let updated = router
        .clone()
        .oneshot(json_request(Method::PUT, "/api/privileges/4", Some(payload)))
        .await
        .expect("router responds");
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = read_json_body(updated).await;
    assert_eq!(updated["title"], "Zone B Parking Reservation");

    let deleted = router
        .clone()
        .oneshot(json_request(Method::DELETE, "/api/privileges/4", None))
        .await
        .expect("router responds");
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let again = router
        .oneshot(json_request(Method::DELETE, "/api/privileges/4", None))
        .await
        .expect("router responds");
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn student_lookup_and_dashboard() {
    let router = seeded_router();

    let missing = router
        .clone()
        .oneshot(json_request(Method::GET, "/api/students/00000000", None))
        .await
        .expect("router responds");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let dashboard = router
        .oneshot(json_request(
            Method::GET,
            "/api/students/65020011/dashboard",
            None,
        ))
        .await
        .expect("router responds");
    assert_eq!(dashboard.status(), StatusCode::OK);
    let body = read_json_body(dashboard).await;
    assert_eq!(body["student"]["name"], "Mana Odthon");
    assert_eq!(body["achieved"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["nearlyAchieved"][0]["id"], 4);
    assert_eq!(body["nearlyAchieved"][0]["reason"], "one academic year away");
    assert_eq!(body["notAchieved"][0]["id"], 3);
}

#[tokio::test]
async fn checklist_reports_each_criterion() {
    let response = seeded_router()
        .oneshot(json_request(
            Method::GET,
            "/api/students/66010008/privileges/3",
            None,
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["isQualified"], false);
    assert_eq!(
        body["perCriterion"],
        json!({ "gpax": false, "specificCourseGrade": false })
    );
    assert_eq!(body["classification"]["bucket"], "nearlyAchieved");
    assert_eq!(body["classification"]["reason"], "short by 0.05 GPA points");
    assert_eq!(body["checks"][1]["criterion"], "specificCourseGrade");
}

#[tokio::test]
async fn qualified_students_listing() {
    let response = seeded_router()
        .oneshot(json_request(
            Method::GET,
            "/api/privileges/4/qualified-students",
            None,
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let ids: Vec<&str> = body
        .as_array()
        .expect("array payload")
        .iter()
        .filter_map(|student| student["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["66010001", "66010002", "66010005", "66010008"]);
}

#[tokio::test]
async fn ad_hoc_evaluation_accepts_loose_criteria() {
    let payload = json!({
        "profile": {
            "id": "S-2",
            "gpax": 3.2,
            "studyYear": 2,
            "transcript": [{ "courseId": "CPE101", "grade": "A" }]
        },
        "criteria": { "minGpa": 3.25, "specificCourseGrade": { "courseId": "CPE101", "minGrade": "B" } }
    });

    let response = seeded_router()
        .oneshot(json_request(
            Method::POST,
            "/api/eligibility/evaluate",
            Some(payload),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["isQualified"], false);
    assert_eq!(
        body["perCriterion"],
        json!({ "gpax": false, "specificCourseGrade": true })
    );
    assert_eq!(body["classification"]["bucket"], "nearlyAchieved");
}

#[tokio::test]
async fn evaluation_without_criteria_is_vacuously_qualified() {
    let payload = json!({
        "profile": { "id": "S-9", "gpax": 1.0, "studyYear": 1 },
        "criteria": null
    });

    let response = seeded_router()
        .oneshot(json_request(
            Method::POST,
            "/api/eligibility/evaluate",
            Some(payload),
        ))
        .await
        .expect("router responds");

    let body = read_json_body(response).await;
    assert_eq!(body["isQualified"], true);
    assert_eq!(body["perCriterion"], json!({}));
    assert_eq!(body["checks"], json!([]));
    assert_eq!(body["classification"]["bucket"], "achieved");
}

#[tokio::test]
async fn repository_outage_maps_to_server_error() {
    let router = portal_router(Arc::new(PrivilegePortalService::new(
        Arc::new(UnavailablePrivileges),
        Arc::new(EmptyStudents),
    )));

    let response = router
        .oneshot(json_request(Method::GET, "/api/privileges", None))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "repository unavailable: database offline");
}

#[tokio::test]
async fn create_after_id_space_exhaustion_is_conflict() {
    let last = PrivilegeDraft {
        title: "Last slot".to_string(),
        kind: "Faculty".to_string(),
        description: "Occupies the highest id".to_string(),
        reward: "Nothing".to_string(),
        criteria: None,
    }
    .into_privilege(PrivilegeId(u32::MAX), chrono::Utc::now());
    let router = portal_router(Arc::new(PrivilegePortalService::new(
        Arc::new(InMemoryPrivilegeRepository::with_privileges([last])),
        Arc::new(InMemoryStudentRepository::default()),
    )));
    let payload = json!({
        "title": "Overflow",
        "type": "Faculty",
        "description": "Should not replace the last slot",
        "reward": "None"
    });

    let response = router
        .clone()
        .oneshot(json_request(Method::POST, "/api/privileges", Some(payload)))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let kept = router
        .oneshot(json_request(
            Method::GET,
            &format!("/api/privileges/{}", u32::MAX),
            None,
        ))
        .await
        .expect("router responds");
    let body = read_json_body(kept).await;
    assert_eq!(body["title"], "Last slot");
}

#[tokio::test]
async fn staff_directory_lists_and_fetches() {
    let router = seeded_staff_router();

    let listed = router
        .clone()
        .oneshot(json_request(Method::GET, "/api/staff", None))
        .await
        .expect("router responds");
    assert_eq!(listed.status(), StatusCode::OK);
    let body = read_json_body(listed).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[0]["avatarUrl"], "https://placehold.co/100x100/9f7aea/ffffff?text=JD");

    let fetched = router
        .clone()
        .oneshot(json_request(Method::GET, "/api/staff/admin01", None))
        .await
        .expect("router responds");
    assert_eq!(fetched.status(), StatusCode::OK);

    let missing = router
        .oneshot(json_request(Method::GET, "/api/staff/nobody", None))
        .await
        .expect("router responds");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(missing).await;
    assert_eq!(body["error"], "staff member nobody not found");
}

#[tokio::test]
async fn staff_registration_statuses() {
    let router = seeded_staff_router();

    let incomplete = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/staff",
            Some(json!({ "id": "staff002", "name": "Kanda Rakrian" })),
        ))
        .await
        .expect("router responds");
    assert_eq!(incomplete.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(incomplete).await;
    assert_eq!(body["error"], "missing required fields: role, avatarUrl");

    let member = json!({
        "id": "staff002",
        "name": "Kanda Rakrian",
        "role": "Student affairs officer",
        "avatarUrl": "https://placehold.co/100x100/38a169/ffffff?text=KR"
    });
    let created = router
        .clone()
        .oneshot(json_request(Method::POST, "/api/staff", Some(member.clone())))
        .await
        .expect("router responds");
    assert_eq!(created.status(), StatusCode::CREATED);

    let duplicate = router
        .oneshot(json_request(Method::POST, "/api/staff", Some(member)))
        .await
        .expect("router responds");
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
}
