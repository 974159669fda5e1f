use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::json;
use tower::ServiceExt;

use appointment_cell::models::BookAppointmentRequest;
use appointment_cell::router::appointment_routes;
use appointment_cell::services::BookingService;
use shared_database::AppState;
use shared_models::Appointment;
use shared_utils::test_utils::{future_slot, random_id, seed_clinic, TestClinic};

fn test_app(clinic: &TestClinic) -> Router {
    appointment_routes(AppState {
        store: clinic.store.clone(),
    })
}

async fn book_directly(clinic: &TestClinic) -> Appointment {
    BookingService::new(clinic.store.clone())
        .book(BookAppointmentRequest {
            patient_id: clinic.patient.id,
            doctor_id: clinic.doctor.id,
            scheduled_at: future_slot(7),
            notes: None,
        })
        .await
        .unwrap()
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn put(uri: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn booking_returns_created() {
    let clinic = seed_clinic().await;
    let app = test_app(&clinic);

    let response = app
        .oneshot(json_post(
            "/",
            json!({
                "patient_id": clinic.patient.id,
                "doctor_id": clinic.doctor.id,
                "scheduled_at": future_slot(7),
                "notes": "First visit",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn double_booking_returns_conflict() {
    let clinic = seed_clinic().await;
    let app = test_app(&clinic);
    let existing = book_directly(&clinic).await;

    let response = app
        .oneshot(json_post(
            "/",
            json!({
                "patient_id": clinic.patient.id,
                "doctor_id": clinic.doctor.id,
                "scheduled_at": existing.scheduled_at,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn booking_in_the_past_is_a_bad_request() {
    let clinic = seed_clinic().await;
    let app = test_app(&clinic);

    let response = app
        .oneshot(json_post(
            "/",
            json!({
                "patient_id": clinic.patient.id,
                "doctor_id": clinic.doctor.id,
                "scheduled_at": Utc::now() - Duration::hours(2),
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn booking_for_an_unknown_patient_is_not_found() {
    let clinic = seed_clinic().await;
    let app = test_app(&clinic);

    let response = app
        .oneshot(json_post(
            "/",
            json!({
                "patient_id": random_id(),
                "doctor_id": clinic.doctor.id,
                "scheduled_at": future_slot(7),
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn appointment_views_are_reachable() {
    let clinic = seed_clinic().await;
    let appointment = book_directly(&clinic).await;

    let by_id = test_app(&clinic)
        .oneshot(get(&format!("/{}", appointment.id)))
        .await
        .unwrap();
    assert_eq!(by_id.status(), StatusCode::OK);

    let all = test_app(&clinic).oneshot(get("/")).await.unwrap();
    assert_eq!(all.status(), StatusCode::OK);

    let by_patient = test_app(&clinic)
        .oneshot(get(&format!("/patient/{}", clinic.patient.id)))
        .await
        .unwrap();
    assert_eq!(by_patient.status(), StatusCode::OK);

    let by_doctor = test_app(&clinic)
        .oneshot(get(&format!("/doctor/{}", clinic.doctor.id)))
        .await
        .unwrap();
    assert_eq!(by_doctor.status(), StatusCode::OK);
}

#[tokio::test]
async fn fetching_a_missing_appointment_is_not_found() {
    let clinic = seed_clinic().await;
    let app = test_app(&clinic);

    let response = app.oneshot(get(&format!("/{}", random_id()))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_update_via_query_parameter() {
    let clinic = seed_clinic().await;
    let appointment = book_directly(&clinic).await;

    let response = test_app(&clinic)
        .oneshot(put(&format!("/{}/status?status=confirmed", appointment.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_status_value_is_rejected() {
    let clinic = seed_clinic().await;
    let appointment = book_directly(&clinic).await;

    let response = test_app(&clinic)
        .oneshot(put(&format!("/{}/status?status=rescheduled", appointment.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cancel_and_delete_return_no_content() {
    let clinic = seed_clinic().await;
    let appointment = book_directly(&clinic).await;

    let cancelled = test_app(&clinic)
        .oneshot(put(&format!("/{}/cancel", appointment.id)))
        .await
        .unwrap();
    assert_eq!(cancelled.status(), StatusCode::NO_CONTENT);

    let deleted = test_app(&clinic)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", appointment.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = test_app(&clinic)
        .oneshot(get(&format!("/{}", appointment.id)))
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}
