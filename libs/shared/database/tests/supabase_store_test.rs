use assert_matches::assert_matches;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::AppConfig;
use shared_database::{ClinicStore, StoreError, SupabaseStore};
use shared_models::{AppointmentStatus, NewAppointment, NewDoctor};

fn store_for(server: &MockServer) -> SupabaseStore {
    SupabaseStore::new(&AppConfig {
        supabase_url: server.uri(),
        supabase_service_key: "test-service-key".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
    })
}

fn patient_row(id: Uuid) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Alice Byrne",
        "email": "alice@example.com",
        "phone": "+353861234567",
        "medical_history": null,
        "created_at": Utc::now(),
        "updated_at": Utc::now(),
    })
}

fn appointment_row(id: Uuid, patient_id: Uuid, doctor_id: Uuid) -> serde_json::Value {
    json!({
        "id": id,
        "patient_id": patient_id,
        "doctor_id": doctor_id,
        "scheduled_at": Utc::now(),
        "notes": "First visit",
        "status": "scheduled",
        "created_at": Utc::now(),
    })
}

fn new_appointment(patient_id: Uuid, doctor_id: Uuid) -> NewAppointment {
    NewAppointment {
        patient_id,
        doctor_id,
        scheduled_at: Utc::now() + chrono::Duration::days(1),
        notes: Some("First visit".to_string()),
        status: AppointmentStatus::Scheduled,
    }
}

#[tokio::test]
async fn find_patient_sends_filter_and_auth_headers() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/patients"))
        .and(query_param("id", format!("eq.{}", id)))
        .and(header("apikey", "test-service-key"))
        .and(header("Authorization", "Bearer test-service-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([patient_row(id)])))
        .mount(&server)
        .await;

    let patient = store_for(&server).find_patient_by_id(id).await.unwrap();

    assert_eq!(patient.unwrap().email, "alice@example.com");
}

#[tokio::test]
async fn empty_result_set_means_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let patient = store_for(&server)
        .find_patient_by_id(Uuid::new_v4())
        .await
        .unwrap();

    assert!(patient.is_none());
}

#[tokio::test]
async fn booking_goes_through_the_rpc_function() {
    let server = MockServer::start().await;
    let (patient_id, doctor_id) = (Uuid::new_v4(), Uuid::new_v4());
    let appointment_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/book_appointment"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(appointment_row(appointment_id, patient_id, doctor_id)),
        )
        .mount(&server)
        .await;

    let appointment = store_for(&server)
        .insert_appointment(new_appointment(patient_id, doctor_id))
        .await
        .unwrap();

    assert_eq!(appointment.id, appointment_id);
    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
}

#[tokio::test]
async fn booking_conflict_maps_to_slot_taken() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/book_appointment"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "slot occupied"})),
        )
        .mount(&server)
        .await;

    let result = store_for(&server)
        .insert_appointment(new_appointment(Uuid::new_v4(), Uuid::new_v4()))
        .await;

    assert_matches!(result, Err(StoreError::SlotTaken));
}

#[tokio::test]
async fn duplicate_doctor_license_maps_to_duplicate_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "unique violation"})),
        )
        .mount(&server)
        .await;

    let result = store_for(&server)
        .insert_doctor(NewDoctor {
            name: "Dr. Niamh Kelly".to_string(),
            specialization: "Cardiology".to_string(),
            license_number: "MD-1001".to_string(),
            email: "n.kelly@clinic.example".to_string(),
        })
        .await;

    assert_matches!(result, Err(StoreError::DuplicateKey(field)) if field == "license_number");
}

#[tokio::test]
async fn server_errors_surface_as_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = store_for(&server).list_appointments().await;

    assert_matches!(result, Err(StoreError::Unavailable(_)));
}

#[tokio::test]
async fn non_json_payload_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let result = store_for(&server).list_appointments().await;

    assert_matches!(result, Err(StoreError::Malformed(_)));
}
