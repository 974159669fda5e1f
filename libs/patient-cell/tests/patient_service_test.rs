use assert_matches::assert_matches;

use patient_cell::models::{CreatePatientRequest, PatientError, UpdatePatientRequest};
use patient_cell::services::PatientService;
use shared_utils::test_utils::{random_id, seed_clinic};

fn create_request(email: &str, phone: &str) -> CreatePatientRequest {
    CreatePatientRequest {
        name: "Brian Murphy".to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        medical_history: None,
    }
}

#[tokio::test]
async fn register_and_fetch_patient() {
    let clinic = seed_clinic().await;
    let service = PatientService::new(clinic.store.clone());

    let patient = service
        .register(create_request("brian@example.com", "+353879999999"))
        .await
        .unwrap();
    let fetched = service.get(patient.id).await.unwrap();

    assert_eq!(fetched.email, "brian@example.com");
    assert_eq!(fetched.name, "Brian Murphy");
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let clinic = seed_clinic().await;
    let service = PatientService::new(clinic.store.clone());

    // seed_clinic registers alice@example.com already
    let result = service
        .register(create_request("alice@example.com", "+353879999999"))
        .await;

    assert_matches!(result, Err(PatientError::EmailAlreadyExists { .. }));
}

#[tokio::test]
async fn duplicate_phone_is_a_conflict() {
    let clinic = seed_clinic().await;
    let service = PatientService::new(clinic.store.clone());

    let result = service
        .register(create_request("brian@example.com", &clinic.patient.phone))
        .await;

    assert_matches!(result, Err(PatientError::PhoneAlreadyExists { .. }));
}

#[tokio::test]
async fn malformed_fields_are_rejected() {
    let clinic = seed_clinic().await;
    let service = PatientService::new(clinic.store.clone());

    let bad_email = service
        .register(create_request("not-an-email", "+353879999999"))
        .await;
    assert_matches!(bad_email, Err(PatientError::Validation(_)));

    let bad_phone = service
        .register(create_request("brian@example.com", "12"))
        .await;
    assert_matches!(bad_phone, Err(PatientError::Validation(_)));

    let mut long_history = create_request("brian@example.com", "+353879999999");
    long_history.medical_history = Some("x".repeat(501));
    assert_matches!(
        service.register(long_history).await,
        Err(PatientError::Validation(_))
    );
}

#[tokio::test]
async fn update_applies_only_provided_fields() {
    let clinic = seed_clinic().await;
    let service = PatientService::new(clinic.store.clone());

    let updated = service
        .update(
            clinic.patient.id,
            UpdatePatientRequest {
                name: Some("Alice O'Brien".to_string()),
                email: None,
                phone: None,
                medical_history: Some("Penicillin allergy".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Alice O'Brien");
    assert_eq!(updated.email, clinic.patient.email);
    assert_eq!(updated.medical_history.as_deref(), Some("Penicillin allergy"));
    assert_eq!(updated.created_at, clinic.patient.created_at);
}

#[tokio::test]
async fn missing_patient_is_not_found() {
    let clinic = seed_clinic().await;
    let service = PatientService::new(clinic.store.clone());

    assert_matches!(service.get(random_id()).await, Err(PatientError::NotFound));
    assert_matches!(
        service.delete(random_id()).await,
        Err(PatientError::NotFound)
    );
}

#[tokio::test]
async fn delete_is_effective_exactly_once() {
    let clinic = seed_clinic().await;
    let service = PatientService::new(clinic.store.clone());

    service.delete(clinic.patient.id).await.unwrap();
    assert_matches!(
        service.delete(clinic.patient.id).await,
        Err(PatientError::NotFound)
    );
}
