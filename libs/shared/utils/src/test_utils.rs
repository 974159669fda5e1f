//! Shared fixtures for cell test suites: a seeded in-memory store with one
//! registered patient and doctor, plus request builders.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use shared_database::{ClinicStore, MemoryStore};
use shared_models::{Doctor, NewDoctor, NewPatient, Patient};

pub struct TestClinic {
    pub store: Arc<MemoryStore>,
    pub patient: Patient,
    pub doctor: Doctor,
}

pub async fn seed_clinic() -> TestClinic {
    let store = Arc::new(MemoryStore::new());
    let patient = insert_patient_fixture(&store, "alice@example.com", "+353861234567").await;
    let doctor = insert_doctor_fixture(&store, "MD-1001").await;
    TestClinic { store, patient, doctor }
}

pub async fn insert_patient_fixture(store: &MemoryStore, email: &str, phone: &str) -> Patient {
    store
        .insert_patient(new_patient(email, phone))
        .await
        .expect("insert patient fixture")
}

pub async fn insert_doctor_fixture(store: &MemoryStore, license: &str) -> Doctor {
    store
        .insert_doctor(new_doctor(license))
        .await
        .expect("insert doctor fixture")
}

/// A scheduled time comfortably in the future for booking tests.
pub fn future_slot(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

pub fn new_patient(email: &str, phone: &str) -> NewPatient {
    NewPatient {
        name: "Alice Byrne".to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        medical_history: Some("No known allergies".to_string()),
    }
}

pub fn new_doctor(license: &str) -> NewDoctor {
    NewDoctor {
        name: "Dr. Niamh Kelly".to_string(),
        specialization: "Cardiology".to_string(),
        license_number: license.to_string(),
        email: "n.kelly@clinic.example".to_string(),
    }
}

pub fn random_id() -> Uuid {
    Uuid::new_v4()
}
