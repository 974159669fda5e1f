use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use shared_models::{
    Appointment, Doctor, NewAppointment, NewDoctor, NewPatient, Patient,
};

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The requested booking window is already occupied for the doctor.
    /// Raised by the store's atomic check-then-insert when a concurrent
    /// booking won the slot.
    #[error("booking slot already taken")]
    SlotTaken,

    #[error("duplicate value for unique field: {0}")]
    DuplicateKey(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Durable keyed storage for clinic entities.
///
/// Lookups return `Ok(None)` for absent ids; `Err` is reserved for storage
/// faults, which callers propagate unchanged. `insert_appointment` is the
/// one contract with a concurrency obligation: the overlap check and the
/// insert must be atomic with respect to other concurrent inserts for the
/// same doctor, so two racing bookings can never both land.
#[async_trait]
pub trait ClinicStore: Send + Sync {
    // Patients
    async fn insert_patient(&self, new: NewPatient) -> Result<Patient, StoreError>;
    async fn find_patient_by_id(&self, id: Uuid) -> Result<Option<Patient>, StoreError>;
    async fn find_patient_by_email(&self, email: &str) -> Result<Option<Patient>, StoreError>;
    async fn find_patient_by_phone(&self, phone: &str) -> Result<Option<Patient>, StoreError>;
    async fn list_patients(&self) -> Result<Vec<Patient>, StoreError>;
    async fn save_patient(&self, patient: &Patient) -> Result<Patient, StoreError>;
    async fn delete_patient_by_id(&self, id: Uuid) -> Result<bool, StoreError>;

    // Doctors
    async fn insert_doctor(&self, new: NewDoctor) -> Result<Doctor, StoreError>;
    async fn find_doctor_by_id(&self, id: Uuid) -> Result<Option<Doctor>, StoreError>;
    async fn find_doctor_by_license(&self, license: &str) -> Result<Option<Doctor>, StoreError>;
    async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError>;
    async fn list_doctors_by_specialization(
        &self,
        specialization: &str,
    ) -> Result<Vec<Doctor>, StoreError>;
    async fn save_doctor(&self, doctor: &Doctor) -> Result<Doctor, StoreError>;
    async fn delete_doctor_by_id(&self, id: Uuid) -> Result<bool, StoreError>;

    // Appointments
    /// Persist a new appointment, assigning its id and creation timestamp.
    /// Re-verifies the booking window under the store's own atomicity
    /// domain; fails with `SlotTaken` if a concurrent insert occupied it.
    async fn insert_appointment(&self, new: NewAppointment) -> Result<Appointment, StoreError>;
    async fn find_appointment_by_id(&self, id: Uuid) -> Result<Option<Appointment>, StoreError>;
    /// Appointments for one doctor whose scheduled time falls in
    /// [start, end] inclusive. May over-return; callers apply the exact
    /// overlap test.
    async fn find_appointments_for_doctor_in_range(
        &self,
        doctor_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, StoreError>;
    async fn find_appointments_by_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Appointment>, StoreError>;
    async fn find_appointments_by_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<Appointment>, StoreError>;
    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError>;
    /// Update an existing appointment in place. The stored creation
    /// timestamp is preserved regardless of the value on `appointment`.
    async fn save_appointment(&self, appointment: &Appointment) -> Result<Appointment, StoreError>;
    async fn delete_appointment_by_id(&self, id: Uuid) -> Result<bool, StoreError>;
}
