use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use shared_models::{
    windows_overlap, Appointment, Doctor, NewAppointment, NewDoctor, NewPatient, Patient,
};

use crate::store::{ClinicStore, StoreError};

/// In-process store backed by hash maps. Used by the test suites and by the
/// binary when no database is configured.
///
/// `insert_appointment` takes the write lock across the overlap re-check
/// and the insert, so concurrent bookings for the same doctor serialize and
/// at most one wins a contended slot.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    patients: HashMap<Uuid, Patient>,
    doctors: HashMap<Uuid, Doctor>,
    appointments: HashMap<Uuid, Appointment>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClinicStore for MemoryStore {
    async fn insert_patient(&self, new: NewPatient) -> Result<Patient, StoreError> {
        let now = Utc::now();
        let patient = Patient {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            medical_history: new.medical_history,
            created_at: now,
            updated_at: now,
        };
        let mut tables = self.inner.write().await;
        tables.patients.insert(patient.id, patient.clone());
        Ok(patient)
    }

    async fn find_patient_by_id(&self, id: Uuid) -> Result<Option<Patient>, StoreError> {
        Ok(self.inner.read().await.patients.get(&id).cloned())
    }

    async fn find_patient_by_email(&self, email: &str) -> Result<Option<Patient>, StoreError> {
        let tables = self.inner.read().await;
        Ok(tables.patients.values().find(|p| p.email == email).cloned())
    }

    async fn find_patient_by_phone(&self, phone: &str) -> Result<Option<Patient>, StoreError> {
        let tables = self.inner.read().await;
        Ok(tables.patients.values().find(|p| p.phone == phone).cloned())
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, StoreError> {
        let tables = self.inner.read().await;
        let mut patients: Vec<Patient> = tables.patients.values().cloned().collect();
        patients.sort_by_key(|p| p.created_at);
        Ok(patients)
    }

    async fn save_patient(&self, patient: &Patient) -> Result<Patient, StoreError> {
        let mut tables = self.inner.write().await;
        let existing = tables
            .patients
            .get(&patient.id)
            .ok_or_else(|| StoreError::Malformed(format!("unknown patient id {}", patient.id)))?;
        let mut updated = patient.clone();
        updated.created_at = existing.created_at;
        updated.updated_at = Utc::now();
        tables.patients.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete_patient_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.patients.remove(&id).is_some())
    }

    async fn insert_doctor(&self, new: NewDoctor) -> Result<Doctor, StoreError> {
        let mut tables = self.inner.write().await;
        if tables
            .doctors
            .values()
            .any(|d| d.license_number == new.license_number)
        {
            return Err(StoreError::DuplicateKey("license_number".to_string()));
        }
        let now = Utc::now();
        let doctor = Doctor {
            id: Uuid::new_v4(),
            name: new.name,
            specialization: new.specialization,
            license_number: new.license_number,
            email: new.email,
            created_at: now,
            updated_at: now,
        };
        tables.doctors.insert(doctor.id, doctor.clone());
        Ok(doctor)
    }

    async fn find_doctor_by_id(&self, id: Uuid) -> Result<Option<Doctor>, StoreError> {
        Ok(self.inner.read().await.doctors.get(&id).cloned())
    }

    async fn find_doctor_by_license(&self, license: &str) -> Result<Option<Doctor>, StoreError> {
        let tables = self.inner.read().await;
        Ok(tables
            .doctors
            .values()
            .find(|d| d.license_number == license)
            .cloned())
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError> {
        let tables = self.inner.read().await;
        let mut doctors: Vec<Doctor> = tables.doctors.values().cloned().collect();
        doctors.sort_by_key(|d| d.created_at);
        Ok(doctors)
    }

    async fn list_doctors_by_specialization(
        &self,
        specialization: &str,
    ) -> Result<Vec<Doctor>, StoreError> {
        let tables = self.inner.read().await;
        let mut doctors: Vec<Doctor> = tables
            .doctors
            .values()
            .filter(|d| d.specialization == specialization)
            .cloned()
            .collect();
        doctors.sort_by_key(|d| d.created_at);
        Ok(doctors)
    }

    async fn save_doctor(&self, doctor: &Doctor) -> Result<Doctor, StoreError> {
        let mut tables = self.inner.write().await;
        let existing = tables
            .doctors
            .get(&doctor.id)
            .ok_or_else(|| StoreError::Malformed(format!("unknown doctor id {}", doctor.id)))?;
        let mut updated = doctor.clone();
        updated.created_at = existing.created_at;
        updated.updated_at = Utc::now();
        tables.doctors.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete_doctor_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.doctors.remove(&id).is_some())
    }

    async fn insert_appointment(&self, new: NewAppointment) -> Result<Appointment, StoreError> {
        // Write lock held across check and insert: this is the atomicity
        // domain that closes the check-then-act race for in-process use.
        let mut tables = self.inner.write().await;
        let slot_taken = tables.appointments.values().any(|existing| {
            existing.doctor_id == new.doctor_id
                && existing.blocks_schedule()
                && windows_overlap(existing.scheduled_at, new.scheduled_at)
        });
        if slot_taken {
            return Err(StoreError::SlotTaken);
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: new.patient_id,
            doctor_id: new.doctor_id,
            scheduled_at: new.scheduled_at,
            notes: new.notes,
            status: new.status,
            created_at: Utc::now(),
        };
        tables.appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn find_appointment_by_id(&self, id: Uuid) -> Result<Option<Appointment>, StoreError> {
        Ok(self.inner.read().await.appointments.get(&id).cloned())
    }

    async fn find_appointments_for_doctor_in_range(
        &self,
        doctor_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, StoreError> {
        let tables = self.inner.read().await;
        let mut appointments: Vec<Appointment> = tables
            .appointments
            .values()
            .filter(|a| a.doctor_id == doctor_id && a.scheduled_at >= start && a.scheduled_at <= end)
            .cloned()
            .collect();
        appointments.sort_by_key(|a| a.scheduled_at);
        Ok(appointments)
    }

    async fn find_appointments_by_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Appointment>, StoreError> {
        let tables = self.inner.read().await;
        let mut appointments: Vec<Appointment> = tables
            .appointments
            .values()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect();
        appointments.sort_by_key(|a| a.scheduled_at);
        Ok(appointments)
    }

    async fn find_appointments_by_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<Appointment>, StoreError> {
        let tables = self.inner.read().await;
        let mut appointments: Vec<Appointment> = tables
            .appointments
            .values()
            .filter(|a| a.doctor_id == doctor_id)
            .cloned()
            .collect();
        appointments.sort_by_key(|a| a.scheduled_at);
        Ok(appointments)
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError> {
        let tables = self.inner.read().await;
        let mut appointments: Vec<Appointment> = tables.appointments.values().cloned().collect();
        appointments.sort_by_key(|a| a.scheduled_at);
        Ok(appointments)
    }

    async fn save_appointment(&self, appointment: &Appointment) -> Result<Appointment, StoreError> {
        let mut tables = self.inner.write().await;
        let existing = tables.appointments.get(&appointment.id).ok_or_else(|| {
            StoreError::Malformed(format!("unknown appointment id {}", appointment.id))
        })?;
        let mut updated = appointment.clone();
        // Creation timestamp is immutable once assigned.
        updated.created_at = existing.created_at;
        tables.appointments.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete_appointment_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.appointments.remove(&id).is_some())
    }
}
