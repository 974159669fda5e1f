use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use shared_database::ClinicStore;
use shared_models::Appointment;

use crate::models::{AppointmentError, AppointmentView};

/// Read-only projections of stored appointments. Pure pass-through to the
/// store plus name resolution; no business logic.
pub struct AppointmentQueryService {
    store: Arc<dyn ClinicStore>,
}

impl AppointmentQueryService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    /// Resolve the referenced patient and doctor names for a record. The
    /// booking engine guarantees both exist at creation time; a dangling
    /// reference here means the store was mutated out-of-band.
    pub async fn project(
        &self,
        appointment: &Appointment,
    ) -> Result<AppointmentView, AppointmentError> {
        let patient = self
            .store
            .find_patient_by_id(appointment.patient_id)
            .await?
            .ok_or_else(|| {
                AppointmentError::Database(format!(
                    "appointment {} references missing patient {}",
                    appointment.id, appointment.patient_id
                ))
            })?;
        let doctor = self
            .store
            .find_doctor_by_id(appointment.doctor_id)
            .await?
            .ok_or_else(|| {
                AppointmentError::Database(format!(
                    "appointment {} references missing doctor {}",
                    appointment.id, appointment.doctor_id
                ))
            })?;

        Ok(AppointmentView {
            id: appointment.id,
            patient_name: patient.name,
            doctor_name: doctor.name,
            scheduled_at: appointment.scheduled_at,
            notes: appointment.notes.clone(),
            status: appointment.status,
            created_at: appointment.created_at,
        })
    }

    async fn project_all(
        &self,
        appointments: Vec<Appointment>,
    ) -> Result<Vec<AppointmentView>, AppointmentError> {
        let mut views = Vec::with_capacity(appointments.len());
        for appointment in &appointments {
            views.push(self.project(appointment).await?);
        }
        Ok(views)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<AppointmentView, AppointmentError> {
        debug!("Fetching appointment view: {}", id);
        let appointment = self
            .store
            .find_appointment_by_id(id)
            .await?
            .ok_or(AppointmentError::NotFound)?;
        self.project(&appointment).await
    }

    pub async fn get_by_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<AppointmentView>, AppointmentError> {
        let appointments = self.store.find_appointments_by_patient(patient_id).await?;
        self.project_all(appointments).await
    }

    pub async fn get_by_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<AppointmentView>, AppointmentError> {
        let appointments = self.store.find_appointments_by_doctor(doctor_id).await?;
        self.project_all(appointments).await
    }

    pub async fn get_all(&self) -> Result<Vec<AppointmentView>, AppointmentError> {
        let appointments = self.store.list_appointments().await?;
        self.project_all(appointments).await
    }
}
