use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use shared_database::ClinicStore;
use shared_models::{slot_end, Appointment, AppointmentStatus, NewAppointment, SLOT_MINUTES};
use shared_utils::validation;

use crate::models::{AppointmentError, BookAppointmentRequest};

/// The booking engine. Stateless between calls; every operation is a
/// sequence of store reads followed by at most one store write.
pub struct BookingService {
    store: Arc<dyn ClinicStore>,
}

impl BookingService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    /// Book a 30-minute consultation.
    ///
    /// Order matters: time and notes validation happen before any store
    /// read of appointments, referential checks before the overlap check,
    /// and the insert is the single mutating step. On failure nothing has
    /// been written.
    pub async fn book(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!(
            "Booking appointment for patient {} with doctor {} at {}",
            request.patient_id, request.doctor_id, request.scheduled_at
        );

        if request.scheduled_at <= Utc::now() {
            return Err(AppointmentError::InvalidTime(
                "Appointment date must be in the future".to_string(),
            ));
        }
        validation::validate_bounded_text("Notes", request.notes.as_deref())
            .map_err(AppointmentError::Validation)?;

        if self
            .store
            .find_patient_by_id(request.patient_id)
            .await?
            .is_none()
        {
            return Err(AppointmentError::PatientNotFound);
        }
        if self
            .store
            .find_doctor_by_id(request.doctor_id)
            .await?
            .is_none()
        {
            return Err(AppointmentError::DoctorNotFound);
        }

        // Fetch one slot length either side of the requested window; the
        // range query over-returns and the exact half-open overlap test
        // runs here.
        let fetch_start = request.scheduled_at - Duration::minutes(SLOT_MINUTES);
        let fetch_end = slot_end(request.scheduled_at);
        let existing = self
            .store
            .find_appointments_for_doctor_in_range(request.doctor_id, fetch_start, fetch_end)
            .await?;

        let conflict = existing
            .iter()
            .any(|a| a.blocks_schedule() && a.overlaps_window(request.scheduled_at));
        if conflict {
            warn!(
                "Booking conflict for doctor {} at {}",
                request.doctor_id, request.scheduled_at
            );
            return Err(AppointmentError::DoctorUnavailable);
        }

        // The store re-verifies the slot atomically; a lost race against a
        // concurrent booking surfaces as SlotTaken and maps back to
        // DoctorUnavailable.
        let appointment = self
            .store
            .insert_appointment(NewAppointment {
                patient_id: request.patient_id,
                doctor_id: request.doctor_id,
                scheduled_at: request.scheduled_at,
                notes: request.notes,
                status: AppointmentStatus::Scheduled,
            })
            .await?;

        info!(
            "Appointment {} booked for patient {} with doctor {}",
            appointment.id, appointment.patient_id, appointment.doctor_id
        );
        Ok(appointment)
    }
}
