use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use shared_database::ClinicStore;
use shared_models::{NewPatient, Patient};
use shared_utils::validation;

use crate::models::{CreatePatientRequest, PatientError, UpdatePatientRequest};

pub struct PatientService {
    store: Arc<dyn ClinicStore>,
}

impl PatientService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn register(&self, request: CreatePatientRequest) -> Result<Patient, PatientError> {
        debug!("Registering patient: {}", request.email);

        validate_patient_fields(
            &request.name,
            &request.email,
            &request.phone,
            request.medical_history.as_deref(),
        )?;

        if self.store.find_patient_by_email(&request.email).await?.is_some() {
            return Err(PatientError::EmailAlreadyExists { email: request.email });
        }
        if self.store.find_patient_by_phone(&request.phone).await?.is_some() {
            return Err(PatientError::PhoneAlreadyExists { phone: request.phone });
        }

        let patient = self
            .store
            .insert_patient(NewPatient {
                name: request.name,
                email: request.email,
                phone: request.phone,
                medical_history: request.medical_history,
            })
            .await?;

        info!("Patient {} registered", patient.id);
        Ok(patient)
    }

    pub async fn get(&self, id: Uuid) -> Result<Patient, PatientError> {
        debug!("Fetching patient: {}", id);
        self.store
            .find_patient_by_id(id)
            .await?
            .ok_or(PatientError::NotFound)
    }

    pub async fn list(&self) -> Result<Vec<Patient>, PatientError> {
        Ok(self.store.list_patients().await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdatePatientRequest,
    ) -> Result<Patient, PatientError> {
        debug!("Updating patient: {}", id);

        let mut patient = self.get(id).await?;

        if let Some(name) = request.name {
            validation::validate_name(&name).map_err(PatientError::Validation)?;
            patient.name = name;
        }
        if let Some(email) = request.email {
            validation::validate_email(&email).map_err(PatientError::Validation)?;
            patient.email = email;
        }
        if let Some(phone) = request.phone {
            validation::validate_phone(&phone).map_err(PatientError::Validation)?;
            patient.phone = phone;
        }
        if let Some(history) = request.medical_history {
            validation::validate_bounded_text("Medical history", Some(&history))
                .map_err(PatientError::Validation)?;
            patient.medical_history = Some(history);
        }

        let updated = self.store.save_patient(&patient).await?;
        info!("Patient {} updated", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), PatientError> {
        debug!("Deleting patient: {}", id);
        if !self.store.delete_patient_by_id(id).await? {
            return Err(PatientError::NotFound);
        }
        info!("Patient {} deleted", id);
        Ok(())
    }
}

fn validate_patient_fields(
    name: &str,
    email: &str,
    phone: &str,
    medical_history: Option<&str>,
) -> Result<(), PatientError> {
    validation::validate_required("Name", name).map_err(PatientError::Validation)?;
    validation::validate_name(name).map_err(PatientError::Validation)?;
    validation::validate_email(email).map_err(PatientError::Validation)?;
    validation::validate_phone(phone).map_err(PatientError::Validation)?;
    validation::validate_bounded_text("Medical history", medical_history)
        .map_err(PatientError::Validation)?;
    Ok(())
}
