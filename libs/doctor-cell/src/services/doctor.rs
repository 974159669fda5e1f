use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use shared_database::{ClinicStore, StoreError};
use shared_models::{Doctor, NewDoctor};
use shared_utils::validation;

use crate::models::{CreateDoctorRequest, DoctorError, UpdateDoctorRequest};

pub struct DoctorService {
    store: Arc<dyn ClinicStore>,
}

impl DoctorService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn register(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        debug!("Registering doctor with license {}", request.license_number);

        validation::validate_name(&request.name).map_err(DoctorError::Validation)?;
        validation::validate_email(&request.email).map_err(DoctorError::Validation)?;
        validation::validate_required("Specialization", &request.specialization)
            .map_err(DoctorError::Validation)?;
        validation::validate_required("License number", &request.license_number)
            .map_err(DoctorError::Validation)?;

        if self
            .store
            .find_doctor_by_license(&request.license_number)
            .await?
            .is_some()
        {
            return Err(DoctorError::LicenseAlreadyExists {
                license: request.license_number,
            });
        }

        let license = request.license_number.clone();
        let doctor = self
            .store
            .insert_doctor(NewDoctor {
                name: request.name,
                specialization: request.specialization,
                license_number: request.license_number,
                email: request.email,
            })
            .await
            .map_err(|e| match e {
                // Unique constraint fired under a concurrent registration
                // race; same caller-visible outcome as the explicit check.
                StoreError::DuplicateKey(_) => DoctorError::LicenseAlreadyExists { license },
                other => other.into(),
            })?;

        info!("Doctor {} registered", doctor.id);
        Ok(doctor)
    }

    pub async fn get(&self, id: Uuid) -> Result<Doctor, DoctorError> {
        debug!("Fetching doctor: {}", id);
        self.store
            .find_doctor_by_id(id)
            .await?
            .ok_or(DoctorError::NotFound)
    }

    pub async fn list(&self, specialization: Option<&str>) -> Result<Vec<Doctor>, DoctorError> {
        match specialization {
            Some(specialization) => Ok(self
                .store
                .list_doctors_by_specialization(specialization)
                .await?),
            None => Ok(self.store.list_doctors().await?),
        }
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateDoctorRequest,
    ) -> Result<Doctor, DoctorError> {
        debug!("Updating doctor: {}", id);

        let mut doctor = self.get(id).await?;

        if let Some(name) = request.name {
            validation::validate_name(&name).map_err(DoctorError::Validation)?;
            doctor.name = name;
        }
        if let Some(specialization) = request.specialization {
            validation::validate_required("Specialization", &specialization)
                .map_err(DoctorError::Validation)?;
            doctor.specialization = specialization;
        }
        if let Some(email) = request.email {
            validation::validate_email(&email).map_err(DoctorError::Validation)?;
            doctor.email = email;
        }

        let updated = self.store.save_doctor(&doctor).await?;
        info!("Doctor {} updated", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DoctorError> {
        debug!("Deleting doctor: {}", id);
        if !self.store.delete_doctor_by_id(id).await? {
            return Err(DoctorError::NotFound);
        }
        info!("Doctor {} deleted", id);
        Ok(())
    }
}
