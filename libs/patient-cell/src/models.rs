use serde::{Deserialize, Serialize};

use shared_database::StoreError;
use shared_models::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub medical_history: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePatientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub medical_history: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found")]
    NotFound,

    #[error("Patient with email {email} already exists")]
    EmailAlreadyExists { email: String },

    #[error("Patient with phone {phone} already exists")]
    PhoneAlreadyExists { phone: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<StoreError> for PatientError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateKey(field) => {
                PatientError::Validation(format!("duplicate value for {}", field))
            }
            other => PatientError::Database(other.to_string()),
        }
    }
}

impl From<PatientError> for AppError {
    fn from(e: PatientError) -> Self {
        match e {
            PatientError::NotFound => AppError::NotFound("Patient not found".to_string()),
            PatientError::EmailAlreadyExists { .. } | PatientError::PhoneAlreadyExists { .. } => {
                AppError::Conflict(e.to_string())
            }
            PatientError::Validation(msg) => AppError::ValidationError(msg),
            PatientError::Database(msg) => AppError::Database(msg),
        }
    }
}
