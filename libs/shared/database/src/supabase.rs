use chrono::{DateTime, Utc};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, error};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::{
    Appointment, Doctor, NewAppointment, NewDoctor, NewPatient, Patient, SLOT_MINUTES,
};

use crate::store::{ClinicStore, StoreError};

/// PostgREST-backed store. Row shapes mirror the entity structs, so
/// responses deserialize directly.
///
/// The booking insert goes through the `book_appointment` database function,
/// which runs the overlap check and the insert in one transaction; a lost
/// race comes back as HTTP 409 and is surfaced as `SlotTaken`.
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.clone(),
            service_key: config.supabase_service_key.clone(),
        }
    }

    fn headers(&self, return_representation: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(key) = HeaderValue::from_str(&self.service_key) {
            headers.insert("apikey", key);
        }
        if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", self.service_key)) {
            headers.insert(AUTHORIZATION, bearer);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if return_representation {
            headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        }
        headers
    }

    async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        return_representation: bool,
    ) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Store request: {} {}", method, url);

        let mut req = self
            .client
            .request(method, &url)
            .headers(self.headers(return_representation));
        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Store error ({}): {}", status, error_text);
            return Err(match status {
                StatusCode::CONFLICT => StoreError::DuplicateKey(error_text),
                _ => StoreError::Unavailable(format!("{}: {}", status, error_text)),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Malformed(e.to_string()))
    }

    async fn fetch_rows<T>(&self, path: &str) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        self.request(Method::GET, path, None, false).await
    }

    async fn fetch_first<T>(&self, path: &str) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let mut rows: Vec<T> = self.fetch_rows(path).await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }

    async fn insert_row<T>(&self, table: &str, body: Value) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let path = format!("/rest/v1/{}", table);
        let mut rows: Vec<T> = self.request(Method::POST, &path, Some(body), true).await?;
        if rows.is_empty() {
            return Err(StoreError::Malformed(format!(
                "insert into {} returned no representation",
                table
            )));
        }
        Ok(rows.remove(0))
    }

    async fn patch_row<T>(&self, path: &str, body: Value) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let mut rows: Vec<T> = self.request(Method::PATCH, path, Some(body), true).await?;
        if rows.is_empty() {
            return Err(StoreError::Malformed(
                "update matched no rows".to_string(),
            ));
        }
        Ok(rows.remove(0))
    }

    async fn delete_rows(&self, path: &str) -> Result<bool, StoreError> {
        let rows: Vec<Value> = self.request(Method::DELETE, path, None, true).await?;
        Ok(!rows.is_empty())
    }

    fn encode_ts(ts: DateTime<Utc>) -> String {
        urlencoding::encode(&ts.to_rfc3339()).into_owned()
    }
}

#[async_trait]
impl ClinicStore for SupabaseStore {
    async fn insert_patient(&self, new: NewPatient) -> Result<Patient, StoreError> {
        self.insert_row(
            "patients",
            json!({
                "name": new.name,
                "email": new.email,
                "phone": new.phone,
                "medical_history": new.medical_history,
            }),
        )
        .await
    }

    async fn find_patient_by_id(&self, id: Uuid) -> Result<Option<Patient>, StoreError> {
        self.fetch_first(&format!("/rest/v1/patients?id=eq.{}", id)).await
    }

    async fn find_patient_by_email(&self, email: &str) -> Result<Option<Patient>, StoreError> {
        let encoded = urlencoding::encode(email);
        self.fetch_first(&format!("/rest/v1/patients?email=eq.{}", encoded))
            .await
    }

    async fn find_patient_by_phone(&self, phone: &str) -> Result<Option<Patient>, StoreError> {
        let encoded = urlencoding::encode(phone);
        self.fetch_first(&format!("/rest/v1/patients?phone=eq.{}", encoded))
            .await
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, StoreError> {
        self.fetch_rows("/rest/v1/patients?order=created_at.asc").await
    }

    async fn save_patient(&self, patient: &Patient) -> Result<Patient, StoreError> {
        self.patch_row(
            &format!("/rest/v1/patients?id=eq.{}", patient.id),
            json!({
                "name": patient.name,
                "email": patient.email,
                "phone": patient.phone,
                "medical_history": patient.medical_history,
                "updated_at": Utc::now().to_rfc3339(),
            }),
        )
        .await
    }

    async fn delete_patient_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        self.delete_rows(&format!("/rest/v1/patients?id=eq.{}", id)).await
    }

    async fn insert_doctor(&self, new: NewDoctor) -> Result<Doctor, StoreError> {
        self.insert_row(
            "doctors",
            json!({
                "name": new.name,
                "specialization": new.specialization,
                "license_number": new.license_number,
                "email": new.email,
            }),
        )
        .await
        .map_err(|e| match e {
            StoreError::DuplicateKey(_) => StoreError::DuplicateKey("license_number".to_string()),
            other => other,
        })
    }

    async fn find_doctor_by_id(&self, id: Uuid) -> Result<Option<Doctor>, StoreError> {
        self.fetch_first(&format!("/rest/v1/doctors?id=eq.{}", id)).await
    }

    async fn find_doctor_by_license(&self, license: &str) -> Result<Option<Doctor>, StoreError> {
        let encoded = urlencoding::encode(license);
        self.fetch_first(&format!("/rest/v1/doctors?license_number=eq.{}", encoded))
            .await
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError> {
        self.fetch_rows("/rest/v1/doctors?order=created_at.asc").await
    }

    async fn list_doctors_by_specialization(
        &self,
        specialization: &str,
    ) -> Result<Vec<Doctor>, StoreError> {
        let encoded = urlencoding::encode(specialization);
        self.fetch_rows(&format!(
            "/rest/v1/doctors?specialization=eq.{}&order=created_at.asc",
            encoded
        ))
        .await
    }

    async fn save_doctor(&self, doctor: &Doctor) -> Result<Doctor, StoreError> {
        self.patch_row(
            &format!("/rest/v1/doctors?id=eq.{}", doctor.id),
            json!({
                "name": doctor.name,
                "specialization": doctor.specialization,
                "email": doctor.email,
                "updated_at": Utc::now().to_rfc3339(),
            }),
        )
        .await
    }

    async fn delete_doctor_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        self.delete_rows(&format!("/rest/v1/doctors?id=eq.{}", id)).await
    }

    async fn insert_appointment(&self, new: NewAppointment) -> Result<Appointment, StoreError> {
        // Check-then-insert runs inside the database function, one
        // transaction, so concurrent bookings for the same doctor cannot
        // both pass the overlap check.
        self.request(
            Method::POST,
            "/rest/v1/rpc/book_appointment",
            Some(json!({
                "p_patient_id": new.patient_id,
                "p_doctor_id": new.doctor_id,
                "p_scheduled_at": new.scheduled_at.to_rfc3339(),
                "p_notes": new.notes,
                "p_status": new.status.to_string(),
                "p_slot_minutes": SLOT_MINUTES,
            })),
            false,
        )
        .await
        .map_err(|e| match e {
            StoreError::DuplicateKey(_) => StoreError::SlotTaken,
            other => other,
        })
    }

    async fn find_appointment_by_id(&self, id: Uuid) -> Result<Option<Appointment>, StoreError> {
        self.fetch_first(&format!("/rest/v1/appointments?id=eq.{}", id)).await
    }

    async fn find_appointments_for_doctor_in_range(
        &self,
        doctor_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, StoreError> {
        self.fetch_rows(&format!(
            "/rest/v1/appointments?doctor_id=eq.{}&scheduled_at=gte.{}&scheduled_at=lte.{}&order=scheduled_at.asc",
            doctor_id,
            Self::encode_ts(start),
            Self::encode_ts(end),
        ))
        .await
    }

    async fn find_appointments_by_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Appointment>, StoreError> {
        self.fetch_rows(&format!(
            "/rest/v1/appointments?patient_id=eq.{}&order=scheduled_at.asc",
            patient_id
        ))
        .await
    }

    async fn find_appointments_by_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<Appointment>, StoreError> {
        self.fetch_rows(&format!(
            "/rest/v1/appointments?doctor_id=eq.{}&order=scheduled_at.asc",
            doctor_id
        ))
        .await
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError> {
        self.fetch_rows("/rest/v1/appointments?order=scheduled_at.asc").await
    }

    async fn save_appointment(&self, appointment: &Appointment) -> Result<Appointment, StoreError> {
        // created_at deliberately absent from the body: the creation
        // timestamp is immutable once assigned.
        self.patch_row(
            &format!("/rest/v1/appointments?id=eq.{}", appointment.id),
            json!({
                "scheduled_at": appointment.scheduled_at.to_rfc3339(),
                "notes": appointment.notes,
                "status": appointment.status.to_string(),
            }),
        )
        .await
    }

    async fn delete_appointment_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        self.delete_rows(&format!("/rest/v1/appointments?id=eq.{}", id)).await
    }
}
