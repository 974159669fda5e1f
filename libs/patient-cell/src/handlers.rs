use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_database::AppState;
use shared_models::AppError;

use crate::models::{CreatePatientRequest, UpdatePatientRequest};
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let service = PatientService::new(state.store.clone());
    let patient = service.register(request).await?;
    Ok((StatusCode::CREATED, Json(json!({ "patient": patient }))))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(state.store.clone());
    let patient = service.get(id).await?;
    Ok(Json(json!({ "patient": patient })))
}

#[axum::debug_handler]
pub async fn list_patients(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(state.store.clone());
    let patients = service.list().await?;
    Ok(Json(json!({ "patients": patients })))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePatientRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(state.store.clone());
    let patient = service.update(id, request).await?;
    Ok(Json(json!({ "patient": patient })))
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let service = PatientService::new(state.store.clone());
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
