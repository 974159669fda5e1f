use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_database::AppState;
use shared_models::AppError;

use crate::models::{BookAppointmentRequest, SetStatusQuery};
use crate::services::{AppointmentQueryService, BookingService, LifecycleService};

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<AppState>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let service = BookingService::new(state.store.clone());
    let appointment = service.book(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "appointment": appointment })),
    ))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentQueryService::new(state.store.clone());
    let appointment = service.get_by_id(id).await?;
    Ok(Json(json!({ "appointment": appointment })))
}

#[axum::debug_handler]
pub async fn list_appointments(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let service = AppointmentQueryService::new(state.store.clone());
    let appointments = service.get_all().await?;
    Ok(Json(json!({ "appointments": appointments })))
}

#[axum::debug_handler]
pub async fn list_appointments_by_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentQueryService::new(state.store.clone());
    let appointments = service.get_by_patient(patient_id).await?;
    Ok(Json(json!({ "appointments": appointments })))
}

#[axum::debug_handler]
pub async fn list_appointments_by_doctor(
    State(state): State<AppState>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentQueryService::new(state.store.clone());
    let appointments = service.get_by_doctor(doctor_id).await?;
    Ok(Json(json!({ "appointments": appointments })))
}

#[axum::debug_handler]
pub async fn set_appointment_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SetStatusQuery>,
) -> Result<Json<Value>, AppError> {
    let lifecycle = LifecycleService::new(state.store.clone());
    let updated = lifecycle.set_status(id, query.status).await?;
    let views = AppointmentQueryService::new(state.store.clone());
    let appointment = views.project(&updated).await?;
    Ok(Json(json!({ "appointment": appointment })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let service = LifecycleService::new(state.store.clone());
    service.cancel(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let service = LifecycleService::new(state.store.clone());
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
