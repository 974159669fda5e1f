use axum::{
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;

use crate::handlers;

pub fn appointment_routes(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/", get(handlers::list_appointments))
        .route("/{id}", get(handlers::get_appointment))
        .route("/patient/{patient_id}", get(handlers::list_appointments_by_patient))
        .route("/doctor/{doctor_id}", get(handlers::list_appointments_by_doctor))
        .route("/{id}/status", put(handlers::set_appointment_status))
        .route("/{id}/cancel", put(handlers::cancel_appointment))
        .route("/{id}", delete(handlers::delete_appointment))
        .with_state(state)
}
