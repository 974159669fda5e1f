use axum::{
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;

use crate::handlers;

pub fn doctor_routes(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::create_doctor))
        .route("/", get(handlers::list_doctors))
        .route("/{id}", get(handlers::get_doctor))
        .route("/{id}", put(handlers::update_doctor))
        .route("/{id}", delete(handlers::delete_doctor))
        .with_state(state)
}
