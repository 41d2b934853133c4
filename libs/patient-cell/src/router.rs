use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use shared_database::ClinicStore;

use crate::handlers::*;

pub fn create_patient_router(store: Arc<ClinicStore>) -> Router {
    Router::new()
        .route("/", post(create_patient))
        .route("/search", get(search_patients))
        .route("/{id}", get(get_patient))
        .route("/{id}", put(update_patient))
        .route("/{id}", delete(delete_patient))
        .route("/{id}/visits", post(add_visit_to_patient))
        .route("/{id}/visits", get(get_patient_visits))
        .with_state(store)
}

pub fn create_address_router(store: Arc<ClinicStore>) -> Router {
    Router::new()
        .route("/", post(create_address))
        .route("/{id}", get(get_address))
        .route("/{id}", delete(delete_address))
        .with_state(store)
}
