use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use shared_database::ClinicStore;

use crate::handlers::*;

pub fn create_doctor_router(store: Arc<ClinicStore>) -> Router {
    Router::new()
        .route("/", post(create_doctor))
        .route("/", get(list_doctors))
        .route("/{id}", get(get_doctor))
        .route("/{id}", delete(delete_doctor))
        .with_state(store)
}
