use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use shared_database::ClinicStore;

use crate::handlers::*;

pub fn create_treatment_router(store: Arc<ClinicStore>) -> Router {
    Router::new()
        .route("/", post(create_treatment))
        .route("/", get(list_treatments))
        .route("/{id}", get(get_treatment))
        .route("/{id}", delete(delete_treatment))
        .with_state(store)
}
