use std::sync::Arc;

use axum::{routing::get, Router};

use doctor_cell::router::create_doctor_router;
use patient_cell::router::{create_address_router, create_patient_router};
use shared_database::ClinicStore;
use treatment_cell::router::create_treatment_router;

pub fn create_router(store: Arc<ClinicStore>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic records API is running!" }))
        .nest("/patient", create_patient_router(store.clone()))
        .nest("/address", create_address_router(store.clone()))
        .nest("/doctor", create_doctor_router(store.clone()))
        .nest("/treatment", create_treatment_router(store))
}
