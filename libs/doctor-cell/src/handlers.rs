use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::ClinicStore;
use shared_models::error::AppError;

use crate::models::CreateDoctorRequest;
use crate::services::DoctorService;

#[axum::debug_handler]
pub async fn create_doctor(
    State(store): State<Arc<ClinicStore>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(store);

    let doctor = service.create_doctor(request).await?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(store): State<Arc<ClinicStore>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(store);

    let doctor = service.get_doctor(id).await?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(store): State<Arc<ClinicStore>>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(store);

    let doctors = service.list_doctors().await;
    let total = doctors.len();

    Ok(Json(json!({
        "doctors": doctors,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn delete_doctor(
    State(store): State<Arc<ClinicStore>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(store);

    service.delete_doctor(id).await?;

    Ok(Json(json!({ "deleted": id })))
}
