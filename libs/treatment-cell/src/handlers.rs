use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::ClinicStore;
use shared_models::error::AppError;

use crate::models::CreateTreatmentRequest;
use crate::services::TreatmentService;

#[axum::debug_handler]
pub async fn create_treatment(
    State(store): State<Arc<ClinicStore>>,
    Json(request): Json<CreateTreatmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = TreatmentService::new(store);

    let treatment = service.create_treatment(request).await?;

    Ok(Json(json!(treatment)))
}

#[axum::debug_handler]
pub async fn get_treatment(
    State(store): State<Arc<ClinicStore>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = TreatmentService::new(store);

    let treatment = service.get_treatment(id).await?;

    Ok(Json(json!(treatment)))
}

#[axum::debug_handler]
pub async fn list_treatments(
    State(store): State<Arc<ClinicStore>>,
) -> Result<Json<Value>, AppError> {
    let service = TreatmentService::new(store);

    let treatments = service.list_treatments().await;
    let total = treatments.len();

    Ok(Json(json!({
        "treatments": treatments,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn delete_treatment(
    State(store): State<Arc<ClinicStore>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = TreatmentService::new(store);

    service.delete_treatment(id).await?;

    Ok(Json(json!({ "deleted": id })))
}
