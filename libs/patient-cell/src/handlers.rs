use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::ClinicStore;
use shared_models::error::AppError;

use crate::models::{
    AddVisitRequest, CreateAddressRequest, CreatePatientRequest, PatientSearchQuery,
    UpdatePatientRequest,
};
use crate::services::{PatientQueryService, PatientService};

#[axum::debug_handler]
pub async fn create_patient(
    State(store): State<Arc<ClinicStore>>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(store);

    let patient = service.create_patient(request).await?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(store): State<Arc<ClinicStore>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(store);

    let patient = service.find_by_id(id).await?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(store): State<Arc<ClinicStore>>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePatientRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(store);

    let patient = service.update_patient(id, request).await?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(store): State<Arc<ClinicStore>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(store);

    service.delete_patient(id).await?;

    Ok(Json(json!({ "deleted": id })))
}

#[axum::debug_handler]
pub async fn add_visit_to_patient(
    State(store): State<Arc<ClinicStore>>,
    Path(id): Path<i64>,
    Json(request): Json<AddVisitRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(store);

    let visit = service.add_visit_to_patient(id, request).await?;

    Ok(Json(json!(visit)))
}

#[axum::debug_handler]
pub async fn get_patient_visits(
    State(store): State<Arc<ClinicStore>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(store);

    let visits = service.find_visits_by_patient_id(id).await?;

    Ok(Json(json!(visits)))
}

#[axum::debug_handler]
pub async fn search_patients(
    State(store): State<Arc<ClinicStore>>,
    Query(query): Query<PatientSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let service = PatientQueryService::new(store);

    let patients = service.search(query).await?;
    let total = patients.len();

    Ok(Json(json!({
        "patients": patients,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn create_address(
    State(store): State<Arc<ClinicStore>>,
    Json(request): Json<CreateAddressRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(store);

    let address = service.create_address(request).await?;

    Ok(Json(json!(address)))
}

#[axum::debug_handler]
pub async fn get_address(
    State(store): State<Arc<ClinicStore>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(store);

    let address = service.find_address(id).await?;

    Ok(Json(json!(address)))
}

#[axum::debug_handler]
pub async fn delete_address(
    State(store): State<Arc<ClinicStore>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(store);

    service.delete_address(id).await?;

    Ok(Json(json!({ "deleted": id })))
}
