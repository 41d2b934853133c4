use shared_models::error::AppError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} not found with ID: {id}")]
    NotFound { kind: &'static str, id: i64 },

    #[error("Stale version for patient {id}: submitted {submitted}, stored {stored}")]
    ConcurrentModification {
        id: i64,
        submitted: i64,
        stored: i64,
    },

    #[error("Storage failure: {0}")]
    Storage(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id, .. } => {
                AppError::NotFound(format!("Could not find entity of id {}", id))
            }
            conflict @ StoreError::ConcurrentModification { .. } => {
                AppError::Conflict(conflict.to_string())
            }
            StoreError::Storage(msg) => AppError::Database(msg),
            StoreError::Validation(msg) => AppError::ValidationError(msg),
        }
    }
}
