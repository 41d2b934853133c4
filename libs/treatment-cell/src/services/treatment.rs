use std::sync::Arc;

use tracing::debug;

use shared_database::{ClinicStore, Record, StoreError, TreatmentRecord};

use crate::models::CreateTreatmentRequest;

pub struct TreatmentService {
    store: Arc<ClinicStore>,
}

impl TreatmentService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn create_treatment(
        &self,
        request: CreateTreatmentRequest,
    ) -> Result<TreatmentRecord, StoreError> {
        debug!("Creating treatment ({:?})", request.treatment_type);

        if request.description.trim().is_empty() {
            return Err(StoreError::Validation(
                "description must not be empty".to_string(),
            ));
        }

        self.store.save_treatment(request.into_record())
    }

    pub async fn get_treatment(&self, id: i64) -> Result<TreatmentRecord, StoreError> {
        self.store.find_treatment(id).ok_or(StoreError::NotFound {
            kind: TreatmentRecord::KIND,
            id,
        })
    }

    pub async fn list_treatments(&self) -> Vec<TreatmentRecord> {
        self.store.all_treatments()
    }

    /// Visits that referenced the treatment are detached, never deleted.
    pub async fn delete_treatment(&self, id: i64) -> Result<(), StoreError> {
        debug!("Deleting treatment {}", id);
        self.store.delete_treatment(id)
    }
}
