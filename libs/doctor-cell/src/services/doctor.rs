use std::sync::Arc;

use tracing::debug;

use shared_database::{ClinicStore, DoctorRecord, Record, StoreError};

use crate::models::CreateDoctorRequest;

pub struct DoctorService {
    store: Arc<ClinicStore>,
}

impl DoctorService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn create_doctor(
        &self,
        request: CreateDoctorRequest,
    ) -> Result<DoctorRecord, StoreError> {
        debug!(
            "Creating doctor {} {} ({:?})",
            request.first_name, request.last_name, request.specialization
        );

        for (value, field) in [
            (&request.first_name, "firstName"),
            (&request.last_name, "lastName"),
            (&request.telephone_number, "telephoneNumber"),
            (&request.doctor_number, "doctorNumber"),
        ] {
            if value.trim().is_empty() {
                return Err(StoreError::Validation(format!(
                    "{} must not be empty",
                    field
                )));
            }
        }

        self.store.save_doctor(request.into_record())
    }

    pub async fn get_doctor(&self, id: i64) -> Result<DoctorRecord, StoreError> {
        debug!("Fetching doctor {}", id);
        self.store.find_doctor(id).ok_or(StoreError::NotFound {
            kind: DoctorRecord::KIND,
            id,
        })
    }

    pub async fn list_doctors(&self) -> Vec<DoctorRecord> {
        self.store.all_doctors()
    }

    /// Refused while any visit still references the doctor; the store keeps
    /// clinical history over doctor records.
    pub async fn delete_doctor(&self, id: i64) -> Result<(), StoreError> {
        debug!("Deleting doctor {}", id);
        self.store.delete_doctor(id)
    }
}
