use std::sync::Arc;

use tracing::debug;

use shared_database::{ClinicStore, PatientRecord, StoreError};

use crate::models::PatientSearchQuery;

/// Read-only filtered patient lookups. Results come back in insertion order
/// and nothing in here mutates the store.
pub struct PatientQueryService {
    store: Arc<ClinicStore>,
}

impl PatientQueryService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn find_by_last_name(&self, last_name: &str) -> Vec<PatientRecord> {
        self.store.patients_by_last_name(last_name)
    }

    pub async fn find_by_gender(&self, gender: char) -> Vec<PatientRecord> {
        self.store.patients_by_gender(gender)
    }

    pub async fn find_with_more_than_visits(&self, threshold: usize) -> Vec<PatientRecord> {
        self.store.patients_with_more_than_visits(threshold)
    }

    pub async fn find_by_id_card_containing(&self, fragment: &str) -> Vec<PatientRecord> {
        self.store.patients_by_id_card_containing(fragment)
    }

    /// Dispatches a search request to the matching lookup. The four lookups
    /// have distinct semantics, so a request must carry exactly one filter.
    pub async fn search(&self, query: PatientSearchQuery) -> Result<Vec<PatientRecord>, StoreError> {
        debug!("Searching patients with query: {:?}", query);

        let PatientSearchQuery {
            last_name,
            gender,
            more_than_visits,
            id_card_contains,
        } = query;

        match (last_name, gender, more_than_visits, id_card_contains) {
            (Some(last_name), None, None, None) => Ok(self.find_by_last_name(&last_name).await),
            (None, Some(gender), None, None) => Ok(self.find_by_gender(gender).await),
            (None, None, Some(threshold), None) => {
                Ok(self.find_with_more_than_visits(threshold).await)
            }
            (None, None, None, Some(fragment)) => {
                Ok(self.find_by_id_card_containing(&fragment).await)
            }
            _ => Err(StoreError::Validation(
                "exactly one of lastName, gender, moreThanVisits, idCardContains is required"
                    .to_string(),
            )),
        }
    }
}
