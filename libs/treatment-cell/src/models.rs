use serde::{Deserialize, Serialize};

use shared_database::{TreatmentRecord, TreatmentType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTreatmentRequest {
    pub description: String,
    pub treatment_type: TreatmentType,
}

impl CreateTreatmentRequest {
    pub fn into_record(self) -> TreatmentRecord {
        TreatmentRecord {
            id: None,
            description: self.description,
            treatment_type: self.treatment_type,
        }
    }
}
