use serde::{Deserialize, Serialize};

use shared_database::{DoctorRecord, Specialization};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub first_name: String,
    pub last_name: String,
    pub telephone_number: String,
    pub email: Option<String>,
    pub doctor_number: String,
    pub specialization: Specialization,
}

impl CreateDoctorRequest {
    pub fn into_record(self) -> DoctorRecord {
        DoctorRecord {
            id: None,
            first_name: self.first_name,
            last_name: self.last_name,
            telephone_number: self.telephone_number,
            email: self.email,
            doctor_number: self.doctor_number,
            specialization: self.specialization,
        }
    }
}
