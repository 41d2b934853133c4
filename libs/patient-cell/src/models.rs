use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use shared_database::{AddressRecord, PatientRecord, VisitRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAddressRequest {
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub postal_code: String,
}

impl CreateAddressRequest {
    pub fn into_record(self) -> AddressRecord {
        AddressRecord {
            id: None,
            address_line1: self.address_line1,
            address_line2: self.address_line2,
            city: self.city,
            postal_code: self.postal_code,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub first_name: String,
    pub last_name: String,
    pub telephone_number: String,
    pub email: Option<String>,
    pub patient_number: String,
    pub date_of_birth: NaiveDate,
    pub gender: char,
    pub id_card_number: String,
    pub address: Option<CreateAddressRequest>,
}

/// Partial update. `version` carries the version the caller read; a stale
/// value makes the whole update fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePatientRequest {
    pub version: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub telephone_number: Option<String>,
    pub email: Option<String>,
    pub patient_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<char>,
    pub id_card_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddVisitRequest {
    pub doctor_id: i64,
    pub time: DateTime<Utc>,
    pub description: Option<String>,
    pub medical_treatment_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSearchQuery {
    pub last_name: Option<String>,
    pub gender: Option<char>,
    pub more_than_visits: Option<usize>,
    pub id_card_contains: Option<String>,
}

/// A patient with its owned address and visits, the shape the REST façade
/// hands out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientResponse {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub telephone_number: String,
    pub email: Option<String>,
    pub patient_number: String,
    pub date_of_birth: NaiveDate,
    pub gender: char,
    pub id_card_number: String,
    pub version: i64,
    pub address: Option<AddressRecord>,
    pub visits: Vec<VisitRecord>,
}

impl PatientResponse {
    pub fn from_parts(
        patient: PatientRecord,
        address: Option<AddressRecord>,
        visits: Vec<VisitRecord>,
    ) -> Self {
        Self {
            id: patient.id,
            first_name: patient.first_name,
            last_name: patient.last_name,
            telephone_number: patient.telephone_number,
            email: patient.email,
            patient_number: patient.patient_number,
            date_of_birth: patient.date_of_birth,
            gender: patient.gender,
            id_card_number: patient.id_card_number,
            version: patient.version,
            address,
            visits,
        }
    }
}
