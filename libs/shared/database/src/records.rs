use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Medical specializations a doctor can be registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Specialization {
    Surgeon,
    Gp,
    Dermatologist,
    Oculist,
}

/// Diagnostic or therapeutic procedure types a visit can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TreatmentType {
    Usg,
    Ekg,
    Rtg,
    Ecg,
}

/// A stored row. Ids are assigned by the store on first save; relationships
/// between kinds are id fields, never object references.
pub trait Record: Clone + std::fmt::Debug {
    const KIND: &'static str;

    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: i64);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub id: Option<i64>,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub postal_code: String,
}

impl Record for AddressRecord {
    const KIND: &'static str = "Address";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub telephone_number: String,
    pub email: Option<String>,
    pub doctor_number: String,
    pub specialization: Specialization,
}

impl Record for DoctorRecord {
    const KIND: &'static str = "Doctor";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentRecord {
    pub id: Option<i64>,
    pub description: String,
    pub treatment_type: TreatmentType,
}

impl Record for TreatmentRecord {
    const KIND: &'static str = "Medical treatment";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

/// Patient row. `version` starts at 0 and is bumped by the store on every
/// successful update; `id_card_number` is unique across all patients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
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
    pub address_id: Option<i64>,
}

impl Record for PatientRecord {
    const KIND: &'static str = "Patient";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

/// Visit row. The patient and doctor references are required; the treatment
/// reference is optional and may be detached when the treatment is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub id: Option<i64>,
    pub description: Option<String>,
    pub time: DateTime<Utc>,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub medical_treatment_id: Option<i64>,
}

impl Record for VisitRecord {
    const KIND: &'static str = "Visit";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}
