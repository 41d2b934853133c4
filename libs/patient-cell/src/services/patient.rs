use std::sync::Arc;

use tracing::debug;

use shared_database::{AddressRecord, ClinicStore, PatientRecord, Record, StoreError, VisitRecord};

use crate::models::{
    AddVisitRequest, CreateAddressRequest, CreatePatientRequest, PatientResponse,
    UpdatePatientRequest,
};

fn require(value: &str, field: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// Operations spanning the patient aggregate: the patient itself, its owned
/// address and its visits.
pub struct PatientService {
    store: Arc<ClinicStore>,
}

impl PatientService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn create_patient(
        &self,
        request: CreatePatientRequest,
    ) -> Result<PatientResponse, StoreError> {
        debug!("Creating patient {} {}", request.first_name, request.last_name);

        require(&request.first_name, "firstName")?;
        require(&request.last_name, "lastName")?;
        require(&request.telephone_number, "telephoneNumber")?;
        require(&request.patient_number, "patientNumber")?;
        require(&request.id_card_number, "idCardNumber")?;

        let address = match request.address {
            Some(address) => Some(validated_address(address)?),
            None => None,
        };
        let record = PatientRecord {
            id: None,
            first_name: request.first_name,
            last_name: request.last_name,
            telephone_number: request.telephone_number,
            email: request.email,
            patient_number: request.patient_number,
            date_of_birth: request.date_of_birth,
            gender: request.gender,
            id_card_number: request.id_card_number,
            version: 0,
            address_id: None,
        };

        let saved = self.store.create_patient(record, address)?;
        self.assemble(saved)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<PatientResponse, StoreError> {
        debug!("Fetching patient {}", id);
        let (patient, address, visits) = self.store.find_patient_aggregate(id)?;
        Ok(PatientResponse::from_parts(patient, address, visits))
    }

    pub async fn update_patient(
        &self,
        id: i64,
        request: UpdatePatientRequest,
    ) -> Result<PatientResponse, StoreError> {
        debug!("Updating patient {}", id);

        let mut record = self.store.find_patient(id).ok_or(StoreError::NotFound {
            kind: PatientRecord::KIND,
            id,
        })?;
        record.version = request.version;
        if let Some(first_name) = request.first_name {
            record.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            record.last_name = last_name;
        }
        if let Some(telephone_number) = request.telephone_number {
            record.telephone_number = telephone_number;
        }
        if let Some(email) = request.email {
            record.email = Some(email);
        }
        if let Some(patient_number) = request.patient_number {
            record.patient_number = patient_number;
        }
        if let Some(date_of_birth) = request.date_of_birth {
            record.date_of_birth = date_of_birth;
        }
        if let Some(gender) = request.gender {
            record.gender = gender;
        }
        if let Some(id_card_number) = request.id_card_number {
            record.id_card_number = id_card_number;
        }
        require(&record.first_name, "firstName")?;
        require(&record.last_name, "lastName")?;
        require(&record.telephone_number, "telephoneNumber")?;
        require(&record.patient_number, "patientNumber")?;
        require(&record.id_card_number, "idCardNumber")?;

        let updated = self.store.update_patient(record)?;
        self.assemble(updated)
    }

    pub async fn delete_patient(&self, id: i64) -> Result<(), StoreError> {
        debug!("Deleting patient {}", id);
        self.store.delete_patient(id)
    }

    pub async fn add_visit_to_patient(
        &self,
        patient_id: i64,
        request: AddVisitRequest,
    ) -> Result<VisitRecord, StoreError> {
        debug!(
            "Adding visit for patient {} with doctor {}",
            patient_id, request.doctor_id
        );
        self.store.add_visit_to_patient(
            patient_id,
            request.doctor_id,
            request.time,
            request.description,
            request.medical_treatment_id,
        )
    }

    pub async fn find_visits_by_patient_id(
        &self,
        patient_id: i64,
    ) -> Result<Vec<VisitRecord>, StoreError> {
        self.store.visits_for_patient(patient_id)
    }

    // ---- standalone address operations ----

    pub async fn create_address(
        &self,
        request: CreateAddressRequest,
    ) -> Result<AddressRecord, StoreError> {
        let record = validated_address(request)?;
        self.store.save_address(record)
    }

    pub async fn find_address(&self, id: i64) -> Result<AddressRecord, StoreError> {
        self.store.find_address(id).ok_or(StoreError::NotFound {
            kind: AddressRecord::KIND,
            id,
        })
    }

    pub async fn delete_address(&self, id: i64) -> Result<(), StoreError> {
        self.store.delete_address(id)
    }

    fn assemble(&self, patient: PatientRecord) -> Result<PatientResponse, StoreError> {
        let id = patient.id.ok_or_else(|| {
            StoreError::Validation("Stored patient is missing its id".to_string())
        })?;
        let (patient, address, visits) = self.store.find_patient_aggregate(id)?;
        Ok(PatientResponse::from_parts(patient, address, visits))
    }
}

fn validated_address(request: CreateAddressRequest) -> Result<AddressRecord, StoreError> {
    require(&request.address_line1, "addressLine1")?;
    require(&request.city, "city")?;
    require(&request.postal_code, "postalCode")?;
    Ok(request.into_record())
}
