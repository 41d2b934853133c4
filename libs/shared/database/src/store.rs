use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::StoreError;
use crate::records::{
    AddressRecord, DoctorRecord, PatientRecord, Record, TreatmentRecord, VisitRecord,
};

/// One IDENTITY-keyed table: rows by id plus the next id to hand out.
/// Ascending id equals insertion order, which is the order every full scan
/// returns.
#[derive(Debug)]
struct Table<T: Record> {
    rows: HashMap<i64, T>,
    next_id: i64,
}

impl<T: Record> Table<T> {
    fn new() -> Self {
        Self {
            rows: HashMap::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, mut record: T) -> Result<T, StoreError> {
        let id = match record.id() {
            Some(id) => {
                if self.rows.contains_key(&id) {
                    return Err(StoreError::Storage(format!(
                        "{} id {} is already in use",
                        T::KIND,
                        id
                    )));
                }
                self.next_id = self.next_id.max(id + 1);
                id
            }
            None => {
                let id = self.next_id;
                self.next_id += 1;
                record.set_id(id);
                id
            }
        };
        self.rows.insert(id, record.clone());
        Ok(record)
    }

    fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<T> {
        let mut rows: Vec<T> = self.rows.values().cloned().collect();
        rows.sort_by_key(Record::id);
        rows
    }

    fn replace(&mut self, record: T) -> Result<T, StoreError> {
        let id = record.id().ok_or_else(|| {
            StoreError::Validation(format!("{} update requires an id", T::KIND))
        })?;
        if !self.rows.contains_key(&id) {
            return Err(StoreError::NotFound { kind: T::KIND, id });
        }
        self.rows.insert(id, record.clone());
        Ok(record)
    }

    fn remove(&mut self, id: i64) -> Result<T, StoreError> {
        self.rows
            .remove(&id)
            .ok_or(StoreError::NotFound { kind: T::KIND, id })
    }

    fn clear(&mut self) {
        self.rows.clear();
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }
}

#[derive(Debug)]
struct Tables {
    addresses: Table<AddressRecord>,
    doctors: Table<DoctorRecord>,
    patients: Table<PatientRecord>,
    visits: Table<VisitRecord>,
    treatments: Table<TreatmentRecord>,
}

impl Tables {
    fn new() -> Self {
        Self {
            addresses: Table::new(),
            doctors: Table::new(),
            patients: Table::new(),
            visits: Table::new(),
            treatments: Table::new(),
        }
    }

    fn assert_unique_id_card(&self, record: &PatientRecord) -> Result<(), StoreError> {
        let clash = self
            .patients
            .rows
            .values()
            .any(|p| p.id_card_number == record.id_card_number && p.id != record.id);
        if clash {
            return Err(StoreError::Storage(format!(
                "id card number {} is already registered",
                record.id_card_number
            )));
        }
        Ok(())
    }
}

/// In-process storage engine for the clinic tables.
///
/// Every public operation takes the lock exactly once, so multi-row
/// operations (cascade deletes, visit creation, the version check on patient
/// updates) commit atomically and a reader can never observe a half-applied
/// write.
pub struct ClinicStore {
    tables: RwLock<Tables>,
}

impl ClinicStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::new()),
        }
    }

    // Writers never panic between related mutations, so the tables stay
    // consistent even when a poisoned lock is recovered.
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ---- addresses ----

    pub fn save_address(&self, record: AddressRecord) -> Result<AddressRecord, StoreError> {
        self.write().addresses.insert(record)
    }

    pub fn find_address(&self, id: i64) -> Option<AddressRecord> {
        self.read().addresses.get(id)
    }

    pub fn all_addresses(&self) -> Vec<AddressRecord> {
        self.read().addresses.all()
    }

    pub fn update_address(&self, record: AddressRecord) -> Result<AddressRecord, StoreError> {
        self.write().addresses.replace(record)
    }

    /// Fails while the address is still attached to a patient; the cascade in
    /// [`ClinicStore::delete_patient`] is the only way an owned address goes
    /// away.
    pub fn delete_address(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.write();
        if !tables.addresses.contains(id) {
            return Err(StoreError::NotFound {
                kind: AddressRecord::KIND,
                id,
            });
        }
        if tables
            .patients
            .rows
            .values()
            .any(|p| p.address_id == Some(id))
        {
            return Err(StoreError::Storage(format!(
                "Address {} is attached to a patient",
                id
            )));
        }
        tables.addresses.remove(id).map(|_| ())
    }

    pub fn delete_all_addresses(&self) {
        self.write().addresses.clear();
    }

    pub fn count_addresses(&self) -> usize {
        self.read().addresses.len()
    }

    pub fn address_exists(&self, id: i64) -> bool {
        self.read().addresses.contains(id)
    }

    // ---- doctors ----

    pub fn save_doctor(&self, record: DoctorRecord) -> Result<DoctorRecord, StoreError> {
        self.write().doctors.insert(record)
    }

    pub fn find_doctor(&self, id: i64) -> Option<DoctorRecord> {
        self.read().doctors.get(id)
    }

    pub fn all_doctors(&self) -> Vec<DoctorRecord> {
        self.read().doctors.all()
    }

    pub fn update_doctor(&self, record: DoctorRecord) -> Result<DoctorRecord, StoreError> {
        self.write().doctors.replace(record)
    }

    /// A doctor referenced by any visit cannot be deleted; clinical history
    /// wins over doctor records.
    pub fn delete_doctor(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.write();
        if !tables.doctors.contains(id) {
            return Err(StoreError::NotFound {
                kind: DoctorRecord::KIND,
                id,
            });
        }
        let referencing = tables
            .visits
            .rows
            .values()
            .filter(|v| v.doctor_id == id)
            .count();
        if referencing > 0 {
            return Err(StoreError::Storage(format!(
                "Doctor {} is still referenced by {} visit(s)",
                id, referencing
            )));
        }
        tables.doctors.remove(id).map(|_| ())
    }

    pub fn delete_all_doctors(&self) {
        self.write().doctors.clear();
    }

    pub fn count_doctors(&self) -> usize {
        self.read().doctors.len()
    }

    pub fn doctor_exists(&self, id: i64) -> bool {
        self.read().doctors.contains(id)
    }

    // ---- treatments ----

    pub fn save_treatment(&self, record: TreatmentRecord) -> Result<TreatmentRecord, StoreError> {
        self.write().treatments.insert(record)
    }

    pub fn find_treatment(&self, id: i64) -> Option<TreatmentRecord> {
        self.read().treatments.get(id)
    }

    pub fn all_treatments(&self) -> Vec<TreatmentRecord> {
        self.read().treatments.all()
    }

    pub fn update_treatment(
        &self,
        record: TreatmentRecord,
    ) -> Result<TreatmentRecord, StoreError> {
        self.write().treatments.replace(record)
    }

    /// Deleting a treatment detaches it from any visit that referenced it;
    /// the visits themselves survive.
    pub fn delete_treatment(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.write();
        tables.treatments.remove(id)?;
        for visit in tables.visits.rows.values_mut() {
            if visit.medical_treatment_id == Some(id) {
                visit.medical_treatment_id = None;
            }
        }
        Ok(())
    }

    pub fn delete_all_treatments(&self) {
        self.write().treatments.clear();
    }

    pub fn count_treatments(&self) -> usize {
        self.read().treatments.len()
    }

    pub fn treatment_exists(&self, id: i64) -> bool {
        self.read().treatments.contains(id)
    }

    // ---- patients ----

    pub fn save_patient(&self, record: PatientRecord) -> Result<PatientRecord, StoreError> {
        let mut tables = self.write();
        tables.assert_unique_id_card(&record)?;
        tables.patients.insert(record)
    }

    /// Persists a patient together with its optional owned address in one
    /// transaction: when any constraint fails, neither row is written.
    pub fn create_patient(
        &self,
        mut patient: PatientRecord,
        address: Option<AddressRecord>,
    ) -> Result<PatientRecord, StoreError> {
        let mut tables = self.write();
        if let Some(id) = patient.id {
            if tables.patients.contains(id) {
                return Err(StoreError::Storage(format!(
                    "{} id {} is already in use",
                    PatientRecord::KIND,
                    id
                )));
            }
        }
        tables.assert_unique_id_card(&patient)?;
        if let Some(address) = address {
            let saved = tables.addresses.insert(address)?;
            patient.address_id = saved.id;
        }
        let saved = tables.patients.insert(patient)?;
        debug!("Created patient {:?}", saved.id);
        Ok(saved)
    }

    pub fn find_patient(&self, id: i64) -> Option<PatientRecord> {
        self.read().patients.get(id)
    }

    /// Patient plus its owned address and visits, read under a single lock so
    /// the three parts always belong to the same committed state.
    pub fn find_patient_aggregate(
        &self,
        id: i64,
    ) -> Result<(PatientRecord, Option<AddressRecord>, Vec<VisitRecord>), StoreError> {
        let tables = self.read();
        let patient = tables.patients.get(id).ok_or(StoreError::NotFound {
            kind: PatientRecord::KIND,
            id,
        })?;
        let address = patient.address_id.and_then(|aid| tables.addresses.get(aid));
        let mut visits: Vec<VisitRecord> = tables
            .visits
            .rows
            .values()
            .filter(|v| v.patient_id == id)
            .cloned()
            .collect();
        visits.sort_by_key(Record::id);
        Ok((patient, address, visits))
    }

    pub fn all_patients(&self) -> Vec<PatientRecord> {
        self.read().patients.all()
    }

    /// Optimistic-locking commit. The submitted version must match the stored
    /// one; the comparison, the field write and the version bump happen under
    /// one write lock, so of two updates racing from the same version exactly
    /// one wins and the other gets [`StoreError::ConcurrentModification`].
    pub fn update_patient(&self, record: PatientRecord) -> Result<PatientRecord, StoreError> {
        let mut tables = self.write();
        let id = record
            .id
            .ok_or_else(|| StoreError::Validation("Patient update requires an id".to_string()))?;
        let stored = tables.patients.get(id).ok_or(StoreError::NotFound {
            kind: PatientRecord::KIND,
            id,
        })?;
        if stored.version != record.version {
            return Err(StoreError::ConcurrentModification {
                id,
                submitted: record.version,
                stored: stored.version,
            });
        }
        tables.assert_unique_id_card(&record)?;
        let mut committed = record;
        committed.version += 1;
        tables.patients.replace(committed)
    }

    /// Cascade delete: the patient's visits and owned address go with it,
    /// while every doctor and treatment those visits referenced stays.
    pub fn delete_patient(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.write();
        let patient = tables.patients.remove(id)?;
        let before = tables.visits.len();
        tables.visits.rows.retain(|_, v| v.patient_id != id);
        if let Some(address_id) = patient.address_id {
            tables.addresses.rows.remove(&address_id);
        }
        debug!(
            "Deleted patient {} and {} of its visits",
            id,
            before - tables.visits.len()
        );
        Ok(())
    }

    pub fn delete_all_patients(&self) {
        self.write().patients.clear();
    }

    pub fn count_patients(&self) -> usize {
        self.read().patients.len()
    }

    pub fn patient_exists(&self, id: i64) -> bool {
        self.read().patients.contains(id)
    }

    // ---- visits ----

    /// The only way a visit comes into existence. Patient, doctor and the
    /// optional treatment are checked and the visit inserted under one write
    /// lock, so a failed lookup leaves no orphaned visit behind.
    pub fn add_visit_to_patient(
        &self,
        patient_id: i64,
        doctor_id: i64,
        time: DateTime<Utc>,
        description: Option<String>,
        medical_treatment_id: Option<i64>,
    ) -> Result<VisitRecord, StoreError> {
        let mut tables = self.write();
        if !tables.patients.contains(patient_id) {
            return Err(StoreError::NotFound {
                kind: PatientRecord::KIND,
                id: patient_id,
            });
        }
        if !tables.doctors.contains(doctor_id) {
            return Err(StoreError::NotFound {
                kind: DoctorRecord::KIND,
                id: doctor_id,
            });
        }
        if let Some(treatment_id) = medical_treatment_id {
            if !tables.treatments.contains(treatment_id) {
                return Err(StoreError::NotFound {
                    kind: TreatmentRecord::KIND,
                    id: treatment_id,
                });
            }
        }
        let visit = tables.visits.insert(VisitRecord {
            id: None,
            description,
            time,
            patient_id,
            doctor_id,
            medical_treatment_id,
        })?;
        debug!("Added visit {:?} to patient {}", visit.id, patient_id);
        Ok(visit)
    }

    /// Visits of an existing patient in insertion order. A missing patient is
    /// an error, which keeps "no such patient" apart from "patient with no
    /// visits yet".
    pub fn visits_for_patient(&self, patient_id: i64) -> Result<Vec<VisitRecord>, StoreError> {
        let tables = self.read();
        if !tables.patients.contains(patient_id) {
            return Err(StoreError::NotFound {
                kind: PatientRecord::KIND,
                id: patient_id,
            });
        }
        let mut visits: Vec<VisitRecord> = tables
            .visits
            .rows
            .values()
            .filter(|v| v.patient_id == patient_id)
            .cloned()
            .collect();
        visits.sort_by_key(Record::id);
        Ok(visits)
    }

    pub fn find_visit(&self, id: i64) -> Option<VisitRecord> {
        self.read().visits.get(id)
    }

    pub fn all_visits(&self) -> Vec<VisitRecord> {
        self.read().visits.all()
    }

    pub fn delete_visit(&self, id: i64) -> Result<(), StoreError> {
        self.write().visits.remove(id).map(|_| ())
    }

    pub fn count_visits(&self) -> usize {
        self.read().visits.len()
    }

    pub fn visit_exists(&self, id: i64) -> bool {
        self.read().visits.contains(id)
    }

    // ---- filtered patient queries ----

    pub fn patients_by_last_name(&self, last_name: &str) -> Vec<PatientRecord> {
        self.scan_patients(|p| p.last_name == last_name)
    }

    pub fn patients_by_gender(&self, gender: char) -> Vec<PatientRecord> {
        self.scan_patients(|p| p.gender == gender)
    }

    pub fn patients_with_more_than_visits(&self, threshold: usize) -> Vec<PatientRecord> {
        let tables = self.read();
        let mut hits: Vec<PatientRecord> = tables
            .patients
            .rows
            .values()
            .filter(|p| {
                let count = tables
                    .visits
                    .rows
                    .values()
                    .filter(|v| Some(v.patient_id) == p.id)
                    .count();
                count > threshold
            })
            .cloned()
            .collect();
        hits.sort_by_key(Record::id);
        hits
    }

    /// Literal substring match: `str::contains` knows no pattern language, so
    /// `%` and `_` in the fragment only ever match themselves.
    pub fn patients_by_id_card_containing(&self, fragment: &str) -> Vec<PatientRecord> {
        self.scan_patients(|p| p.id_card_number.contains(fragment))
    }

    fn scan_patients(&self, predicate: impl Fn(&PatientRecord) -> bool) -> Vec<PatientRecord> {
        let tables = self.read();
        let mut hits: Vec<PatientRecord> = tables
            .patients
            .rows
            .values()
            .filter(|p| predicate(p))
            .cloned()
            .collect();
        hits.sort_by_key(Record::id);
        hits
    }
}

impl Default for ClinicStore {
    fn default() -> Self {
        Self::new()
    }
}
