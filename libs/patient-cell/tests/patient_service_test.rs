use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{NaiveDate, TimeZone, Utc};

use patient_cell::models::{
    AddVisitRequest, CreateAddressRequest, CreatePatientRequest, PatientSearchQuery,
    UpdatePatientRequest,
};
use patient_cell::services::{PatientQueryService, PatientService};
use shared_database::{ClinicStore, DoctorRecord, Specialization, StoreError};

fn create_request(first_name: &str, last_name: &str, gender: char, id_card: &str) -> CreatePatientRequest {
    CreatePatientRequest {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        telephone_number: "500100200".to_string(),
        email: None,
        patient_number: format!("PAT-{}", id_card),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 14).expect("valid date"),
        gender,
        id_card_number: id_card.to_string(),
        address: None,
    }
}

fn no_change(version: i64) -> UpdatePatientRequest {
    UpdatePatientRequest {
        version,
        first_name: None,
        last_name: None,
        telephone_number: None,
        email: None,
        patient_number: None,
        date_of_birth: None,
        gender: None,
        id_card_number: None,
    }
}

fn seed_doctor(store: &ClinicStore) -> i64 {
    let saved = store
        .save_doctor(DoctorRecord {
            id: None,
            first_name: "Jan".to_string(),
            last_name: "Nowak".to_string(),
            telephone_number: "600100200".to_string(),
            email: None,
            doctor_number: "DOC-1".to_string(),
            specialization: Specialization::Gp,
        })
        .expect("doctor saves");
    saved.id.expect("id assigned")
}

#[tokio::test]
async fn create_patient_with_address_links_both() {
    let store = Arc::new(ClinicStore::new());
    let service = PatientService::new(Arc::clone(&store));

    let mut request = create_request("Alice", "Green", 'F', "ID246813102");
    request.address = Some(CreateAddressRequest {
        address_line1: "10 Elm Street".to_string(),
        address_line2: None,
        city: "Springfield".to_string(),
        postal_code: "62-030".to_string(),
    });

    let patient = service.create_patient(request).await.expect("create succeeds");

    assert_eq!(patient.version, 0);
    assert!(patient.visits.is_empty());
    let address = patient.address.expect("address was created with the patient");
    assert_eq!(address.city, "Springfield");
    assert_eq!(store.count_addresses(), 1);
}

#[tokio::test]
async fn create_patient_rejects_blank_required_fields_before_storing() {
    let store = Arc::new(ClinicStore::new());
    let service = PatientService::new(Arc::clone(&store));

    let mut request = create_request("Alice", "Green", 'F', "ID246813102");
    request.first_name = "  ".to_string();

    let result = service.create_patient(request).await;

    assert_matches!(result, Err(StoreError::Validation(_)));
    assert_eq!(store.count_patients(), 0);
}

#[tokio::test]
async fn find_by_id_for_missing_patient_is_not_found_both_times() {
    let store = Arc::new(ClinicStore::new());
    let service = PatientService::new(store);

    for _ in 0..2 {
        let result = service.find_by_id(999).await;
        assert_matches!(
            result,
            Err(StoreError::NotFound { kind: "Patient", id: 999 })
        );
    }
}

#[tokio::test]
async fn update_patient_with_current_version_succeeds() {
    let store = Arc::new(ClinicStore::new());
    let service = PatientService::new(store);
    let created = service
        .create_patient(create_request("Alice", "Green", 'F', "ID246813102"))
        .await
        .expect("create succeeds");
    let id = created.id.expect("id assigned");

    let mut request = no_change(created.version);
    request.telephone_number = Some("700999888".to_string());
    let updated = service.update_patient(id, request).await.expect("update succeeds");

    assert_eq!(updated.version, 1);
    assert_eq!(updated.telephone_number, "700999888");
    assert_eq!(updated.last_name, "Green", "untouched fields survive");
}

#[tokio::test]
async fn update_patient_with_stale_version_is_a_conflict() {
    let store = Arc::new(ClinicStore::new());
    let service = PatientService::new(store);
    let created = service
        .create_patient(create_request("Alice", "Green", 'F', "ID246813102"))
        .await
        .expect("create succeeds");
    let id = created.id.expect("id assigned");

    let mut winner = no_change(0);
    winner.first_name = Some("Alicia".to_string());
    service.update_patient(id, winner).await.expect("first update wins");

    let mut loser = no_change(0);
    loser.last_name = Some("Brown".to_string());
    let result = service.update_patient(id, loser).await;

    assert_matches!(result, Err(StoreError::ConcurrentModification { .. }));
    let current = service.find_by_id(id).await.expect("patient exists");
    assert_eq!(current.version, 1);
    assert_eq!(current.first_name, "Alicia");
    assert_eq!(current.last_name, "Green");
}

#[tokio::test]
async fn concurrent_service_updates_have_exactly_one_winner() {
    let store = Arc::new(ClinicStore::new());
    let service = PatientService::new(Arc::clone(&store));
    let created = service
        .create_patient(create_request("Alice", "Green", 'F', "ID246813102"))
        .await
        .expect("create succeeds");
    let id = created.id.expect("id assigned");

    let mut handles = Vec::new();
    for telephone in ["111111111", "222222222"] {
        let store = Arc::clone(&store);
        let mut request = no_change(0);
        request.telephone_number = Some(telephone.to_string());
        handles.push(tokio::spawn(async move {
            PatientService::new(store).update_patient(id, request).await
        }));
    }

    let mut ok = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("task should not panic") {
            Ok(_) => ok += 1,
            Err(StoreError::ConcurrentModification { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(ok, 1);
    assert_eq!(conflicts, 1);
    let current = service.find_by_id(id).await.expect("patient exists");
    assert_eq!(current.version, 1);
}

#[tokio::test]
async fn add_visit_for_missing_doctor_leaves_the_aggregate_unchanged() {
    let store = Arc::new(ClinicStore::new());
    let service = PatientService::new(Arc::clone(&store));
    let created = service
        .create_patient(create_request("Alice", "Green", 'F', "ID246813102"))
        .await
        .expect("create succeeds");
    let id = created.id.expect("id assigned");

    let request = AddVisitRequest {
        doctor_id: 999,
        time: Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).single().expect("valid time"),
        description: Some("Routine check-up".to_string()),
        medical_treatment_id: None,
    };
    let result = service.add_visit_to_patient(id, request).await;

    assert_matches!(
        result,
        Err(StoreError::NotFound { kind: "Doctor", id: 999 })
    );
    let visits = service.find_visits_by_patient_id(id).await.expect("patient exists");
    assert!(visits.is_empty());
}

#[tokio::test]
async fn delete_patient_then_lookup_is_not_found() {
    let store = Arc::new(ClinicStore::new());
    let service = PatientService::new(Arc::clone(&store));
    let created = service
        .create_patient(create_request("Alice", "Green", 'F', "ID246813102"))
        .await
        .expect("create succeeds");
    let id = created.id.expect("id assigned");
    let doctor_id = seed_doctor(&store);
    service
        .add_visit_to_patient(
            id,
            AddVisitRequest {
                doctor_id,
                time: Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).single().expect("valid time"),
                description: None,
                medical_treatment_id: None,
            },
        )
        .await
        .expect("visit is created");

    service.delete_patient(id).await.expect("delete succeeds");

    assert_matches!(
        service.find_by_id(id).await,
        Err(StoreError::NotFound { kind: "Patient", .. })
    );
    assert!(store.doctor_exists(doctor_id), "doctors are never cascaded");
    assert_matches!(
        service.delete_patient(id).await,
        Err(StoreError::NotFound { .. }),
        "deleting a missing id is an error"
    );
}

#[tokio::test]
async fn search_requires_exactly_one_filter() {
    let store = Arc::new(ClinicStore::new());
    let service = PatientService::new(Arc::clone(&store));
    for (first, last, gender, card) in [
        ("Alice", "Green", 'F', "ID246813102"),
        ("Bob", "Stone", 'M', "ID135792468"),
        ("Charlie", "Wood", 'M', "ID987654321"),
    ] {
        service
            .create_patient(create_request(first, last, gender, card))
            .await
            .expect("create succeeds");
    }
    let queries = PatientQueryService::new(store);

    let men = queries
        .search(PatientSearchQuery {
            last_name: None,
            gender: Some('M'),
            more_than_visits: None,
            id_card_contains: None,
        })
        .await
        .expect("one filter is valid");
    let names: Vec<&str> = men.iter().map(|p| p.first_name.as_str()).collect();
    assert_eq!(names, ["Bob", "Charlie"]);

    let none = queries
        .search(PatientSearchQuery {
            last_name: None,
            gender: None,
            more_than_visits: None,
            id_card_contains: None,
        })
        .await;
    assert_matches!(none, Err(StoreError::Validation(_)));

    let both = queries
        .search(PatientSearchQuery {
            last_name: Some("Green".to_string()),
            gender: Some('F'),
            more_than_visits: None,
            id_card_contains: None,
        })
        .await;
    assert_matches!(both, Err(StoreError::Validation(_)));
}
