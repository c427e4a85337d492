use labtrack_core::db::open_db_in_memory;
use labtrack_core::repo::equipment_repo::SqliteEquipmentRepository;
use labtrack_core::repo::lab_repo::{LabRepository, SqliteLabRepository};
use labtrack_core::repo::software_repo::SqliteSoftwareRepository;
use labtrack_core::{
    AssetStatus, EquipmentFilter, EquipmentService, EquipmentType, Lab, LabId, Page,
    ServiceError, SoftwareFilter, SoftwareService,
};
use rusqlite::Connection;
use serde_json::json;

fn seed_lab(conn: &Connection, name: &str) -> LabId {
    SqliteLabRepository::new(conn).create_lab(&Lab::new(name)).unwrap()
}

#[test]
fn equipment_create_defaults_and_filters() {
    let conn = open_db_in_memory().unwrap();
    let lab_a = seed_lab(&conn, "Lab A");
    let lab_b = seed_lab(&conn, "Lab B");
    let service = EquipmentService::new(SqliteEquipmentRepository::new(&conn));

    let monitor = service
        .create_equipment(json!({
            "lab": lab_a,
            "equipment_type": "MONITOR",
            "brand": "Samsung",
            "serial_number": "SN-100",
            "price": 149.5
        }))
        .unwrap();
    assert_eq!(monitor.status, AssetStatus::Working);
    assert!(monitor.added_on > 0);

    service
        .create_equipment(json!({
            "lab": lab_a,
            "equipment_type": "ROUTER",
            "brand": "Cisco",
            "status": "not_working"
        }))
        .unwrap();
    service
        .create_equipment(json!({"lab": lab_b, "equipment_type": "MONITOR", "brand": "LG"}))
        .unwrap();

    let monitors = EquipmentFilter {
        equipment_type: Some(EquipmentType::Monitor),
        ..EquipmentFilter::default()
    };
    assert_eq!(service.list_equipment(&monitors, Page::default()).unwrap().len(), 2);

    let lab_a_broken = EquipmentFilter {
        lab_id: Some(lab_a),
        status: Some(AssetStatus::NotWorking),
        ..EquipmentFilter::default()
    };
    let broken = service.list_equipment(&lab_a_broken, Page::default()).unwrap();
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0].brand.as_deref(), Some("Cisco"));

    let by_serial = EquipmentFilter {
        q: Some("sn-1".to_string()),
        ..EquipmentFilter::default()
    };
    let found = service.list_equipment(&by_serial, Page::default()).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, monitor.id);
}

#[test]
fn equipment_rejects_bad_input() {
    let conn = open_db_in_memory().unwrap();
    let lab = seed_lab(&conn, "Lab A");
    let service = EquipmentService::new(SqliteEquipmentRepository::new(&conn));

    let negative = service
        .create_equipment(json!({"lab": lab, "equipment_type": "FAN", "price": -1.0}))
        .unwrap_err();
    assert!(matches!(negative, ServiceError::Validation(ref v) if v.field == "price"));

    let bad_type = service
        .create_equipment(json!({"lab": lab, "equipment_type": "TOASTER"}))
        .unwrap_err();
    assert!(matches!(bad_type, ServiceError::Validation(_)));

    let missing_lab = service
        .create_equipment(json!({"lab": 999, "equipment_type": "FAN"}))
        .unwrap_err();
    assert!(matches!(missing_lab, ServiceError::InvalidReference(_)));

    service
        .create_equipment(json!({"lab": lab, "equipment_type": "SWITCH", "serial_number": "X1"}))
        .unwrap();
    let duplicate = service
        .create_equipment(json!({"lab": lab, "equipment_type": "SWITCH", "serial_number": "X1"}))
        .unwrap_err();
    assert!(matches!(duplicate, ServiceError::Conflict(_)));
}

#[test]
fn equipment_update_keeps_added_on_and_delete_is_final() {
    let conn = open_db_in_memory().unwrap();
    let lab = seed_lab(&conn, "Lab A");
    let service = EquipmentService::new(SqliteEquipmentRepository::new(&conn));

    let created = service
        .create_equipment(json!({"lab": lab, "equipment_type": "KEYBOARD"}))
        .unwrap();
    let updated = service
        .update_equipment(created.id, json!({"added_on": 1, "status": "under_repair"}))
        .unwrap();
    assert_eq!(updated.added_on, created.added_on);
    assert_eq!(updated.status, AssetStatus::UnderRepair);

    service.delete_equipment(created.id).unwrap();
    assert!(matches!(
        service.get_equipment(created.id).unwrap_err(),
        ServiceError::NotFound { entity: "equipment", .. }
    ));
    assert!(matches!(
        service.delete_equipment(created.id).unwrap_err(),
        ServiceError::NotFound { .. }
    ));
}

#[test]
fn software_crud_and_search() {
    let conn = open_db_in_memory().unwrap();
    let lab_a = seed_lab(&conn, "Lab A");
    let lab_b = seed_lab(&conn, "Lab B");
    let service = SoftwareService::new(SqliteSoftwareRepository::new(&conn));

    let office = service
        .create_software(json!({"lab": lab_a, "name": "LibreOffice", "version": "7.6"}))
        .unwrap();
    assert!(office.installed_on > 0);
    service
        .create_software(json!({"lab": lab_b, "name": "Python", "version": "3.12"}))
        .unwrap();

    let in_lab_a = SoftwareFilter {
        lab_id: Some(lab_a),
        q: None,
    };
    assert_eq!(service.list_software(&in_lab_a, Page::default()).unwrap().len(), 1);

    let by_version = SoftwareFilter {
        lab_id: None,
        q: Some("3.12".to_string()),
    };
    let found = service.list_software(&by_version, Page::default()).unwrap();
    assert_eq!(found[0].name, "Python");

    let updated = service
        .update_software(office.id, json!({"license_key": "  ABC-123  "}))
        .unwrap();
    assert_eq!(updated.license_key.as_deref(), Some("ABC-123"));
    assert_eq!(updated.installed_on, office.installed_on);

    service.delete_software(office.id).unwrap();
    assert!(service.get_software(office.id).is_err());
}
