use labtrack_core::db::open_db_in_memory;
use labtrack_core::repo::inventory_repo::SqliteInventoryRepository;
use labtrack_core::repo::lab_repo::{LabRepository, SqliteLabRepository};
use labtrack_core::repo::maintenance_repo::{MaintenanceRepository, SqliteMaintenanceRepository};
use labtrack_core::{
    DashboardService, DashboardStats, InventoryService, Lab, MaintenanceLog, Page,
    ServiceError,
};
use serde_json::json;

#[test]
fn inventory_quantities_are_bounded() {
    let conn = open_db_in_memory().unwrap();
    let lab = SqliteLabRepository::new(&conn).create_lab(&Lab::new("Lab A")).unwrap();
    let service = InventoryService::new(SqliteInventoryRepository::new(&conn));

    let item = service
        .create_item(json!({
            "lab": lab,
            "item_name": "Mouse",
            "total_quantity": 30,
            "working_quantity": 28
        }))
        .unwrap();
    assert_eq!(item.faulty_quantity(), 2);

    let too_many = service
        .update_item(item.id, json!({"working_quantity": 31}))
        .unwrap_err();
    assert!(matches!(too_many, ServiceError::Validation(ref v) if v.field == "working_quantity"));

    let shrunk = service
        .update_item(item.id, json!({"total_quantity": 28}))
        .unwrap();
    assert_eq!(shrunk.faulty_quantity(), 0);
}

#[test]
fn inventory_list_is_scoped_by_lab() {
    let conn = open_db_in_memory().unwrap();
    let labs = SqliteLabRepository::new(&conn);
    let lab_a = labs.create_lab(&Lab::new("Lab A")).unwrap();
    let lab_b = labs.create_lab(&Lab::new("Lab B")).unwrap();
    let service = InventoryService::new(SqliteInventoryRepository::new(&conn));

    for (lab, name) in [(lab_a, "Keyboard"), (lab_a, "Mouse"), (lab_b, "Chair")] {
        service
            .create_item(json!({"lab": lab, "item_name": name, "total_quantity": 1}))
            .unwrap();
    }

    assert_eq!(service.list_items(Some(lab_a), Page::default()).unwrap().len(), 2);
    assert_eq!(service.list_items(None, Page::default()).unwrap().len(), 3);
}

#[test]
fn dashboard_counts_labs_stock_and_pending_logs() {
    let conn = open_db_in_memory().unwrap();
    let labs = SqliteLabRepository::new(&conn);
    let lab_a = labs.create_lab(&Lab::new("Lab A")).unwrap();
    labs.create_lab(&Lab::new("Lab B")).unwrap();

    let inventory = InventoryService::new(SqliteInventoryRepository::new(&conn));
    inventory
        .create_item(json!({
            "lab": lab_a,
            "item_name": "Monitor",
            "total_quantity": 20,
            "working_quantity": 18
        }))
        .unwrap();
    inventory
        .create_item(json!({
            "lab": lab_a,
            "item_name": "Fan",
            "total_quantity": 4,
            "working_quantity": 4
        }))
        .unwrap();

    let logs = SqliteMaintenanceRepository::new(&conn);
    let mut pending = MaintenanceLog::new(lab_a, "Fan wobble");
    pending.settle_lifecycle(1_000);
    logs.create_log(&pending).unwrap();

    let dashboard = DashboardService::new(
        SqliteLabRepository::new(&conn),
        SqliteInventoryRepository::new(&conn),
        SqliteMaintenanceRepository::new(&conn),
    );
    assert_eq!(
        dashboard.stats().unwrap(),
        DashboardStats {
            total_labs: 2,
            total_equipment: 24,
            working_equipment: 22,
            pending_maintenance: 1,
        }
    );
}

#[test]
fn empty_dashboard_is_all_zero() {
    let conn = open_db_in_memory().unwrap();
    let dashboard = DashboardService::new(
        SqliteLabRepository::new(&conn),
        SqliteInventoryRepository::new(&conn),
        SqliteMaintenanceRepository::new(&conn),
    );
    assert_eq!(dashboard.stats().unwrap(), DashboardStats::default());
}
