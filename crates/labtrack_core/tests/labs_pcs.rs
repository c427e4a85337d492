use labtrack_core::db::open_db_in_memory;
use labtrack_core::repo::lab_repo::{LabRepository, SqliteLabRepository};
use labtrack_core::repo::pc_repo::{PcRepository, SqlitePcRepository};
use labtrack_core::{
    AssetStatus, Lab, LabService, ListQuery, Page, Pc, PcFilter, PcService, RepoError,
    ServiceError,
};
use rusqlite::Connection;
use serde_json::json;

fn lab_service(conn: &Connection) -> LabService<SqliteLabRepository<'_>, SqlitePcRepository<'_>> {
    LabService::new(SqliteLabRepository::new(conn), SqlitePcRepository::new(conn))
}

fn pc_service(conn: &Connection) -> PcService<SqlitePcRepository<'_>, SqliteLabRepository<'_>> {
    PcService::new(SqlitePcRepository::new(conn), SqliteLabRepository::new(conn))
}

#[test]
fn lab_crud_through_repository() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLabRepository::new(&conn);

    let mut lab = Lab::new("Computer Lab 1");
    lab.location = Some("Block A".to_string());
    lab.fans = 6;
    let id = repo.create_lab(&lab).unwrap();

    let mut loaded = repo.get_lab(id).unwrap().unwrap();
    assert_eq!(loaded.name, "Computer Lab 1");
    assert_eq!(loaded.fans, 6);
    assert!(loaded.created_at > 0);

    loaded.lights = 12;
    repo.update_lab(&loaded).unwrap();
    assert_eq!(repo.get_lab(id).unwrap().unwrap().lights, 12);

    repo.delete_lab(id).unwrap();
    assert!(repo.get_lab(id).unwrap().is_none());
    assert!(matches!(
        repo.delete_lab(id).unwrap_err(),
        RepoError::NotFound { entity: "lab", .. }
    ));
}

#[test]
fn repository_rejects_invalid_lab_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLabRepository::new(&conn);

    let err = repo.create_lab(&Lab::new("   ")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(ref v) if v.field == "name"));
    assert_eq!(repo.count_labs().unwrap(), 0);
}

#[test]
fn duplicate_lab_code_is_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let service = lab_service(&conn);

    service
        .create_lab(json!({"name": "Chemistry", "lab_code": "CH-1"}))
        .unwrap();
    let err = service
        .create_lab(json!({"name": "Chemistry 2", "lab_code": "CH-1"}))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[test]
fn lab_detail_counts_pcs_and_path_lab_wins() {
    let conn = open_db_in_memory().unwrap();
    let service = lab_service(&conn);

    let first = service.create_lab(json!({"name": "Lab A"})).unwrap();
    let second = service.create_lab(json!({"name": "Lab B"})).unwrap();

    let pc = service
        .create_lab_pc(first.id, json!({"name": "PC-01", "lab": second.id}))
        .unwrap();
    assert_eq!(pc.lab_id, first.id);
    service
        .create_lab_pc(first.id, json!({"name": "PC-02", "status": "not_working"}))
        .unwrap();

    let detail = service.get_lab(first.id).unwrap();
    assert_eq!(detail.pc_count, 2);
    assert_eq!(service.get_lab(second.id).unwrap().pc_count, 0);

    let listed = service.list_lab_pcs(first.id, Page::default()).unwrap();
    let names: Vec<&str> = listed.iter().map(|pc| pc.name.as_str()).collect();
    assert_eq!(names, vec!["PC-02", "PC-01"]);
}

#[test]
fn pcs_under_missing_lab_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = lab_service(&conn);

    assert!(matches!(
        service.list_lab_pcs(77, Page::default()).unwrap_err(),
        ServiceError::NotFound { entity: "lab", id: 77 }
    ));
    assert!(matches!(
        service.create_lab_pc(77, json!({"name": "PC-01"})).unwrap_err(),
        ServiceError::NotFound { entity: "lab", .. }
    ));
}

#[test]
fn pc_validation_rejects_bad_network_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = lab_service(&conn);
    let lab = service.create_lab(json!({"name": "Lab A"})).unwrap();

    let bad_ip = service
        .create_lab_pc(lab.id, json!({"name": "PC-01", "ip_address": "300.1.1.1"}))
        .unwrap_err();
    assert!(matches!(bad_ip, ServiceError::Validation(ref v) if v.field == "ip_address"));

    let bad_mac = service
        .create_lab_pc(lab.id, json!({"name": "PC-01", "mac_address": "00:11:22"}))
        .unwrap_err();
    assert!(matches!(bad_mac, ServiceError::Validation(ref v) if v.field == "mac_address"));
}

#[test]
fn deleting_lab_cascades_to_pcs() {
    let conn = open_db_in_memory().unwrap();
    let labs = SqliteLabRepository::new(&conn);
    let pcs = SqlitePcRepository::new(&conn);

    let lab_id = labs.create_lab(&Lab::new("Lab A")).unwrap();
    let pc_id = pcs.create_pc(&Pc::new(lab_id, "PC-01")).unwrap();
    labs.delete_lab(lab_id).unwrap();

    assert!(pcs.get_pc(pc_id).unwrap().is_none());
    assert!(pcs.list_pcs(&ListQuery::default()).unwrap().is_empty());
}

#[test]
fn pc_update_merges_body_and_keeps_identity() {
    let conn = open_db_in_memory().unwrap();
    let lab = lab_service(&conn).create_lab(json!({"name": "Lab A"})).unwrap();
    let created = lab_service(&conn)
        .create_lab_pc(lab.id, json!({"name": "PC-01", "brand": "Dell"}))
        .unwrap();

    let service = pc_service(&conn);
    let updated = service
        .update_pc(created.id, json!({"id": 999, "status": "under_repair", "brand": null}))
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "PC-01");
    assert_eq!(updated.brand, None);
    assert_eq!(updated.status, AssetStatus::UnderRepair);
    assert_eq!(updated.created_at, created.created_at);

    let unknown = service
        .update_pc(created.id, json!({"colour": "black"}))
        .unwrap_err();
    assert!(matches!(unknown, ServiceError::Validation(_)));
}

#[test]
fn pc_summary_and_chart_follow_filters() {
    let conn = open_db_in_memory().unwrap();
    let labs = lab_service(&conn);
    let a = labs.create_lab(json!({"name": "Lab A"})).unwrap();
    let b = labs.create_lab(json!({"name": "Lab B"})).unwrap();
    for (lab_id, name, status) in [
        (a.id, "A-1", "working"),
        (a.id, "A-2", "not_working"),
        (a.id, "A-3", "under_repair"),
        (b.id, "B-1", "working"),
    ] {
        labs.create_lab_pc(lab_id, json!({"name": name, "status": status}))
            .unwrap();
    }

    let service = pc_service(&conn);
    let summary = service.summary(&PcFilter::default()).unwrap();
    assert_eq!(summary.totals.total, 4);
    assert_eq!(summary.totals.working, 2);
    assert_eq!(summary.totals.not_working, 1);
    assert_eq!(summary.totals.other, 1);
    assert_eq!(summary.by_lab[&a.id].total, 3);
    assert_eq!(summary.by_lab[&b.id].working, 1);

    let working = PcFilter {
        status: Some(AssetStatus::Working),
        ..PcFilter::default()
    };
    assert_eq!(service.list_pcs(&working, Page::default()).unwrap().len(), 2);

    let search = PcFilter {
        q: Some("b-".to_string()),
        ..PcFilter::default()
    };
    let found = service.list_pcs(&search, Page::default()).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "B-1");

    let svg = service.chart_svg(&PcFilter::default()).unwrap();
    assert!(svg.contains("Lab A"));
    assert!(svg.contains("Lab B"));

    let empty = service
        .chart_svg(&PcFilter {
            q: Some("nothing matches".to_string()),
            ..PcFilter::default()
        })
        .unwrap();
    assert!(empty.contains("No data"));
}

#[test]
fn lab_list_pages_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let service = lab_service(&conn);
    for index in 0..5 {
        service
            .create_lab(json!({"name": format!("Lab {index}")}))
            .unwrap();
    }

    let page = service
        .list_labs(Page {
            limit: Some(2),
            offset: 1,
        })
        .unwrap();
    let names: Vec<&str> = page.iter().map(|lab| lab.name.as_str()).collect();
    assert_eq!(names, vec!["Lab 3", "Lab 2"]);
}
