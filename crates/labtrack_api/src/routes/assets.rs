//! Equipment, software and inventory endpoints. All writes are admin-only.

use super::params::ListParams;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::{Json, Path, Query};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Router};
use labtrack_core::repo::equipment_repo::SqliteEquipmentRepository;
use labtrack_core::repo::inventory_repo::SqliteInventoryRepository;
use labtrack_core::repo::software_repo::SqliteSoftwareRepository;
use labtrack_core::{
    Equipment, EquipmentId, EquipmentService, InventoryId, InventoryItem, InventoryService,
    Software, SoftwareId, SoftwareService,
};
use serde_json::Value;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/equipments/", get(list_equipment).post(create_equipment))
        .route(
            "/equipments/{id}/",
            get(get_equipment)
                .put(update_equipment)
                .patch(update_equipment)
                .delete(delete_equipment),
        )
        .route("/software/", get(list_software).post(create_software))
        .route(
            "/software/{id}/",
            get(get_software)
                .put(update_software)
                .patch(update_software)
                .delete(delete_software),
        )
        .route("/inventory/", get(list_inventory).post(create_inventory))
        .route(
            "/inventory/{id}/",
            get(get_inventory)
                .put(update_inventory)
                .patch(update_inventory)
                .delete(delete_inventory),
        )
}

async fn list_equipment(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Equipment>>, ApiError> {
    let filter = params.equipment_filter()?;
    let page = params.page()?;
    state
        .with_conn(move |conn| {
            EquipmentService::new(SqliteEquipmentRepository::new(conn))
                .list_equipment(&filter, page)
        })
        .await
        .map(Json)
}

async fn create_equipment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Equipment>), ApiError> {
    user.require_admin()?;
    let equipment = state
        .with_conn(move |conn| {
            EquipmentService::new(SqliteEquipmentRepository::new(conn)).create_equipment(body)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<EquipmentId>,
) -> Result<Json<Equipment>, ApiError> {
    state
        .with_conn(move |conn| {
            EquipmentService::new(SqliteEquipmentRepository::new(conn)).get_equipment(id)
        })
        .await
        .map(Json)
}

async fn update_equipment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<EquipmentId>,
    Json(body): Json<Value>,
) -> Result<Json<Equipment>, ApiError> {
    user.require_admin()?;
    state
        .with_conn(move |conn| {
            EquipmentService::new(SqliteEquipmentRepository::new(conn)).update_equipment(id, body)
        })
        .await
        .map(Json)
}

async fn delete_equipment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<EquipmentId>,
) -> Result<StatusCode, ApiError> {
    user.require_admin()?;
    state
        .with_conn(move |conn| {
            EquipmentService::new(SqliteEquipmentRepository::new(conn)).delete_equipment(id)
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_software(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Software>>, ApiError> {
    let filter = params.software_filter()?;
    let page = params.page()?;
    state
        .with_conn(move |conn| {
            SoftwareService::new(SqliteSoftwareRepository::new(conn)).list_software(&filter, page)
        })
        .await
        .map(Json)
}

async fn create_software(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Software>), ApiError> {
    user.require_admin()?;
    let software = state
        .with_conn(move |conn| {
            SoftwareService::new(SqliteSoftwareRepository::new(conn)).create_software(body)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(software)))
}

async fn get_software(
    State(state): State<AppState>,
    Path(id): Path<SoftwareId>,
) -> Result<Json<Software>, ApiError> {
    state
        .with_conn(move |conn| {
            SoftwareService::new(SqliteSoftwareRepository::new(conn)).get_software(id)
        })
        .await
        .map(Json)
}

async fn update_software(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<SoftwareId>,
    Json(body): Json<Value>,
) -> Result<Json<Software>, ApiError> {
    user.require_admin()?;
    state
        .with_conn(move |conn| {
            SoftwareService::new(SqliteSoftwareRepository::new(conn)).update_software(id, body)
        })
        .await
        .map(Json)
}

async fn delete_software(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<SoftwareId>,
) -> Result<StatusCode, ApiError> {
    user.require_admin()?;
    state
        .with_conn(move |conn| {
            SoftwareService::new(SqliteSoftwareRepository::new(conn)).delete_software(id)
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_inventory(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<InventoryItem>>, ApiError> {
    let lab = params.lab()?;
    let page = params.page()?;
    state
        .with_conn(move |conn| {
            InventoryService::new(SqliteInventoryRepository::new(conn)).list_items(lab, page)
        })
        .await
        .map(Json)
}

async fn create_inventory(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<InventoryItem>), ApiError> {
    user.require_admin()?;
    let item = state
        .with_conn(move |conn| {
            InventoryService::new(SqliteInventoryRepository::new(conn)).create_item(body)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_inventory(
    State(state): State<AppState>,
    Path(id): Path<InventoryId>,
) -> Result<Json<InventoryItem>, ApiError> {
    state
        .with_conn(move |conn| {
            InventoryService::new(SqliteInventoryRepository::new(conn)).get_item(id)
        })
        .await
        .map(Json)
}

async fn update_inventory(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<InventoryId>,
    Json(body): Json<Value>,
) -> Result<Json<InventoryItem>, ApiError> {
    user.require_admin()?;
    state
        .with_conn(move |conn| {
            InventoryService::new(SqliteInventoryRepository::new(conn)).update_item(id, body)
        })
        .await
        .map(Json)
}

async fn delete_inventory(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<InventoryId>,
) -> Result<StatusCode, ApiError> {
    user.require_admin()?;
    state
        .with_conn(move |conn| {
            InventoryService::new(SqliteInventoryRepository::new(conn)).delete_item(id)
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
