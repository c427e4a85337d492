//! Maintenance log endpoints. Technicians may write here.

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
use labtrack_core::repo::maintenance_repo::SqliteMaintenanceRepository;
use labtrack_core::{MaintenanceLog, MaintenanceLogId, MaintenanceService};
use rusqlite::Connection;
use serde_json::Value;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/maintenance/", get(list_logs).post(create_log))
        .route(
            "/maintenance/{id}/",
            get(get_log)
                .put(update_log)
                .patch(update_log)
                .delete(delete_log),
        )
}

fn service(
    conn: &Connection,
) -> MaintenanceService<SqliteMaintenanceRepository<'_>, SqliteEquipmentRepository<'_>> {
    MaintenanceService::new(
        SqliteMaintenanceRepository::new(conn),
        SqliteEquipmentRepository::new(conn),
    )
}

async fn list_logs(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<MaintenanceLog>>, ApiError> {
    let filter = params.maintenance_filter()?;
    let page = params.page()?;
    state
        .with_conn(move |conn| service(conn).list_logs(&filter, page))
        .await
        .map(Json)
}

async fn create_log(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<MaintenanceLog>), ApiError> {
    user.require_staff()?;
    let log = state
        .with_conn(move |conn| service(conn).create_log(body))
        .await?;
    Ok((StatusCode::CREATED, Json(log)))
}

async fn get_log(
    State(state): State<AppState>,
    Path(id): Path<MaintenanceLogId>,
) -> Result<Json<MaintenanceLog>, ApiError> {
    state
        .with_conn(move |conn| service(conn).get_log(id))
        .await
        .map(Json)
}

async fn update_log(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<MaintenanceLogId>,
    Json(body): Json<Value>,
) -> Result<Json<MaintenanceLog>, ApiError> {
    user.require_staff()?;
    state
        .with_conn(move |conn| service(conn).update_log(id, body))
        .await
        .map(Json)
}

async fn delete_log(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<MaintenanceLogId>,
) -> Result<StatusCode, ApiError> {
    user.require_staff()?;
    state
        .with_conn(move |conn| service(conn).delete_log(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
