use super::params::ListParams;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::{Json, Path, Query};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Router};
use labtrack_core::repo::lab_repo::SqliteLabRepository;
use labtrack_core::repo::pc_repo::SqlitePcRepository;
use labtrack_core::{Lab, LabDetail, LabId, LabService, Pc};
use rusqlite::Connection;
use serde_json::Value;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/labs/", get(list_labs).post(create_lab))
        .route(
            "/labs/{id}/",
            get(get_lab)
                .put(update_lab)
                .patch(update_lab)
                .delete(delete_lab),
        )
        .route("/labs/{id}/pcs/", get(list_lab_pcs).post(create_lab_pc))
}

fn service(conn: &Connection) -> LabService<SqliteLabRepository<'_>, SqlitePcRepository<'_>> {
    LabService::new(SqliteLabRepository::new(conn), SqlitePcRepository::new(conn))
}

async fn list_labs(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Lab>>, ApiError> {
    let page = params.page()?;
    state
        .with_conn(move |conn| service(conn).list_labs(page))
        .await
        .map(Json)
}

async fn create_lab(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Lab>), ApiError> {
    user.require_admin()?;
    let lab = state
        .with_conn(move |conn| service(conn).create_lab(body))
        .await?;
    Ok((StatusCode::CREATED, Json(lab)))
}

async fn get_lab(
    State(state): State<AppState>,
    Path(id): Path<LabId>,
) -> Result<Json<LabDetail>, ApiError> {
    state
        .with_conn(move |conn| service(conn).get_lab(id))
        .await
        .map(Json)
}

async fn update_lab(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<LabId>,
    Json(body): Json<Value>,
) -> Result<Json<Lab>, ApiError> {
    user.require_admin()?;
    state
        .with_conn(move |conn| service(conn).update_lab(id, body))
        .await
        .map(Json)
}

async fn delete_lab(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<LabId>,
) -> Result<StatusCode, ApiError> {
    user.require_admin()?;
    state
        .with_conn(move |conn| service(conn).delete_lab(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_lab_pcs(
    State(state): State<AppState>,
    Path(id): Path<LabId>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Pc>>, ApiError> {
    let page = params.page()?;
    state
        .with_conn(move |conn| service(conn).list_lab_pcs(id, page))
        .await
        .map(Json)
}

async fn create_lab_pc(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<LabId>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Pc>), ApiError> {
    user.require_admin()?;
    let pc = state
        .with_conn(move |conn| service(conn).create_lab_pc(id, body))
        .await?;
    Ok((StatusCode::CREATED, Json(pc)))
}
