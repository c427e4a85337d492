use super::params::ListParams;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::{Json, Path, Query};
use crate::state::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Router};
use labtrack_core::repo::lab_repo::SqliteLabRepository;
use labtrack_core::repo::pc_repo::SqlitePcRepository;
use labtrack_core::{Pc, PcId, PcService, PcSummary};
use rusqlite::Connection;
use serde_json::Value;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pcs/", get(list_pcs))
        .route("/pcs/summary/", get(summary))
        .route("/pcs/chart.svg", get(chart))
        .route(
            "/pcs/{id}/",
            get(get_pc).put(update_pc).patch(update_pc).delete(delete_pc),
        )
}

fn service(conn: &Connection) -> PcService<SqlitePcRepository<'_>, SqliteLabRepository<'_>> {
    PcService::new(SqlitePcRepository::new(conn), SqliteLabRepository::new(conn))
}

async fn list_pcs(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Pc>>, ApiError> {
    let filter = params.pc_filter()?;
    let page = params.page()?;
    state
        .with_conn(move |conn| service(conn).list_pcs(&filter, page))
        .await
        .map(Json)
}

async fn summary(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PcSummary>, ApiError> {
    let filter = params.pc_filter()?;
    state
        .with_conn(move |conn| service(conn).summary(&filter))
        .await
        .map(Json)
}

async fn chart(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = params.pc_filter()?;
    let svg = state
        .with_conn(move |conn| service(conn).chart_svg(&filter))
        .await?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

async fn get_pc(
    State(state): State<AppState>,
    Path(id): Path<PcId>,
) -> Result<Json<Pc>, ApiError> {
    state
        .with_conn(move |conn| service(conn).get_pc(id))
        .await
        .map(Json)
}

async fn update_pc(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<PcId>,
    Json(body): Json<Value>,
) -> Result<Json<Pc>, ApiError> {
    user.require_admin()?;
    state
        .with_conn(move |conn| service(conn).update_pc(id, body))
        .await
        .map(Json)
}

async fn delete_pc(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<PcId>,
) -> Result<StatusCode, ApiError> {
    user.require_admin()?;
    state
        .with_conn(move |conn| service(conn).delete_pc(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
