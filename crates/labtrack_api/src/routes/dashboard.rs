use crate::error::ApiError;
use crate::extract::Json;
use crate::state::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::Router;
use labtrack_core::repo::inventory_repo::SqliteInventoryRepository;
use labtrack_core::repo::lab_repo::SqliteLabRepository;
use labtrack_core::repo::maintenance_repo::SqliteMaintenanceRepository;
use labtrack_core::{DashboardService, DashboardStats};

pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard/", get(dashboard))
}

async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardStats>, ApiError> {
    state
        .with_conn(move |conn| {
            DashboardService::new(
                SqliteLabRepository::new(conn),
                SqliteInventoryRepository::new(conn),
                SqliteMaintenanceRepository::new(conn),
            )
            .stats()
        })
        .await
        .map(Json)
}
