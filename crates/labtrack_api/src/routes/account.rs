//! Public endpoints: health, registration, login and token refresh.

use crate::auth::TokenKind;
use crate::error::ApiError;
use crate::extract::Json;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use labtrack_core::repo::user_repo::SqliteUserRepository;
use labtrack_core::{core_version, RegisterRequest, Role, User, UserService};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health/", get(health))
        .route("/register/", post(register))
        .route("/login/", post(login))
        .route("/token/refresh/", post(refresh))
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    access: String,
    refresh: String,
    role: Role,
    username: String,
}

#[derive(Debug, Deserialize)]
struct RefreshBody {
    refresh: String,
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok", "version": core_version()}))
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let allow_admin = state.config.allow_admin_signup;
    let user = state
        .with_conn(move |conn| {
            UserService::new(SqliteUserRepository::new(conn)).register(body, allow_admin)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Failed logins answer with a flat `{"error": "Invalid credentials"}`.
async fn login(State(state): State<AppState>, Json(body): Json<LoginBody>) -> Response {
    let result = state
        .with_conn(move |conn| {
            UserService::new(SqliteUserRepository::new(conn))
                .authenticate(&body.username, &body.password)
        })
        .await;
    let user = match result {
        Ok(user) => user,
        Err(err) if err.status == StatusCode::UNAUTHORIZED => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid credentials"})),
            )
                .into_response();
        }
        Err(err) => return err.into_response(),
    };

    match state.tokens.issue_pair(&user) {
        Ok(pair) => Json(LoginResponse {
            access: pair.access,
            refresh: pair.refresh,
            role: user.role,
            username: user.username,
        })
        .into_response(),
        Err(err) => err.into_response(),
    }
}

async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let claims = state.tokens.verify(&body.refresh, TokenKind::Refresh)?;
    let user_id = claims
        .sub
        .parse()
        .map_err(|_| ApiError::unauthorized("invalid token subject"))?;
    // Accounts removed since the token was issued cannot refresh.
    let user = state
        .with_conn(move |conn| UserService::new(SqliteUserRepository::new(conn)).get_user(user_id))
        .await
        .map_err(|err| match err.status {
            StatusCode::NOT_FOUND => ApiError::unauthorized("account no longer exists"),
            _ => err,
        })?;
    let access = state.tokens.issue(&user, TokenKind::Access)?;
    Ok(Json(json!({"access": access})))
}
