//! Bearer token issuing, verification and role guards.
//!
//! # Invariants
//! - Tokens are HS256 JWTs; `kind` separates access from refresh tokens and
//!   only access tokens authenticate API calls.
//! - Token contents are never logged.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{
    decode, encode, get_current_timestamp, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use labtrack_core::{Role, User, UserId};
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub username: String,
    pub role: Role,
    pub kind: TokenKind,
    pub iat: u64,
    pub exp: u64,
}

/// Signed token pair returned by login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl_secs: u64,
    refresh_ttl_secs: u64,
}

impl TokenKeys {
    pub fn new(secret: &[u8], access_ttl_secs: u64, refresh_ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, ApiError> {
        Ok(TokenPair {
            access: self.issue(user, TokenKind::Access)?,
            refresh: self.issue(user, TokenKind::Refresh)?,
        })
    }

    pub fn issue(&self, user: &User, kind: TokenKind) -> Result<String, ApiError> {
        let now = get_current_timestamp();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl_secs,
            TokenKind::Refresh => self.refresh_ttl_secs,
        };
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role,
            kind,
            iat: now,
            exp: now.saturating_add(ttl),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| ApiError::internal(format!("token encoding failed: {err}")))
    }

    /// Decodes `token` and checks signature, expiry and `kind`.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, ApiError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| ApiError::unauthorized("invalid or expired token"))?;
        if data.claims.kind != expected {
            return Err(ApiError::unauthorized("wrong token type"));
        }
        Ok(data.claims)
    }
}

/// Caller identity attached to authenticated requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

impl AuthUser {
    fn from_claims(claims: Claims) -> Result<Self, ApiError> {
        let id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| ApiError::unauthorized("invalid token subject"))?;
        Ok(Self {
            id,
            username: claims.username,
            role: claims.role,
        })
    }

    /// Lab, PC, equipment, software and inventory writes.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role.is_admin() {
            return Ok(());
        }
        warn!(
            "event=permission_denied module=api status=error user_id={} role={}",
            self.id,
            self.role.as_str()
        );
        Err(ApiError::forbidden("admin role required"))
    }

    /// Maintenance writes; both roles qualify.
    pub fn require_staff(&self) -> Result<(), ApiError> {
        match self.role {
            Role::Admin | Role::Technician => Ok(()),
        }
    }
}

/// Rejects requests without a valid access token and stores the caller as
/// an `AuthUser` extension.
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(token) = extract_bearer(req.headers()) else {
        return ApiError::unauthorized("authentication credentials were not provided")
            .into_response();
    };
    let user = state
        .tokens
        .verify(token, TokenKind::Access)
        .and_then(AuthUser::from_claims);
    match user {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
