//! Account registration and credential checks.
//!
//! # Invariants
//! - Passwords are hashed before they reach the repository.
//! - Self-service `admin` registration is only honoured while no account
//!   exists yet or when explicitly allowed.
//! - Authentication failures never reveal whether the username exists.

use super::error::{ServiceError, ServiceResult};
use crate::auth::{hash_password, verify_password};
use crate::model::status::Role;
use crate::model::user::{validate_password, User, UserId};
use crate::model::validation::ValidationError;
use crate::repo::user_repo::UserRepository;
use log::{info, warn};
use serde::Deserialize;

/// Sign-up input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an account.
    ///
    /// # Errors
    /// - `Validation` for malformed username/email/password or a refused
    ///   admin role.
    /// - `Conflict` when the username is taken (case-insensitive).
    pub fn register(
        &self,
        request: RegisterRequest,
        allow_admin_signup: bool,
    ) -> ServiceResult<User> {
        let username = request.username.trim().to_string();
        let email = request.email.trim().to_string();
        validate_password(&request.password)?;

        if request.role.is_admin() && !allow_admin_signup && self.repo.count_users()? > 0 {
            return Err(ValidationError::new(
                "role",
                "admin accounts cannot be self-registered",
            )
            .into());
        }
        if self.repo.find_by_username(&username)?.is_some() {
            return Err(ServiceError::Conflict(
                "a user with that username already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password).map_err(ServiceError::Credential)?;
        let user = User {
            id: 0,
            username,
            email,
            role: request.role,
            password_hash,
            created_at: 0,
        };
        let id = self.repo.create_user(&user)?;
        info!(
            "event=user_register module=service status=ok user_id={id} role={}",
            user.role.as_str()
        );
        self.get_user(id)
    }

    /// Returns the account when `password` matches; `Unauthorized` otherwise.
    pub fn authenticate(&self, username: &str, password: &str) -> ServiceResult<User> {
        match self.repo.find_by_username(username.trim())? {
            Some(user) if verify_password(password, &user.password_hash) => {
                info!("event=user_login module=service status=ok user_id={}", user.id);
                Ok(user)
            }
            _ => {
                warn!("event=user_login module=service status=error reason=invalid_credentials");
                Err(ServiceError::Unauthorized)
            }
        }
    }

    pub fn get_user(&self, id: UserId) -> ServiceResult<User> {
        self.repo
            .get_user(id)?
            .ok_or(ServiceError::NotFound { entity: "user", id })
    }
}
