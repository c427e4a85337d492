//! Service-level error type shared by every use-case service.

use crate::model::validation::ValidationError;
use crate::repo::common::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Input failed field validation or could not be decoded.
    Validation(ValidationError),
    NotFound { entity: &'static str, id: i64 },
    /// Write collides with a unique value.
    Conflict(String),
    /// Input references a row that does not exist.
    InvalidReference(String),
    /// Credentials did not match.
    Unauthorized,
    /// Password hashing failed.
    Credential(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
            Self::InvalidReference(message) => write!(f, "invalid reference: {message}"),
            Self::Unauthorized => write!(f, "invalid credentials"),
            Self::Credential(message) => write!(f, "password hashing failed: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::Conflict(message) => Self::Conflict(message),
            RepoError::InvalidReference(message) => Self::InvalidReference(message),
            other => Self::Repo(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceError;
    use crate::repo::common::RepoError;

    #[test]
    fn repo_errors_keep_their_meaning() {
        let not_found = ServiceError::from(RepoError::NotFound { entity: "pc", id: 4 });
        assert!(matches!(not_found, ServiceError::NotFound { entity: "pc", id: 4 }));

        let conflict = ServiceError::from(RepoError::Conflict("asset_tag".to_string()));
        assert_eq!(conflict.to_string(), "conflict: asset_tag");

        let data = ServiceError::from(RepoError::InvalidData("status".to_string()));
        assert!(matches!(data, ServiceError::Repo(_)));
    }
}
