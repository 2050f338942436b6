use serde_json::json;

use edupath_core::DomainError;

pub type AccessResult<T> = Result<T, AccessError>;

/// Error surfaced by the access facade.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A storage collaborator failed (profile lookup, grant store).
    #[error("collaborator failure: {0}")]
    Source(#[from] anyhow::Error),
}

impl AccessError {
    pub fn http_status(&self) -> u16 {
        match self {
            AccessError::Domain(DomainError::Forbidden) => 403,
            AccessError::Domain(DomainError::NotFound) => 404,
            AccessError::Domain(DomainError::Unauthenticated) => 401,
            AccessError::Domain(DomainError::Validation(_) | DomainError::InvalidId(_)) => 400,
            AccessError::Domain(DomainError::Configuration(_)) | AccessError::Source(_) => 500,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AccessError::Domain(DomainError::Forbidden) => "forbidden",
            AccessError::Domain(DomainError::NotFound) => "not_found",
            AccessError::Domain(DomainError::Unauthenticated) => "unauthenticated",
            AccessError::Domain(DomainError::Validation(_)) => "validation_error",
            AccessError::Domain(DomainError::InvalidId(_)) => "invalid_id",
            AccessError::Domain(DomainError::Configuration(_)) => "configuration_error",
            AccessError::Source(_) => "store_error",
        }
    }

    /// JSON error body. Server-side failures carry no internal detail.
    pub fn to_body(&self) -> serde_json::Value {
        let message = if self.http_status() >= 500 {
            "internal error".to_string()
        } else {
            self.to_string()
        };
        json!({
            "error": self.code(),
            "message": message,
        })
    }

    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            AccessError::Domain(e) => Some(e),
            AccessError::Source(_) => None,
        }
    }
}
