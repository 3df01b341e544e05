//! Service layer error types
//!
//! Provides a unified error type for all service operations, plus the text a
//! conversation partner sees when an operation fails.

use modbot_common::AppError;
use modbot_core::DomainError;

/// Service layer error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Domain rule violation or store failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Resource not found
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the error code for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Another moderator got there first
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_conflict())
    }

    /// Explanation shown to the person in the conversation
    pub fn peer_message(&self) -> String {
        match self {
            Self::Domain(DomainError::PriorityAlreadyAssigned(id)) => {
                format!("Report {id} has already been prioritized by another moderator.")
            }
            Self::Domain(DomainError::ReportClosed(id)) => {
                format!("Report {id} has already been closed by another moderator.")
            }
            Self::Domain(DomainError::ReportNotFound(id)) => {
                format!("Report {id} no longer exists.")
            }
            Self::NotFound { resource, id } => format!("{resource} {id} no longer exists."),
            Self::Domain(e) if e.is_storage() => {
                "The report records could not be updated right now, so nothing was changed. \
                 Please try again later."
                    .to_string()
            }
            _ => "Something went wrong while handling that. Please try again later.".to_string(),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) if e.is_conflict() => AppError::Conflict(e.to_string()),
            ServiceError::Domain(e) if e.is_storage() => AppError::Storage(e.to_string()),
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::NotFound { resource, id } => AppError::NotFound(format!("{resource} {id}")),
            ServiceError::Validation(msg) => AppError::InvalidInput(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
