//! Error handling utilities for repositories

use modbot_core::{DomainError, ReportId};

/// Create a "report not found" error
pub fn report_not_found(id: ReportId) -> DomainError {
    DomainError::ReportNotFound(id)
}
