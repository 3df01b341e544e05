//! Repository traits (ports) - define the interface for report persistence
//!
//! Read operations are lenient: a missing or unreadable backing store reads
//! as empty. Write operations are strict and must fail rather than silently
//! drop an audit record.

use async_trait::async_trait;

use crate::entities::{Priority, Report, ReportDraft, Resolution};
use crate::error::DomainError;
use crate::value_objects::{ReportId, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Report Repository
// ============================================================================

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// All reports from every reporter, ascending id
    async fn find_all(&self) -> RepoResult<Vec<Report>>;

    /// Find report by ID
    async fn find_by_id(&self, id: ReportId) -> RepoResult<Option<Report>>;

    /// Open reports without a priority, ascending id
    async fn find_awaiting_triage(&self) -> RepoResult<Vec<Report>>;

    /// Open prioritized reports in evaluation order
    async fn find_triaged(&self) -> RepoResult<Vec<Report>>;

    /// Number of reports (any status, any reporter) naming this user
    async fn count_against(&self, user_id: Snowflake) -> RepoResult<usize>;

    /// File a new report, assigning the next id
    async fn append(&self, draft: ReportDraft) -> RepoResult<Report>;

    /// Assign a priority. Fails if the report already has one.
    async fn set_priority(&self, id: ReportId, priority: Priority) -> RepoResult<Report>;

    /// Close an open report with its resolution
    async fn close(&self, id: ReportId, resolution: Resolution) -> RepoResult<Report>;
}

// ============================================================================
// Credibility Repository
// ============================================================================

#[async_trait]
pub trait CredibilityRepository: Send + Sync {
    /// Confirmed-false reports filed by this reporter
    async fn false_report_count(&self, reporter_id: Snowflake) -> RepoResult<u32>;

    /// Record one more confirmed-false report and return the new count
    async fn record_false_report(&self, reporter_id: Snowflake) -> RepoResult<u32>;
}
