//! Report entity - a single abuse complaint and its triage state

use chrono::{DateTime, Utc};
use std::fmt::Write;

use super::action::{ModAction, Sanction};
use super::priority::{Priority, ReportStatus};
use super::reason::ReportReason;
use crate::error::DomainError;
use crate::value_objects::{ReportId, Snowflake};

/// Everything the intake conversation collects before the store assigns an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
    pub reported_user: String,
    pub reported_user_id: Snowflake,
    pub reported_by: String,
    pub reporter_id: Snowflake,
    pub message_content: String,
    pub reason: ReportReason,
    pub relevant_concerns: Vec<String>,
    pub additional_info: Option<String>,
    pub unmatch_requested: bool,
    pub block_requested: bool,
}

impl ReportDraft {
    /// Turn the draft into an open, untriaged report
    pub fn into_report(self, id: ReportId) -> Report {
        Report {
            id,
            reported_user: self.reported_user,
            reported_user_id: self.reported_user_id,
            reported_by: self.reported_by,
            reporter_id: self.reporter_id,
            message_content: self.message_content,
            reason: self.reason,
            relevant_concerns: self.relevant_concerns,
            additional_info: self.additional_info,
            unmatch_requested: self.unmatch_requested,
            block_requested: self.block_requested,
            priority: None,
            status: ReportStatus::Open,
            created_at: Utc::now(),
            resolution: None,
        }
    }
}

/// Audit record written when a report is closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub action: ModAction,
    pub sanction: Option<Sanction>,
    pub moderator_id: Snowflake,
    pub closed_at: DateTime<Utc>,
}

impl Resolution {
    pub fn new(action: ModAction, moderator_id: Snowflake) -> Self {
        Self {
            action,
            sanction: None,
            moderator_id,
            closed_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_sanction(mut self, sanction: Sanction) -> Self {
        self.sanction = Some(sanction);
        self
    }
}

/// Report entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub id: ReportId,
    pub reported_user: String,
    pub reported_user_id: Snowflake,
    pub reported_by: String,
    pub reporter_id: Snowflake,
    pub message_content: String,
    pub reason: ReportReason,
    pub relevant_concerns: Vec<String>,
    pub additional_info: Option<String>,
    pub unmatch_requested: bool,
    pub block_requested: bool,
    /// `None` until a moderator triages the report
    pub priority: Option<Priority>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub resolution: Option<Resolution>,
}

impl Report {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == ReportStatus::Open
    }

    /// Open and not yet prioritized
    #[inline]
    pub fn is_awaiting_triage(&self) -> bool {
        self.is_open() && self.priority.is_none()
    }

    /// Open and prioritized, i.e. ready for evaluation
    #[inline]
    pub fn is_triaged(&self) -> bool {
        self.is_open() && self.priority.is_some()
    }

    /// Set the priority. Priority is write-once.
    pub fn assign_priority(&mut self, priority: Priority) -> Result<(), DomainError> {
        if !self.is_open() {
            return Err(DomainError::ReportClosed(self.id));
        }
        if self.priority.is_some() {
            return Err(DomainError::PriorityAlreadyAssigned(self.id));
        }
        self.priority = Some(priority);
        Ok(())
    }

    /// Close the report with an audit record
    pub fn close(&mut self, resolution: Resolution) -> Result<(), DomainError> {
        if !self.is_open() {
            return Err(DomainError::ReportClosed(self.id));
        }
        self.status = ReportStatus::Closed;
        self.resolution = Some(resolution);
        Ok(())
    }

    /// Multi-line summary used in moderator listings
    pub fn summary(&self) -> String {
        let priority = self.priority.map_or("Unassigned", Priority::label);
        let mut out = format!("__**ID: {} - Priority: {}**__", self.id, priority);

        let _ = write!(out, "\nReported user: {}", self.reported_user);
        let _ = write!(out, "\nReported by: {}", self.reported_by);
        let _ = write!(out, "\nMessage: {}", self.message_content);
        let _ = write!(out, "\nReason: {}", self.reason);
        if !self.relevant_concerns.is_empty() {
            let _ = write!(out, "\nConcerns: {}", self.relevant_concerns.join(", "));
        }
        if let Some(info) = &self.additional_info {
            let _ = write!(out, "\nAdditional information: {info}");
        }
        out
    }
}

/// Order reports for evaluation: High, Medium, Low, then ascending id
///
/// Unprioritized reports sort last. The sort is stable.
pub fn sort_for_evaluation(reports: &mut [Report]) {
    reports.sort_by_key(|r| (r.priority.map_or(u8::MAX, Priority::rank), r.id));
}
