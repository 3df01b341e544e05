//! Report ledger model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use modbot_core::{ModAction, Priority, ReportId, ReportReason, ReportStatus, Sanction, Snowflake};

/// Whole report ledger: reports grouped by reporter id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportLedger {
    #[serde(default)]
    pub user_reports: BTreeMap<String, Vec<ReportModel>>,
}

impl ReportLedger {
    /// Every report regardless of reporter
    pub fn reports(&self) -> impl Iterator<Item = &ReportModel> {
        self.user_reports.values().flatten()
    }

    /// One past the largest id in use, or 1 for an empty ledger
    pub fn next_id(&self) -> ReportId {
        self.reports()
            .map(|r| r.id)
            .max()
            .map_or(ReportId::FIRST, ReportId::next)
    }

    pub fn find_mut(&mut self, id: ReportId) -> Option<&mut ReportModel> {
        self.user_reports
            .values_mut()
            .flatten()
            .find(|r| r.id == id)
    }

    pub fn push(&mut self, model: ReportModel) {
        self.user_reports
            .entry(model.reporter_id.to_string())
            .or_default()
            .push(model);
    }
}

/// Report record as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportModel {
    pub id: ReportId,
    pub reported_user: String,
    pub reported_user_id: Snowflake,
    pub reported_by: String,
    pub reporter_id: Snowflake,
    pub message_content: String,
    pub reported_reason: ReportReason,
    #[serde(default)]
    pub relevant_concerns: Vec<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub requested_unmatch: bool,
    #[serde(default)]
    pub requested_block: bool,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<ResolutionModel>,
}

/// Resolution record as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionModel {
    pub action: ModAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanction: Option<Sanction>,
    pub moderator_id: Snowflake,
    pub closed_at: DateTime<Utc>,
}
