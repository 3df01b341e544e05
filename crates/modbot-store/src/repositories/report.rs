//! JSON ledger implementation of ReportRepository

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

use modbot_core::traits::{RepoResult, ReportRepository};
use modbot_core::{sort_for_evaluation, Priority, Report, ReportDraft, ReportId, Resolution, Snowflake};

use crate::ledger::JsonLedger;
use crate::models::{ReportLedger, ReportModel};

use super::error::report_not_found;

/// Report store backed by a single JSON ledger file
#[derive(Clone)]
pub struct JsonReportRepository {
    ledger: Arc<JsonLedger<ReportLedger>>,
}

impl JsonReportRepository {
    /// Create a new JsonReportRepository
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            ledger: Arc::new(JsonLedger::new(path)),
        }
    }

    async fn load_all(&self) -> Vec<Report> {
        let ledger = self.ledger.read().await;
        let mut reports: Vec<Report> = ledger
            .user_reports
            .into_values()
            .flatten()
            .map(Report::from)
            .collect();
        reports.sort_by_key(|r| r.id);
        reports
    }

    /// Load one report, change it through the entity, and write it back
    async fn modify<F>(&self, id: ReportId, change: F) -> RepoResult<Report>
    where
        F: FnOnce(&mut Report) -> RepoResult<()>,
    {
        self.ledger
            .update(|ledger| {
                let model = ledger.find_mut(id).ok_or_else(|| report_not_found(id))?;
                let mut report = Report::from(model.clone());
                change(&mut report)?;
                *model = ReportModel::from(report.clone());
                Ok(report)
            })
            .await
    }
}

#[async_trait]
impl ReportRepository for JsonReportRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Report>> {
        Ok(self.load_all().await)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ReportId) -> RepoResult<Option<Report>> {
        Ok(self.load_all().await.into_iter().find(|r| r.id == id))
    }

    #[instrument(skip(self))]
    async fn find_awaiting_triage(&self) -> RepoResult<Vec<Report>> {
        let mut reports = self.load_all().await;
        reports.retain(Report::is_awaiting_triage);
        Ok(reports)
    }

    #[instrument(skip(self))]
    async fn find_triaged(&self) -> RepoResult<Vec<Report>> {
        let mut reports = self.load_all().await;
        reports.retain(Report::is_triaged);
        sort_for_evaluation(&mut reports);
        Ok(reports)
    }

    #[instrument(skip(self))]
    async fn count_against(&self, user_id: Snowflake) -> RepoResult<usize> {
        let ledger = self.ledger.read().await;
        Ok(ledger
            .reports()
            .filter(|r| r.reported_user_id == user_id)
            .count())
    }

    #[instrument(skip(self, draft), fields(reporter = %draft.reporter_id, reason = %draft.reason))]
    async fn append(&self, draft: ReportDraft) -> RepoResult<Report> {
        let report = self
            .ledger
            .update(|ledger| {
                let report = draft.into_report(ledger.next_id());
                ledger.push(ReportModel::from(report.clone()));
                Ok(report)
            })
            .await?;

        info!(report_id = %report.id, "Report filed");
        Ok(report)
    }

    #[instrument(skip(self))]
    async fn set_priority(&self, id: ReportId, priority: Priority) -> RepoResult<Report> {
        let report = self
            .modify(id, |report| report.assign_priority(priority))
            .await?;

        info!(report_id = %id, priority = %priority, "Report prioritized");
        Ok(report)
    }

    #[instrument(skip(self, resolution), fields(action = %resolution.action))]
    async fn close(&self, id: ReportId, resolution: Resolution) -> RepoResult<Report> {
        let report = self.modify(id, |report| report.close(resolution)).await?;

        info!(report_id = %id, "Report closed");
        Ok(report)
    }
}
