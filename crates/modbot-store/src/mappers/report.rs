//! Report entity ↔ model mapping

use modbot_core::{Report, Resolution};

use crate::models::{ReportModel, ResolutionModel};

impl From<ReportModel> for Report {
    fn from(model: ReportModel) -> Self {
        Report {
            id: model.id,
            reported_user: model.reported_user,
            reported_user_id: model.reported_user_id,
            reported_by: model.reported_by,
            reporter_id: model.reporter_id,
            message_content: model.message_content,
            reason: model.reported_reason,
            relevant_concerns: model.relevant_concerns,
            additional_info: model.additional_info,
            unmatch_requested: model.requested_unmatch,
            block_requested: model.requested_block,
            priority: model.priority,
            status: model.status,
            created_at: model.created_at,
            resolution: model.resolution.map(Resolution::from),
        }
    }
}

impl From<Report> for ReportModel {
    fn from(report: Report) -> Self {
        ReportModel {
            id: report.id,
            reported_user: report.reported_user,
            reported_user_id: report.reported_user_id,
            reported_by: report.reported_by,
            reporter_id: report.reporter_id,
            message_content: report.message_content,
            reported_reason: report.reason,
            relevant_concerns: report.relevant_concerns,
            additional_info: report.additional_info,
            requested_unmatch: report.unmatch_requested,
            requested_block: report.block_requested,
            priority: report.priority,
            status: report.status,
            created_at: report.created_at,
            resolution: report.resolution.map(ResolutionModel::from),
        }
    }
}

impl From<ResolutionModel> for Resolution {
    fn from(model: ResolutionModel) -> Self {
        Resolution {
            action: model.action,
            sanction: model.sanction,
            moderator_id: model.moderator_id,
            closed_at: model.closed_at,
        }
    }
}

impl From<Resolution> for ResolutionModel {
    fn from(resolution: Resolution) -> Self {
        ResolutionModel {
            action: resolution.action,
            sanction: resolution.sanction,
            moderator_id: resolution.moderator_id,
            closed_at: resolution.closed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use modbot_core::{ModAction, Priority, ReportDraft, ReportId, ReportReason, Sanction, Snowflake};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_stored_json_uses_labels() {
        let mut report = ReportDraft {
            reported_user: "mallory".to_string(),
            reported_user_id: Snowflake::new(200),
            reported_by: "alice".to_string(),
            reporter_id: Snowflake::new(100),
            message_content: "hello".to_string(),
            reason: ReportReason::OffensiveContent,
            relevant_concerns: vec!["Hate speech".to_string()],
            additional_info: None,
            unmatch_requested: false,
            block_requested: true,
        }
        .into_report(ReportId::new(4));
        report.priority = Some(Priority::High);

        let value = serde_json::to_value(ReportModel::from(report)).unwrap();
        assert_eq!(value["id"], json!(4));
        assert_eq!(value["reported_reason"], json!("Inappropriate or offensive content"));
        assert_eq!(value["priority"], json!("High"));
        assert_eq!(value["status"], json!("Open"));
        assert_eq!(value["requested_block"], json!(true));
        assert!(value.get("resolution").is_none());
    }

    #[test]
    fn test_minimal_record_loads_with_defaults() {
        let model: ReportModel = serde_json::from_value(json!({
            "id": 7,
            "reported_user": "mallory",
            "reported_user_id": "200",
            "reported_by": "alice",
            "reporter_id": 100,
            "message_content": "spam",
            "reported_reason": "Scam or spam"
        }))
        .unwrap();

        let report = Report::from(model);
        assert_eq!(report.id, ReportId::new(7));
        assert_eq!(report.reporter_id, Snowflake::new(100));
        assert!(report.is_awaiting_triage());
        assert!(report.relevant_concerns.is_empty());
    }

    #[test]
    fn test_resolution_maps_both_ways() {
        let resolution = Resolution::new(ModAction::Ban, Snowflake::new(9)).with_sanction(Sanction::Ban);
        let back = Resolution::from(ResolutionModel::from(resolution.clone()));
        assert_eq!(back, resolution);
    }
}
