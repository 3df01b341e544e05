//! On-disk ledger models
//!
//! These mirror the JSON documents exactly. Field names are snake_case and
//! enums serialize as their display labels.

mod credibility;
mod report;

pub use credibility::CredibilityLedger;
pub use report::{ReportLedger, ReportModel, ResolutionModel};
