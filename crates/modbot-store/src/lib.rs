//! # modbot-store
//!
//! Storage layer implementing the repository traits with JSON ledger files.
//!
//! ## Overview
//!
//! This crate provides file-backed implementations for the report store and
//! the credibility tracker defined in `modbot-core`. It handles:
//!
//! - Ledger file access with serialized read-modify-write
//! - Ledger models matching the on-disk JSON
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use modbot_common::AppConfig;
//! use modbot_core::traits::ReportRepository;
//! use modbot_store::open_stores;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let (reports, _credibility) = open_stores(&config.storage);
//!
//!     let open = reports.find_awaiting_triage().await?;
//!     Ok(())
//! }
//! ```

pub mod ledger;
pub mod mappers;
pub mod models;
pub mod repositories;

use modbot_common::StorageConfig;
use tracing::info;

// Re-export commonly used types
pub use ledger::JsonLedger;
pub use repositories::{JsonCredibilityRepository, JsonReportRepository};

/// Open both ledgers at the configured paths
///
/// Call once per process; each repository serializes writes to its own file.
pub fn open_stores(config: &StorageConfig) -> (JsonReportRepository, JsonCredibilityRepository) {
    info!(
        reports = %config.report_ledger_path.display(),
        credibility = %config.credibility_ledger_path.display(),
        "Opening ledgers"
    );

    (
        JsonReportRepository::new(&config.report_ledger_path),
        JsonCredibilityRepository::new(&config.credibility_ledger_path),
    )
}
