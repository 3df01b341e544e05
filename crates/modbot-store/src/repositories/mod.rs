//! Repository implementations
//!
//! JSON-file implementations of the repository traits defined in modbot-core.
//! Each repository owns one ledger file.

mod credibility;
mod error;
mod report;

pub use credibility::JsonCredibilityRepository;
pub use report::JsonReportRepository;
