//! # modbot-core
//!
//! Domain layer containing report entities, the closed report taxonomy,
//! value objects, and the ports (report store, credibility tracker,
//! transport) that infrastructure implements.
//! This crate has zero dependencies on infrastructure (files, chat platform, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    numbered_menu, parse_choice, sort_for_evaluation, EscalationRoute, ModAction,
    PlatformMessage, PlatformUser, Priority, Report, ReportDraft, ReportReason, ReportStatus,
    Resolution, Sanction, YesNo,
};
pub use error::DomainError;
pub use traits::{CredibilityRepository, RepoResult, ReportRepository, Transport};
pub use value_objects::{MessageLink, ReportId, Snowflake, SnowflakeParseError};
