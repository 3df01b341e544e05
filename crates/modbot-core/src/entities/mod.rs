//! Domain entities - core business objects

mod action;
mod menu;
mod platform;
mod priority;
mod reason;
mod report;

pub use action::{EscalationRoute, ModAction, Sanction};
pub use menu::{numbered_menu, parse_choice, YesNo};
pub use platform::{PlatformMessage, PlatformUser};
pub use priority::{Priority, ReportStatus};
pub use reason::ReportReason;
pub use report::{sort_for_evaluation, Report, ReportDraft, Resolution};
