//! Value objects - immutable types that represent domain concepts

mod message_link;
mod report_id;
mod snowflake;

pub use message_link::MessageLink;
pub use report_id::ReportId;
pub use snowflake::{Snowflake, SnowflakeParseError};
