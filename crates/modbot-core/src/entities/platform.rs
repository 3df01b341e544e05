//! Platform-side objects as seen through the transport

use crate::value_objects::Snowflake;

/// A user account on the chat platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformUser {
    pub id: Snowflake,
    pub name: String,
}

impl PlatformUser {
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A message fetched from a guild channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformMessage {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub author: PlatformUser,
    pub content: String,
}

impl PlatformMessage {
    /// Quote the message the way the bot echoes it back to a reporter
    pub fn quoted(&self) -> String {
        format!("```{}: {}```", self.author.name, self.content)
    }
}
