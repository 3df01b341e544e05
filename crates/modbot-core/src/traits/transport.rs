//! Transport port - the chat platform as seen by the moderation engine

use async_trait::async_trait;

use crate::entities::{PlatformMessage, PlatformUser};
use crate::error::DomainError;
use crate::value_objects::{MessageLink, Snowflake};

/// Chat platform collaborator
#[async_trait]
pub trait Transport: Send + Sync {
    /// Resolve a message address
    ///
    /// Fails with `GuildNotFound`, `ChannelNotFound`, or `MessageNotFound`
    /// depending on which part of the address could not be resolved.
    async fn fetch_message(&self, link: MessageLink) -> Result<PlatformMessage, DomainError>;

    /// Look up a user profile by stable ID
    async fn fetch_user(&self, user_id: Snowflake) -> Result<Option<PlatformUser>, DomainError>;

    /// Send a direct notification to a user
    async fn send_direct(&self, user_id: Snowflake, content: &str) -> Result<(), DomainError>;
}
