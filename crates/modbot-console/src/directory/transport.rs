//! Transport backed by the directory file
//!
//! Lookups resolve against the loaded directory. Direct messages are queued
//! in an outbox that the console drains and prints after each inbound line.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use modbot_common::AppError;
use modbot_core::traits::Transport;
use modbot_core::{DomainError, MessageLink, PlatformMessage, PlatformUser, Snowflake};

use super::model::{DirectoryFile, GuildEntry};

/// A queued direct notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectMessage {
    pub recipient: Snowflake,
    pub content: String,
}

/// In-memory platform loaded from a directory file
pub struct DirectoryTransport {
    users: HashMap<Snowflake, PlatformUser>,
    guilds: HashMap<Snowflake, GuildEntry>,
    outbox: Mutex<Vec<DirectMessage>>,
}

impl DirectoryTransport {
    pub fn new(directory: DirectoryFile) -> Self {
        let users = directory
            .users
            .into_iter()
            .map(|u| (u.id, PlatformUser::new(u.id, u.name)))
            .collect();
        let guilds = directory.guilds.into_iter().map(|g| (g.id, g)).collect();

        Self {
            users,
            guilds,
            outbox: Mutex::new(Vec::new()),
        }
    }

    /// Load and parse a directory file
    pub async fn load(path: &Path) -> Result<Self, AppError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Transport(format!("{}: {e}", path.display())))?;
        let directory: DirectoryFile = serde_json::from_str(&raw)
            .map_err(|e| AppError::Transport(format!("{}: {e}", path.display())))?;

        info!(
            path = %path.display(),
            users = directory.users.len(),
            guilds = directory.guilds.len(),
            "Platform directory loaded"
        );
        Ok(Self::new(directory))
    }

    /// Look up a user without going through the async port
    pub fn user(&self, user_id: Snowflake) -> Option<&PlatformUser> {
        self.users.get(&user_id)
    }

    /// Take every queued direct message, oldest first
    pub fn drain_outbox(&self) -> Vec<DirectMessage> {
        std::mem::take(&mut *self.outbox.lock())
    }
}

#[async_trait]
impl Transport for DirectoryTransport {
    async fn fetch_message(&self, link: MessageLink) -> Result<PlatformMessage, DomainError> {
        let guild = self
            .guilds
            .get(&link.guild_id)
            .ok_or(DomainError::GuildNotFound(link.guild_id))?;
        let channel = guild
            .channels
            .iter()
            .find(|c| c.id == link.channel_id)
            .ok_or(DomainError::ChannelNotFound(link.channel_id))?;
        let entry = channel
            .messages
            .iter()
            .find(|m| m.id == link.message_id)
            .ok_or(DomainError::MessageNotFound(link.message_id))?;
        let author = self
            .users
            .get(&entry.author_id)
            .cloned()
            .ok_or(DomainError::UserNotFound(entry.author_id))?;

        Ok(PlatformMessage {
            id: entry.id,
            channel_id: channel.id,
            author,
            content: entry.content.clone(),
        })
    }

    async fn fetch_user(&self, user_id: Snowflake) -> Result<Option<PlatformUser>, DomainError> {
        Ok(self.users.get(&user_id).cloned())
    }

    async fn send_direct(&self, user_id: Snowflake, content: &str) -> Result<(), DomainError> {
        if !self.users.contains_key(&user_id) {
            return Err(DomainError::DeliveryFailed(format!(
                "no user {user_id} in the directory"
            )));
        }

        debug!(recipient = %user_id, "Direct message queued");
        self.outbox.lock().push(DirectMessage {
            recipient: user_id,
            content: content.to_string(),
        });
        Ok(())
    }
}
