//! Shared fixtures for unit tests

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tempfile::TempDir;

use modbot_common::ModerationConfig;
use modbot_core::traits::{CredibilityRepository, ReportRepository, Transport};
use modbot_core::{DomainError, MessageLink, PlatformMessage, PlatformUser, Snowflake};
use modbot_store::{JsonCredibilityRepository, JsonReportRepository};

use crate::services::{ServiceContext, ServiceContextBuilder};

pub const GUILD: u64 = 42;
pub const CHANNEL: u64 = 7;

/// In-memory platform with one guild and one channel
pub struct FakeTransport {
    messages: HashMap<u64, PlatformMessage>,
    users: HashMap<Snowflake, PlatformUser>,
    pub sent: Mutex<Vec<(Snowflake, String)>>,
    pub fail_delivery: bool,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            messages: HashMap::new(),
            users: HashMap::new(),
            sent: Mutex::new(Vec::new()),
            fail_delivery: false,
        }
    }

    pub fn with_message(mut self, id: u64, author: PlatformUser, content: &str) -> Self {
        self.users.insert(author.id, author.clone());
        self.messages.insert(
            id,
            PlatformMessage {
                id: Snowflake::new(id),
                channel_id: Snowflake::new(CHANNEL),
                author,
                content: content.to_string(),
            },
        );
        self
    }

    pub fn sent_to(&self, user_id: Snowflake) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter(|(to, _)| *to == user_id)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn fetch_message(&self, link: MessageLink) -> Result<PlatformMessage, DomainError> {
        if link.guild_id != Snowflake::new(GUILD) {
            return Err(DomainError::GuildNotFound(link.guild_id));
        }
        if link.channel_id != Snowflake::new(CHANNEL) {
            return Err(DomainError::ChannelNotFound(link.channel_id));
        }
        self.messages
            .get(&link.message_id.into_inner())
            .cloned()
            .ok_or(DomainError::MessageNotFound(link.message_id))
    }

    async fn fetch_user(&self, user_id: Snowflake) -> Result<Option<PlatformUser>, DomainError> {
        Ok(self.users.get(&user_id).cloned())
    }

    async fn send_direct(&self, user_id: Snowflake, content: &str) -> Result<(), DomainError> {
        if self.fail_delivery {
            return Err(DomainError::DeliveryFailed(format!("user {user_id} unreachable")));
        }
        self.sent.lock().push((user_id, content.to_string()));
        Ok(())
    }
}

/// Ledger-backed stores in a temporary directory
pub struct TestStores {
    dir: TempDir,
    reports: Arc<JsonReportRepository>,
    credibility: Arc<JsonCredibilityRepository>,
}

impl TestStores {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let reports = Arc::new(JsonReportRepository::new(dir.path().join("reports.json")));
        let credibility = Arc::new(JsonCredibilityRepository::new(dir.path().join("false.json")));
        Self {
            dir,
            reports,
            credibility,
        }
    }

    pub fn reports(&self) -> Arc<dyn ReportRepository> {
        self.reports.clone()
    }

    pub fn credibility(&self) -> Arc<dyn CredibilityRepository> {
        self.credibility.clone()
    }

    /// Overwrite the false-report ledger file with raw contents
    pub fn write_credibility_file(&self, contents: &str) {
        std::fs::write(self.dir.path().join("false.json"), contents).unwrap();
    }

    pub fn context(&self, transport: Arc<FakeTransport>) -> ServiceContext {
        ServiceContextBuilder::new()
            .report_repo(self.reports())
            .credibility_repo(self.credibility())
            .transport(transport)
            .moderation(ModerationConfig::default())
            .build()
            .unwrap()
    }
}

pub fn alice() -> PlatformUser {
    PlatformUser::new(Snowflake::new(100), "alice")
}

pub fn mallory() -> PlatformUser {
    PlatformUser::new(Snowflake::new(200), "mallory")
}

pub fn moderator() -> PlatformUser {
    PlatformUser::new(Snowflake::new(900), "mod")
}
