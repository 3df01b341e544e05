//! Test fixtures and data generators
//!
//! Provides the platform directory and ledger records used by the
//! workflow tests.

use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub const ALICE: u64 = 100;
pub const MALLORY: u64 = 200;
pub const BOB: u64 = 300;
pub const MODERATOR: u64 = 900;
pub const SECOND_MODERATOR: u64 = 901;

pub const GUILD: u64 = 42;
pub const CHANNEL: u64 = 7;
/// Message authored by mallory
pub const SPAM_MESSAGE: u64 = 99;

/// Link to the spam message in the shape users paste it
pub fn spam_link() -> String {
    format!("https://discord.com/channels/{GUILD}/{CHANNEL}/{SPAM_MESSAGE}")
}

/// Platform directory with a few users and one guild
pub fn directory() -> Value {
    json!({
        "users": [
            { "id": ALICE, "name": "alice" },
            { "id": MALLORY, "name": "mallory" },
            { "id": BOB, "name": "bob" },
            { "id": MODERATOR, "name": "moderator" },
            { "id": SECOND_MODERATOR, "name": "moderator2" }
        ],
        "guilds": [
            {
                "id": GUILD,
                "name": "dating",
                "channels": [
                    {
                        "id": CHANNEL,
                        "name": "lobby",
                        "messages": [
                            { "id": SPAM_MESSAGE, "author_id": MALLORY, "content": "buy followers at my link" },
                            { "id": 100, "author_id": MALLORY, "content": "hey" }
                        ]
                    }
                ]
            }
        ]
    })
}

/// Report ledger record against mallory
pub struct ReportRecord {
    pub id: u64,
    pub reporter_id: u64,
    pub reporter: &'static str,
    pub priority: Option<&'static str>,
    pub closed: bool,
}

impl ReportRecord {
    pub fn open(id: u64, reporter_id: u64, reporter: &'static str) -> Self {
        Self {
            id,
            reporter_id,
            reporter,
            priority: None,
            closed: false,
        }
    }

    pub fn priority(mut self, priority: &'static str) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "reported_user": "mallory",
            "reported_user_id": MALLORY.to_string(),
            "reported_by": self.reporter,
            "reporter_id": self.reporter_id.to_string(),
            "message_content": format!("spam #{}", self.id),
            "reported_reason": "Scam or spam",
            "relevant_concerns": ["Spam"],
            "priority": self.priority,
            "status": if self.closed { "Closed" } else { "Open" }
        })
    }
}

/// Report ledger file contents for the given records
pub fn report_ledger(records: &[ReportRecord]) -> Value {
    let mut user_reports = serde_json::Map::new();
    for record in records {
        let entry = user_reports
            .entry(record.reporter_id.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(list) = entry {
            list.push(record.to_json());
        }
    }
    json!({ "user_reports": user_reports })
}
