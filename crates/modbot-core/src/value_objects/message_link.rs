//! Message link - the guild/channel/message address of a reported message
//!
//! Users paste a "Copy Message Link" URL such as
//! `https://chat.example/channels/42/7/99`, or just the bare `42/7/99`
//! address. Only the three slash-separated numeric segments matter.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use super::Snowflake;

static RE_MESSAGE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d+)/(\d+)/(\d+)\b").expect("message link regex is valid"));

/// Three-part message address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageLink {
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
}

impl MessageLink {
    pub fn new(guild_id: Snowflake, channel_id: Snowflake, message_id: Snowflake) -> Self {
        Self {
            guild_id,
            channel_id,
            message_id,
        }
    }

    /// Find the first message address in free text
    ///
    /// Returns `None` if no `<digits>/<digits>/<digits>` address is present
    /// or a segment overflows a snowflake.
    pub fn find_in(text: &str) -> Option<Self> {
        let caps = RE_MESSAGE_LINK.captures(text)?;
        let part = |i: usize| caps.get(i).and_then(|m| Snowflake::parse(m.as_str()).ok());

        Some(Self::new(part(1)?, part(2)?, part(3)?))
    }
}

impl fmt::Display for MessageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.guild_id, self.channel_id, self.message_id)
    }
}
