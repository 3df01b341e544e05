//! Platform directory
//!
//! A JSON description of users, guilds, channels and messages that stands in
//! for the chat platform when running from the console.

mod model;
mod transport;

pub use model::{ChannelEntry, DirectoryFile, GuildEntry, MessageEntry, UserEntry};
pub use transport::{DirectMessage, DirectoryTransport};
