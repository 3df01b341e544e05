//! Conversation state machines
//!
//! `cancel` and `help` are reserved in every state of both conversations.

mod intake;
mod review;

pub use intake::{IntakeSession, IntakeState};
pub use review::{ReviewSession, ReviewState};

pub const CANCEL_KEYWORD: &str = "cancel";
pub const HELP_KEYWORD: &str = "help";
