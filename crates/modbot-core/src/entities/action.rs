//! Moderator actions, escalation routes, and final sanctions

use serde::{Deserialize, Serialize};
use std::fmt;

use super::menu::{numbered_menu, parse_choice};
use super::reason::ReportReason;

/// Action a moderator takes on a selected report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModAction {
    Escalate,
    Ban,
    Suspend,
    RemoveContent,
    Warn,
    Dismiss,
}

impl ModAction {
    /// All actions in menu order
    pub const ALL: [Self; 6] = [
        Self::Escalate,
        Self::Ban,
        Self::Suspend,
        Self::RemoveContent,
        Self::Warn,
        Self::Dismiss,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Escalate => "Escalate report",
            Self::Ban => "Ban offending user",
            Self::Suspend => "Suspend offending user",
            Self::RemoveContent => "Remove content",
            Self::Warn => "Warn offending user",
            Self::Dismiss => "Dismiss report",
        }
    }

    pub fn from_choice(input: &str) -> Option<Self> {
        parse_choice(input, Self::ALL.len()).map(|i| Self::ALL[i])
    }

    pub fn menu() -> String {
        let labels: Vec<&str> = Self::ALL.iter().map(|a| a.label()).collect();
        numbered_menu(&labels)
    }

    /// Notice sent to the reported user, if this action has one
    pub fn consequence_notice(self, reason: ReportReason) -> Option<String> {
        let phrase = reason.violation_phrase();
        match self {
            Self::Ban => Some(format!(
                "Your account has been banned as a result of {phrase} violations."
            )),
            Self::Suspend => Some(format!(
                "Your account has been suspended as a result of {phrase} violations."
            )),
            Self::RemoveContent => Some(format!(
                "Your content has been removed as a result of {phrase} violations."
            )),
            Self::Warn => Some(format!(
                "Ensure your activity follows our {phrase} policy to avoid action on your account."
            )),
            Self::Escalate | Self::Dismiss => None,
        }
    }
}

impl fmt::Display for ModAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Specialized team a report can be handed off to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscalationRoute {
    SecondaryModerator,
    ScamActivityTeam,
    TerroristActivityTeam,
    UserSafetyTeam,
}

impl EscalationRoute {
    pub const ALL: [Self; 4] = [
        Self::SecondaryModerator,
        Self::ScamActivityTeam,
        Self::TerroristActivityTeam,
        Self::UserSafetyTeam,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::SecondaryModerator => "Secondary moderator",
            Self::ScamActivityTeam => "Scam activity team",
            Self::TerroristActivityTeam => "Terrorist activity team",
            Self::UserSafetyTeam => "User safety team",
        }
    }

    pub fn from_choice(input: &str) -> Option<Self> {
        parse_choice(input, Self::ALL.len()).map(|i| Self::ALL[i])
    }

    pub fn menu() -> String {
        let labels: Vec<&str> = Self::ALL.iter().map(|r| r.label()).collect();
        numbered_menu(&labels)
    }
}

impl fmt::Display for EscalationRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final sanction for a repeat offender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sanction {
    Suspend,
    Ban,
}

impl Sanction {
    pub const ALL: [Self; 2] = [Self::Suspend, Self::Ban];

    pub fn from_choice(input: &str) -> Option<Self> {
        parse_choice(input, Self::ALL.len()).map(|i| Self::ALL[i])
    }

    pub const fn past_tense(self) -> &'static str {
        match self {
            Self::Suspend => "suspended",
            Self::Ban => "banned",
        }
    }

    pub fn menu() -> String {
        numbered_menu(&["Suspend offending user", "Ban offending user"])
    }

    pub fn notice(self, reason: ReportReason) -> String {
        format!(
            "Your account has been {} as a result of {} violations.",
            self.past_tense(),
            reason.violation_phrase()
        )
    }
}
