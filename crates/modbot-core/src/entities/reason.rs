//! Report reason taxonomy
//!
//! The reasons and their sub-concern lists are closed: the intake flow offers
//! exactly these, and the review flow only ever renders what was stored.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::menu::{numbered_menu, parse_choice};

static RE_NUMERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("numeral regex is valid"));

/// Why a message is being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportReason {
    #[serde(rename = "Imminent danger")]
    ImminentDanger,
    #[serde(rename = "False profile")]
    FalseProfile,
    #[serde(rename = "Scam or spam")]
    ScamOrSpam,
    #[serde(rename = "Inappropriate or offensive content")]
    OffensiveContent,
    #[serde(rename = "Other")]
    Other,
}

impl ReportReason {
    /// All reasons in menu order
    pub const ALL: [Self; 5] = [
        Self::ImminentDanger,
        Self::FalseProfile,
        Self::ScamOrSpam,
        Self::OffensiveContent,
        Self::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::ImminentDanger => "Imminent danger",
            Self::FalseProfile => "False profile",
            Self::ScamOrSpam => "Scam or spam",
            Self::OffensiveContent => "Inappropriate or offensive content",
            Self::Other => "Other",
        }
    }

    /// Sub-concerns offered after this reason is picked
    pub const fn concerns(self) -> &'static [&'static str] {
        match self {
            Self::ImminentDanger => &[
                "Person is threatening self harm or suicide",
                "Person is threatening to harm me or others",
            ],
            Self::FalseProfile => &[
                "Profile is underage",
                "Profile has misrepresentations",
                "Profile uses pictures of a different person or is impersonating someone",
            ],
            Self::ScamOrSpam => &[
                "Cryptocurrency scam",
                "Financial solicitation/scam",
                "Commercial or Promotional Activity",
                "Spam",
                "Other",
            ],
            Self::OffensiveContent => &[
                "Inappropriate photos or messages",
                "Violent photos or messages",
                "Hate speech",
                "Harassment",
                "Bullying",
            ],
            Self::Other => &[],
        }
    }

    /// Prompt shown when the reason is picked
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::ImminentDanger => "Please select the relevant danger:",
            Self::FalseProfile | Self::ScamOrSpam => "Please select the type of concern:",
            Self::OffensiveContent => "Please select the type(s) of concern:",
            Self::Other => "Please describe the reason for the report:",
        }
    }

    /// Whether several sub-concerns may be picked at once
    #[inline]
    pub const fn allows_multiple(self) -> bool {
        matches!(self, Self::OffensiveContent)
    }

    #[inline]
    pub fn has_concerns(self) -> bool {
        !self.concerns().is_empty()
    }

    /// Phrase used when telling a user which rules they broke
    pub const fn violation_phrase(self) -> &'static str {
        match self {
            Self::ImminentDanger => "imminent danger",
            Self::FalseProfile => "false profile",
            Self::ScamOrSpam => "scam or spam",
            Self::OffensiveContent => "inappropriate or offensive content",
            Self::Other => "community guideline",
        }
    }

    /// Map a 1-based menu selection to a reason
    pub fn from_choice(input: &str) -> Option<Self> {
        parse_choice(input, Self::ALL.len()).map(|i| Self::ALL[i])
    }

    /// The numbered reason menu
    pub fn menu() -> String {
        let labels: Vec<&str> = Self::ALL.iter().map(|r| r.label()).collect();
        numbered_menu(&labels)
    }

    /// The prompt plus this reason's numbered sub-concern list
    pub fn concern_menu(self) -> String {
        if self.has_concerns() {
            format!("{}\n{}", self.prompt(), numbered_menu(self.concerns()))
        } else {
            self.prompt().to_string()
        }
    }

    /// Resolve a sub-concern answer into concern labels
    ///
    /// Multi-select reasons take every numeral in the text, in order, with
    /// duplicates dropped. Every other reason takes exactly one numeral.
    /// Any out-of-range numeral rejects the whole answer.
    pub fn select_concerns(self, input: &str) -> Option<Vec<&'static str>> {
        let concerns = self.concerns();

        if !self.allows_multiple() {
            return parse_choice(input, concerns.len()).map(|i| vec![concerns[i]]);
        }

        let mut selected: Vec<&'static str> = Vec::new();
        for m in RE_NUMERAL.find_iter(input) {
            let i = parse_choice(m.as_str(), concerns.len())?;
            if !selected.contains(&concerns[i]) {
                selected.push(concerns[i]);
            }
        }

        (!selected.is_empty()).then_some(selected)
    }
}

impl fmt::Display for ReportReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
