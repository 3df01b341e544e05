//! Numbered menus shared by both conversation flows
//!
//! Every menu the bot shows is 1-based and answered with a bare numeral.

use std::fmt::Write;

/// Render `items` as a 1-based numbered list, one per line
pub fn numbered_menu<S: AsRef<str>>(items: &[S]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{}. {}", i + 1, item.as_ref());
    }
    out
}

/// Parse a 1-based menu selection into a 0-based index below `len`
pub fn parse_choice(input: &str, len: usize) -> Option<usize> {
    let n = input.trim().parse::<usize>().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

/// Answer to a binary "1. Yes / 2. No" question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    /// The menu text appended to every yes/no question
    pub const MENU: &'static str = "1. Yes\n2. No";

    pub fn from_choice(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Yes),
            "2" => Some(Self::No),
            _ => None,
        }
    }

    #[inline]
    pub fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }
}
