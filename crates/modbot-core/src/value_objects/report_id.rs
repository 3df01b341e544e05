//! Report identifier - sequential, assigned by the report store

use serde::{Deserialize, Serialize};
use std::fmt;

/// Report ID
///
/// Assigned once at filing time and never reused. Also the tiebreak when
/// ordering reports of equal priority.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ReportId(u64);

impl ReportId {
    /// The id given to the first report ever filed
    pub const FIRST: Self = Self(1);

    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> u64 {
        self.0
    }

    /// The id that follows this one
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Parse a moderator's selection such as `"5"` or `"#5"`
    pub fn parse_selection(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        digits.parse::<u64>().ok().map(Self)
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ReportId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
