//! Credibility ledger model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use modbot_core::Snowflake;

/// Confirmed-false report counts keyed by reporter id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredibilityLedger(pub BTreeMap<String, u32>);

impl CredibilityLedger {
    pub fn count(&self, reporter_id: Snowflake) -> u32 {
        self.0.get(&reporter_id.to_string()).copied().unwrap_or(0)
    }

    /// Add one to the reporter's count and return the new value
    pub fn increment(&mut self, reporter_id: Snowflake) -> u32 {
        let count = self.0.entry(reporter_id.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }
}
