//! JSON ledger implementation of CredibilityRepository

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

use modbot_core::traits::{CredibilityRepository, RepoResult};
use modbot_core::Snowflake;

use crate::ledger::JsonLedger;
use crate::models::CredibilityLedger;

/// Per-reporter false-report counts backed by a JSON ledger file
#[derive(Clone)]
pub struct JsonCredibilityRepository {
    ledger: Arc<JsonLedger<CredibilityLedger>>,
}

impl JsonCredibilityRepository {
    /// Create a new JsonCredibilityRepository. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            ledger: Arc::new(JsonLedger::new(path)),
        }
    }
}

#[async_trait]
impl CredibilityRepository for JsonCredibilityRepository {
    #[instrument(skip(self))]
    async fn false_report_count(&self, reporter_id: Snowflake) -> RepoResult<u32> {
        Ok(self.ledger.read().await.count(reporter_id))
    }

    #[instrument(skip(self))]
    async fn record_false_report(&self, reporter_id: Snowflake) -> RepoResult<u32> {
        let count = self
            .ledger
            .update(|ledger| Ok(ledger.increment(reporter_id)))
            .await?;

        info!(reporter = %reporter_id, count, "False report recorded");
        Ok(count)
    }
}
