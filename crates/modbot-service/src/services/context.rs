//! Service context - dependency container for conversations
//!
//! Holds the report store, the credibility tracker, the platform transport,
//! and the moderation policy every session works against.

use std::sync::Arc;

use modbot_common::ModerationConfig;
use modbot_core::traits::{CredibilityRepository, ReportRepository, Transport};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every dependency is shared.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    report_repo: Arc<dyn ReportRepository>,
    credibility_repo: Arc<dyn CredibilityRepository>,

    // Chat platform
    transport: Arc<dyn Transport>,

    // Policy
    moderation: ModerationConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        report_repo: Arc<dyn ReportRepository>,
        credibility_repo: Arc<dyn CredibilityRepository>,
        transport: Arc<dyn Transport>,
        moderation: ModerationConfig,
    ) -> Self {
        Self {
            report_repo,
            credibility_repo,
            transport,
            moderation,
        }
    }

    // === Repositories ===

    /// Get the report repository
    pub fn report_repo(&self) -> &dyn ReportRepository {
        self.report_repo.as_ref()
    }

    /// Get the credibility repository
    pub fn credibility_repo(&self) -> &dyn CredibilityRepository {
        self.credibility_repo.as_ref()
    }

    // === Transport ===

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    // === Policy ===

    pub fn moderation(&self) -> &ModerationConfig {
        &self.moderation
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("transport", &"...")
            .field("moderation", &self.moderation)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    report_repo: Option<Arc<dyn ReportRepository>>,
    credibility_repo: Option<Arc<dyn CredibilityRepository>>,
    transport: Option<Arc<dyn Transport>>,
    moderation: Option<ModerationConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report_repo(mut self, repo: Arc<dyn ReportRepository>) -> Self {
        self.report_repo = Some(repo);
        self
    }

    pub fn credibility_repo(mut self, repo: Arc<dyn CredibilityRepository>) -> Self {
        self.credibility_repo = Some(repo);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Defaults to `ModerationConfig::default()` when not set
    pub fn moderation(mut self, moderation: ModerationConfig) -> Self {
        self.moderation = Some(moderation);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.report_repo
                .ok_or_else(|| ServiceError::validation("report_repo is required"))?,
            self.credibility_repo
                .ok_or_else(|| ServiceError::validation("credibility_repo is required"))?,
            self.transport
                .ok_or_else(|| ServiceError::validation("transport is required"))?,
            self.moderation.unwrap_or_default(),
        ))
    }
}
