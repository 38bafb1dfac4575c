//! Service context - dependency container for services
//!
//! Holds the repositories, presence store, and push provider that services
//! and the gateway share. Everything is injected as a trait object so tests
//! can swap in in-memory implementations.

use std::sync::Arc;

use livechat_cache::PresenceStore;
use livechat_core::traits::{
    ChatRepository, DeviceRepository, MessageRepository, VisitorRepository,
};
use livechat_push::PushProvider;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    chat_repo: Arc<dyn ChatRepository>,
    message_repo: Arc<dyn MessageRepository>,
    visitor_repo: Arc<dyn VisitorRepository>,
    device_repo: Arc<dyn DeviceRepository>,

    // Presence
    presence_store: Arc<dyn PresenceStore>,

    // Push delivery, absent when no provider is configured
    push_provider: Option<Arc<dyn PushProvider>>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        chat_repo: Arc<dyn ChatRepository>,
        message_repo: Arc<dyn MessageRepository>,
        visitor_repo: Arc<dyn VisitorRepository>,
        device_repo: Arc<dyn DeviceRepository>,
        presence_store: Arc<dyn PresenceStore>,
        push_provider: Option<Arc<dyn PushProvider>>,
    ) -> Self {
        Self {
            chat_repo,
            message_repo,
            visitor_repo,
            device_repo,
            presence_store,
            push_provider,
        }
    }

    // === Repositories ===

    /// Get the chat repository
    pub fn chat_repo(&self) -> &dyn ChatRepository {
        self.chat_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the visitor repository
    pub fn visitor_repo(&self) -> &dyn VisitorRepository {
        self.visitor_repo.as_ref()
    }

    /// Get the device repository
    pub fn device_repo(&self) -> &dyn DeviceRepository {
        self.device_repo.as_ref()
    }

    // === Presence ===

    /// Get the presence store
    pub fn presence_store(&self) -> &dyn PresenceStore {
        self.presence_store.as_ref()
    }

    // === Push ===

    /// Get the push provider, if one is configured
    pub fn push_provider(&self) -> Option<&dyn PushProvider> {
        self.push_provider.as_deref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("presence_store", &"...")
            .field("push_configured", &self.push_provider.is_some())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    chat_repo: Option<Arc<dyn ChatRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    visitor_repo: Option<Arc<dyn VisitorRepository>>,
    device_repo: Option<Arc<dyn DeviceRepository>>,
    presence_store: Option<Arc<dyn PresenceStore>>,
    push_provider: Option<Arc<dyn PushProvider>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            chat_repo: None,
            message_repo: None,
            visitor_repo: None,
            device_repo: None,
            presence_store: None,
            push_provider: None,
        }
    }

    pub fn chat_repo(mut self, repo: Arc<dyn ChatRepository>) -> Self {
        self.chat_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn visitor_repo(mut self, repo: Arc<dyn VisitorRepository>) -> Self {
        self.visitor_repo = Some(repo);
        self
    }

    pub fn device_repo(mut self, repo: Arc<dyn DeviceRepository>) -> Self {
        self.device_repo = Some(repo);
        self
    }

    pub fn presence_store(mut self, store: Arc<dyn PresenceStore>) -> Self {
        self.presence_store = Some(store);
        self
    }

    /// Configure push delivery; skipping this disables push entirely
    pub fn push_provider(mut self, provider: Arc<dyn PushProvider>) -> Self {
        self.push_provider = Some(provider);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.chat_repo
                .ok_or_else(|| ServiceError::validation("chat_repo is required"))?,
            self.message_repo
                .ok_or_else(|| ServiceError::validation("message_repo is required"))?,
            self.visitor_repo
                .ok_or_else(|| ServiceError::validation("visitor_repo is required"))?,
            self.device_repo
                .ok_or_else(|| ServiceError::validation("device_repo is required"))?,
            self.presence_store
                .ok_or_else(|| ServiceError::validation("presence_store is required"))?,
            self.push_provider,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
