//! Application state
//!
//! Holds the shared state for the Axum application: the service context, the token
//! verifier, and configuration.

use std::sync::Arc;

use liveboard_common::{AppConfig, IdentityVerifier};
use liveboard_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Verifies bearer tokens issued by the identity provider
    identity: Arc<IdentityVerifier>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState, deriving the verifier from the identity config
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        let identity = IdentityVerifier::from_config(&config.identity);
        Self {
            service_context: Arc::new(service_context),
            identity: Arc::new(identity),
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the token verifier
    pub fn identity(&self) -> &IdentityVerifier {
        &self.identity
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("identity", &"IdentityVerifier")
            .field("config", &"AppConfig")
            .finish()
    }
}
