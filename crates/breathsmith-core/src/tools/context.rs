//! Execution context handed to every tool handler.

use std::sync::Arc;

use crate::config::Config;

/// Read-only context shared by all invocations.
///
/// Built once at startup; safe to clone and share across concurrent calls.
/// The HTTP client pools connections across the chat tools.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Process configuration (credentials, base/log directories).
    pub config: Arc<Config>,
    /// Shared HTTP client for network-touching handlers.
    pub http: reqwest::Client,
}

impl ToolContext {
    /// Create a context from configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
