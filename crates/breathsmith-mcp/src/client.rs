//! Minimal MCP client over a child-process stdio transport.
//!
//! Used by the integration tests to drive a breathsmith server end to end,
//! and usable on its own to chain breathsmith into another host.

use std::sync::Arc;

use anyhow::{Context, Result};
use rmcp::model::{CallToolRequestParam, CallToolResult, Tool as McpTool};
use rmcp::service::{RoleClient, RunningService, ServiceExt};
use rmcp::transport::{ConfigureCommandExt, TokioChildProcess};
use rmcp::ClientHandler;
use tokio::process::Command;
use tokio::sync::RwLock;

use crate::config::{McpConfig, McpTransport};

/// Client handler that ignores server-initiated requests.
///
/// We only call tools, so nothing from the server needs handling.
#[derive(Debug, Clone, Copy, Default)]
struct MinimalClientHandler;

impl ClientHandler for MinimalClientHandler {}

type SharedService = Arc<RunningService<RoleClient, MinimalClientHandler>>;

/// A connection to one MCP server.
///
/// The running service lives behind an `Arc` so concurrent tool calls never
/// hold the lock across an await.
pub struct McpClient {
    name: String,
    service: RwLock<Option<SharedService>>,
    config: McpConfig,
}

impl McpClient {
    pub fn new(config: McpConfig) -> Self {
        Self {
            name: config.name.clone(),
            service: RwLock::new(None),
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Spawn the server process and complete the MCP handshake.
    pub async fn connect(&self) -> Result<()> {
        let McpTransport::Stdio { command, args, env } = &self.config.transport;

        let args = args.clone();
        let env = env.clone();
        let transport = TokioChildProcess::new(Command::new(command).configure(move |cmd| {
            cmd.args(&args);
            for (key, value) in &env {
                cmd.env(key, value);
            }
        }))
        .with_context(|| format!("spawning MCP server '{}'", self.name))?;

        let service = MinimalClientHandler
            .serve(transport)
            .await
            .with_context(|| format!("initializing MCP connection to '{}'", self.name))?;

        *self.service.write().await = Some(Arc::new(service));
        Ok(())
    }

    /// Shut down the connection if this is the last reference to it.
    pub async fn disconnect(&self) -> Result<()> {
        if let Some(service) = self.service.write().await.take() {
            if let Ok(service) = Arc::try_unwrap(service) {
                service
                    .cancel()
                    .await
                    .with_context(|| format!("cancelling MCP connection to '{}'", self.name))?;
            }
        }
        Ok(())
    }

    pub async fn is_connected(&self) -> bool {
        self.service.read().await.is_some()
    }

    async fn shared_service(&self) -> Result<SharedService> {
        self.service
            .read()
            .await
            .as_ref()
            .with_context(|| format!("not connected to MCP server '{}'", self.name))
            .cloned()
    }

    /// List the tools the server advertises.
    pub async fn list_tools(&self) -> Result<Vec<McpTool>> {
        let service = self.shared_service().await?;
        service
            .list_all_tools()
            .await
            .with_context(|| format!("listing tools on '{}'", self.name))
    }

    /// Call one tool by name.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> Result<CallToolResult> {
        let service = self.shared_service().await?;
        service
            .call_tool(CallToolRequestParam {
                name: name.to_string().into(),
                arguments,
            })
            .await
            .with_context(|| format!("calling tool '{name}' on '{}'", self.name))
    }

    /// Debug string describing the server's advertised info.
    pub async fn peer_info(&self) -> Result<String> {
        let service = self.shared_service().await?;
        Ok(format!("{:?}", service.peer_info()))
    }
}

impl std::fmt::Debug for McpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpClient")
            .field("name", &self.name)
            .field("config", &self.config)
            .finish()
    }
}
