//! debug_mcp_connection: server-side state for troubleshooting the host link.

use anyhow::Result;
use async_trait::async_trait;

use crate::tools::{Tool, ToolArgs, ToolContext, ToolSchema};

pub struct DebugMcpConnection;

#[async_trait]
impl Tool for DebugMcpConnection {
    fn name(&self) -> &str {
        "debug_mcp_connection"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "debug_mcp_connection",
            "Report server-side state for debugging the MCP connection",
        )
    }

    async fn execute(&self, _args: ToolArgs, ctx: &ToolContext) -> Result<String> {
        let cwd = std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let lines = vec![
            "MCP connection debug info:".to_string(),
            format!("Server version: {}", env!("CARGO_PKG_VERSION")),
            format!("Process ID: {}", std::process::id()),
            format!("Working directory: {cwd}"),
            format!(
                "Base directory: {} (exists: {})",
                ctx.config.base_dir.display(),
                ctx.config.base_dir.is_dir()
            ),
            format!(
                "Log directory: {} (exists: {})",
                ctx.config.log_dir.display(),
                ctx.config.log_dir.is_dir()
            ),
            format!(
                "OPENAI_API_KEY configured: {}",
                ctx.config.openai_api_key.is_some()
            ),
            format!(
                "ANTHROPIC_API_KEY configured: {}",
                ctx.config.anthropic_api_key.is_some()
            ),
        ];

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_version_pid_and_key_presence() {
        let out = DebugMcpConnection
            .execute(ToolArgs::new(), &ToolContext::default())
            .await
            .unwrap();

        assert!(out.contains(env!("CARGO_PKG_VERSION")));
        assert!(out.contains(&format!("Process ID: {}", std::process::id())));
        assert!(out.contains("OPENAI_API_KEY configured: false"));
        assert!(out.contains("ANTHROPIC_API_KEY configured: false"));
    }
}
