//! test_tool: Liveness check that echoes a message back.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use serde_json::json;

use crate::tools::{ParamSchema, Tool, ToolArgs, ToolContext, ToolSchema};

/// Echo tool: verify the server round-trip works.
pub struct TestTool;

#[async_trait]
impl Tool for TestTool {
    fn name(&self) -> &str {
        "test_tool"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("test_tool", "A simple test tool to verify the server is working").param(
            ParamSchema::optional("message", "string", json!("Hello"), "A message to echo back"),
        )
    }

    async fn execute(&self, args: ToolArgs, _ctx: &ToolContext) -> Result<String> {
        let message = args.get_string("message").unwrap_or_else(|| "Hello".into());
        Ok(format!(
            "Echo: {} at {}",
            message,
            Local::now().format("%H:%M:%S")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_the_message() {
        let mut args = ToolArgs::new();
        args.named.insert("message".into(), json!("hello"));

        let out = TestTool.execute(args, &ToolContext::default()).await.unwrap();
        assert!(out.starts_with("Echo: hello at "));
    }

    #[tokio::test]
    async fn default_message_is_hello() {
        let out = TestTool
            .execute(ToolArgs::new(), &ToolContext::default())
            .await
            .unwrap();
        assert!(out.starts_with("Echo: Hello at "));
    }
}
