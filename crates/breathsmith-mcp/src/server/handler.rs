//! MCP server handler.
//!
//! Implements `rmcp::ServerHandler` over the tool registry: the tool list is
//! whatever the registry holds, and every call goes through the registry's
//! invocation adapter. The host always receives the serialized outcome
//! envelope; failed invocations are flagged with `is_error` but never tear
//! down the connection.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool as McpTool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::ErrorData as McpError;

use breathsmith_core::{register_builtins, Config, ToolContext, ToolRegistry};

use super::config::McpServerConfig;
use super::schema;

const DEFAULT_INSTRUCTIONS: &str = "breathsmith: developer utility tools over MCP.\n\n\
    Tool groups:\n\
    • Chat: openai_chat, openai_web_search, openai_with_tools, claude_chat, \
    claude_opus_4, claude_vs_openai\n\
    • Packages: uv_command, npm_command, npx_command, yarn_command, bun_command\n\
    • SQLite: sqlite_execute, sqlite_info\n\
    • Logs: read_claude_logs, list_claude_logs\n\
    • Misc: get_timestamp, test_tool, debug_mcp_connection\n\n\
    Every call returns a JSON envelope: {\"status\": \"success\", \"output\": ...} \
    or {\"status\": \"failure\", \"kind\": ..., \"message\": ...}.";

/// The breathsmith MCP server handler.
#[derive(Clone)]
pub struct BreathsmithHandler {
    config: McpServerConfig,
    registry: Arc<ToolRegistry>,
    ctx: Arc<ToolContext>,
}

impl BreathsmithHandler {
    /// Create a handler with the builtin tool set and environment config.
    ///
    /// Registration failures are fatal: a duplicate tool name is a
    /// programming error and the server must not start half-populated.
    pub fn new(config: McpServerConfig) -> anyhow::Result<Self> {
        Self::with_core_config(config, Config::from_env())
    }

    /// Create a handler with an explicit tool configuration.
    pub fn with_core_config(config: McpServerConfig, core: Config) -> anyhow::Result<Self> {
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry)?;
        tracing::info!(tools = registry.len(), "tool registry populated");

        Ok(Self {
            config,
            registry: Arc::new(registry),
            ctx: Arc::new(ToolContext::new(core)),
        })
    }

    /// The configured server name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    fn instructions(&self) -> String {
        self.config
            .instructions
            .clone()
            .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string())
    }

    /// The advertised tool list, one entry per registry schema.
    fn tool_listing(&self) -> Vec<McpTool> {
        self.registry
            .schemas()
            .into_iter()
            .map(|s| {
                let input_schema = Arc::new(schema::input_schema(&s));
                McpTool::new(s.name, s.description, input_schema)
            })
            .collect()
    }

    /// Run one invocation and wrap the outcome for the host.
    async fn dispatch(&self, request: CallToolRequestParam) -> Result<CallToolResult, McpError> {
        let raw_args = request.arguments.unwrap_or_default();
        let outcome = self
            .registry
            .invoke(&request.name, &raw_args, &self.ctx)
            .await;

        let envelope = serde_json::to_string_pretty(&outcome)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        if outcome.ok() {
            Ok(CallToolResult::success(vec![Content::text(envelope)]))
        } else {
            Ok(CallToolResult {
                content: vec![Content::text(envelope)],
                is_error: Some(true),
                structured_content: None,
                meta: None,
            })
        }
    }
}

impl rmcp::ServerHandler for BreathsmithHandler {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(self.instructions()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_listing(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breathsmith_core::{FailureKind, InvokeOutcome};
    use rmcp::model::RawContent;
    use serde_json::json;

    fn handler() -> BreathsmithHandler {
        BreathsmithHandler::with_core_config(McpServerConfig::default(), Config::default())
            .expect("handler creation failed")
    }

    fn request(name: &str, args: serde_json::Value) -> CallToolRequestParam {
        CallToolRequestParam {
            name: name.to_string().into(),
            arguments: args.as_object().cloned(),
        }
    }

    fn outcome_of(result: &CallToolResult) -> InvokeOutcome {
        let content = result.content.first().expect("no content");
        let RawContent::Text(text) = &content.raw else {
            panic!("expected text content");
        };
        serde_json::from_str(&text.text).expect("not an outcome envelope")
    }

    #[test]
    fn get_info_advertises_tools_and_instructions() {
        use rmcp::ServerHandler;

        let info = handler().get_info();
        let instructions = info.instructions.expect("instructions missing");
        assert!(instructions.contains("get_timestamp"));
        assert!(instructions.contains("sqlite_execute"));
    }

    #[test]
    fn handler_carries_the_configured_name() {
        assert_eq!(handler().name(), "breathsmith");

        let config = McpServerConfig {
            name: "my-breathsmith".into(),
            ..McpServerConfig::default()
        };
        let handler = BreathsmithHandler::with_core_config(config, Config::default()).unwrap();
        assert_eq!(handler.name(), "my-breathsmith");
    }

    #[test]
    fn custom_instructions_override_the_default() {
        let config = McpServerConfig {
            instructions: Some("Do breathing exercises.".into()),
            ..McpServerConfig::default()
        };
        let handler = BreathsmithHandler::with_core_config(config, Config::default()).unwrap();
        assert_eq!(handler.instructions(), "Do breathing exercises.");
    }

    #[test]
    fn tool_listing_covers_the_registry() {
        let tools = handler().tool_listing();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"get_timestamp"));
        assert!(names.contains(&"claude_vs_openai"));
        assert!(names.contains(&"debug_mcp_connection"));

        let echo = tools.iter().find(|t| t.name == "test_tool").unwrap();
        let props = echo.input_schema["properties"].as_object().unwrap();
        assert!(props.contains_key("message"));
    }

    #[tokio::test]
    async fn successful_call_returns_a_success_envelope() {
        let result = handler()
            .dispatch(request("test_tool", json!({"message": "ping"})))
            .await
            .expect("dispatch failed");

        assert!(!result.is_error.unwrap_or(false));
        let outcome = outcome_of(&result);
        assert!(outcome.ok());
        assert!(outcome.output().unwrap().starts_with("Echo: ping at "));
    }

    #[tokio::test]
    async fn unknown_tool_is_flagged_but_not_fatal() {
        let result = handler()
            .dispatch(request("no_such_tool", json!({})))
            .await
            .expect("dispatch failed");

        assert_eq!(result.is_error, Some(true));
        let outcome = outcome_of(&result);
        assert_eq!(outcome.failure_kind(), Some(FailureKind::ToolNotFound));
        assert!(outcome.failure_message().unwrap().contains("no_such_tool"));
    }

    #[tokio::test]
    async fn argument_errors_are_flagged_but_not_fatal() {
        let result = handler()
            .dispatch(request("get_timestamp", json!({"format_type": "hex"})))
            .await
            .expect("dispatch failed");

        assert_eq!(result.is_error, Some(true));
        let outcome = outcome_of(&result);
        assert_eq!(outcome.failure_kind(), Some(FailureKind::ArgumentType));
    }

    #[tokio::test]
    async fn missing_arguments_object_is_an_empty_mapping() {
        let request = CallToolRequestParam {
            name: "get_timestamp".to_string().into(),
            arguments: None,
        };
        let result = handler().dispatch(request).await.expect("dispatch failed");
        let outcome = outcome_of(&result);
        assert!(outcome.ok());
    }
}
