//! Integration tests that spawn the server binary and drive it over stdio,
//! exercising the full host→server→registry round-trip.

use std::sync::Arc;

use anyhow::{Context, Result};
use rmcp::model::RawContent;
use serde_json::json;

use breathsmith_core::{FailureKind, InvokeOutcome};
use breathsmith_mcp::{McpClient, McpConfig};

async fn create_client() -> Result<Arc<McpClient>> {
    let client = McpClient::new(McpConfig::stdio(
        "breathsmith-self",
        env!("CARGO_BIN_EXE_breathsmith-mcp"),
        vec![],
    ));
    client.connect().await.context("failed to connect")?;
    Ok(Arc::new(client))
}

/// Call a tool and parse the outcome envelope from the text content.
async fn invoke(
    client: &McpClient,
    tool: &str,
    args: serde_json::Value,
) -> Result<(InvokeOutcome, bool)> {
    let result = client
        .call_tool(tool, args.as_object().cloned())
        .await?;

    let is_error = result.is_error.unwrap_or(false);
    let content = result.content.first().context("no content in result")?;
    let text = match &content.raw {
        RawContent::Text(text) => &text.text,
        _ => anyhow::bail!("expected text content"),
    };
    let outcome = serde_json::from_str(text).context("failed to parse outcome envelope")?;
    Ok((outcome, is_error))
}

#[tokio::test]
async fn tool_discovery_lists_the_builtin_set() {
    let client = create_client().await.expect("client creation failed");

    let tools = client.list_tools().await.expect("list_tools failed");
    let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();

    for expected in [
        "get_timestamp",
        "test_tool",
        "claude_chat",
        "openai_chat",
        "claude_vs_openai",
        "uv_command",
        "sqlite_execute",
        "read_claude_logs",
        "debug_mcp_connection",
    ] {
        assert!(names.contains(&expected), "{expected} not in {names:?}");
    }
}

#[tokio::test]
async fn advertised_schemas_carry_properties_and_required() {
    let client = create_client().await.expect("client creation failed");

    let tools = client.list_tools().await.expect("list_tools failed");
    let chat = tools
        .iter()
        .find(|t| t.name == "claude_chat")
        .expect("claude_chat not advertised");

    let props = chat.input_schema["properties"]
        .as_object()
        .expect("no properties");
    assert!(props.contains_key("prompt"));
    assert!(props.contains_key("max_tokens"));
    assert_eq!(chat.input_schema["required"], json!(["prompt"]));
}

#[tokio::test]
async fn echo_round_trip() {
    let client = create_client().await.expect("client creation failed");

    let (outcome, is_error) = invoke(&client, "test_tool", json!({"message": "ping"}))
        .await
        .expect("invoke failed");

    assert!(!is_error);
    assert!(outcome.ok());
    assert!(outcome.output().unwrap().starts_with("Echo: ping at "));
}

#[tokio::test]
async fn timestamp_formats() {
    let client = create_client().await.expect("client creation failed");

    let (outcome, _) = invoke(&client, "get_timestamp", json!({"format_type": "unix"}))
        .await
        .expect("invoke failed");
    assert!(outcome.ok());
    outcome
        .output()
        .unwrap()
        .parse::<i64>()
        .expect("unix timestamp should be numeric");

    // Default format is ISO-8601.
    let (outcome, _) = invoke(&client, "get_timestamp", json!({}))
        .await
        .expect("invoke failed");
    assert!(outcome.ok());
    assert!(outcome.output().unwrap().contains('T'));
}

#[tokio::test]
async fn unknown_tool_is_a_failure_envelope() {
    let client = create_client().await.expect("client creation failed");

    let (outcome, is_error) = invoke(&client, "no_such_tool", json!({}))
        .await
        .expect("invoke failed");

    assert!(is_error);
    assert_eq!(outcome.failure_kind(), Some(FailureKind::ToolNotFound));
    let msg = outcome.failure_message().unwrap();
    assert!(msg.contains("no_such_tool"));
    assert!(msg.contains("get_timestamp"), "should list known tools");
}

#[tokio::test]
async fn missing_required_argument_is_rejected() {
    let client = create_client().await.expect("client creation failed");

    let (outcome, is_error) = invoke(&client, "sqlite_execute", json!({}))
        .await
        .expect("invoke failed");

    assert!(is_error);
    assert_eq!(outcome.failure_kind(), Some(FailureKind::MissingArgument));
    assert!(outcome.failure_message().unwrap().contains("query"));
}

#[tokio::test]
async fn closed_set_values_are_enforced() {
    let client = create_client().await.expect("client creation failed");

    let (outcome, is_error) = invoke(&client, "get_timestamp", json!({"format_type": "hex"}))
        .await
        .expect("invoke failed");

    assert!(is_error);
    assert_eq!(outcome.failure_kind(), Some(FailureKind::ArgumentType));
}

#[tokio::test]
async fn handler_failures_do_not_break_the_connection() {
    let client = create_client().await.expect("client creation failed");

    // Nonexistent database file: the handler fails, the connection survives.
    let (outcome, is_error) = invoke(
        &client,
        "sqlite_execute",
        json!({"database": "/definitely/not/here.db", "query": "SELECT 1"}),
    )
    .await
    .expect("invoke failed");
    assert!(is_error);
    assert_eq!(outcome.failure_kind(), Some(FailureKind::HandlerExecution));

    // Same connection still serves calls.
    let (outcome, _) = invoke(&client, "test_tool", json!({}))
        .await
        .expect("invoke failed");
    assert!(outcome.ok());
}

#[tokio::test]
async fn debug_tool_reports_server_state() {
    let client = create_client().await.expect("client creation failed");

    let (outcome, _) = invoke(&client, "debug_mcp_connection", json!({}))
        .await
        .expect("invoke failed");

    assert!(outcome.ok());
    let output = outcome.output().unwrap();
    assert!(output.contains("Server version:"));
    assert!(output.contains("Process ID:"));
}

#[tokio::test]
async fn multiple_calls_on_one_connection() {
    let client = create_client().await.expect("client creation failed");

    for i in 1..=5 {
        let (outcome, _) = invoke(&client, "test_tool", json!({"message": i.to_string()}))
            .await
            .expect("invoke failed");
        assert!(outcome.ok());
        assert!(outcome.output().unwrap().contains(&i.to_string()));
    }

    client.disconnect().await.expect("disconnect failed");
    assert!(!client.is_connected().await);
}

#[tokio::test]
async fn peer_info_mentions_the_server() {
    let client = create_client().await.expect("client creation failed");

    let info = client.peer_info().await.expect("peer_info failed");
    assert!(info.contains("breathsmith"), "peer info was: {info}");
}
