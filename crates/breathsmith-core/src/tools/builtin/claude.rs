//! Claude (Anthropic) chat tools.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::tools::{ParamSchema, Tool, ToolArgs, ToolContext, ToolSchema};

pub(crate) const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const OPUS_MODEL: &str = "claude-opus-4-20250514";
const API_VERSION: &str = "2023-06-01";

/// Send a prompt through the Anthropic Messages API.
pub(crate) async fn send_chat(
    ctx: &ToolContext,
    prompt: &str,
    model: &str,
    max_tokens: i64,
) -> Result<String> {
    let key = ctx
        .config
        .anthropic_api_key
        .as_deref()
        .ok_or_else(|| anyhow!("ANTHROPIC_API_KEY is not set; Claude tools are disabled"))?;

    let body = json!({
        "model": model,
        "max_tokens": max_tokens,
        "messages": [{ "role": "user", "content": prompt }],
    });

    let resp = ctx
        .http
        .post(format!("{}/v1/messages", ctx.config.anthropic_base_url))
        .header("x-api-key", key)
        .header("anthropic-version", API_VERSION)
        .json(&body)
        .send()
        .await
        .context("sending request to the Anthropic Messages API")?;

    let status = resp.status();
    if !status.is_success() {
        let detail = resp.text().await.unwrap_or_default();
        bail!("Anthropic Messages API returned {status}: {detail}");
    }

    let payload: Value = resp.json().await.context("decoding Messages API reply")?;
    extract_message_text(&payload).ok_or_else(|| anyhow!("no response received from Claude"))
}

/// First text block in a Messages API `content` array.
fn extract_message_text(payload: &Value) -> Option<String> {
    payload
        .get("content")?
        .as_array()?
        .iter()
        .find_map(|block| block.get("text").and_then(Value::as_str))
        .map(str::to_string)
}

/// claude_chat: send a prompt to Claude.
pub struct ClaudeChat;

#[async_trait]
impl Tool for ClaudeChat {
    fn name(&self) -> &str {
        "claude_chat"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("claude_chat", "Send a prompt to Claude and get a response")
            .param(ParamSchema::required(
                "prompt",
                "string",
                "The message/question to send to Claude",
            ))
            .param(ParamSchema::optional(
                "model",
                "string",
                json!(DEFAULT_MODEL),
                "The Claude model to use",
            ))
            .param(ParamSchema::optional(
                "max_tokens",
                "int",
                json!(1000),
                "Maximum tokens in the response",
            ))
    }

    async fn execute(&self, args: ToolArgs, ctx: &ToolContext) -> Result<String> {
        let prompt = args.get_string("prompt").context("prompt is required")?;
        let model = args
            .get_string("model")
            .unwrap_or_else(|| DEFAULT_MODEL.into());
        let max_tokens = args.get_int("max_tokens").unwrap_or(1000);

        send_chat(ctx, &prompt, &model, max_tokens).await
    }
}

/// claude_opus_4: claude_chat pinned to the most capable model.
pub struct ClaudeOpus4;

#[async_trait]
impl Tool for ClaudeOpus4 {
    fn name(&self) -> &str {
        "claude_opus_4"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "claude_opus_4",
            "Send a prompt to Claude Opus 4, the most capable Claude model",
        )
        .param(ParamSchema::required(
            "prompt",
            "string",
            "The message/question to send to Claude Opus 4",
        ))
        .param(ParamSchema::optional(
            "max_tokens",
            "int",
            json!(2000),
            "Maximum tokens in the response",
        ))
    }

    async fn execute(&self, args: ToolArgs, ctx: &ToolContext) -> Result<String> {
        let prompt = args.get_string("prompt").context("prompt is required")?;
        let max_tokens = args.get_int("max_tokens").unwrap_or(2000);

        send_chat(ctx, &prompt, OPUS_MODEL, max_tokens).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_the_first_text_block() {
        let payload = json!({
            "content": [
                { "type": "text", "text": "hello from claude" },
                { "type": "text", "text": "second block" }
            ]
        });
        assert_eq!(
            extract_message_text(&payload).as_deref(),
            Some("hello from claude")
        );
    }

    #[test]
    fn empty_content_yields_no_text() {
        assert_eq!(extract_message_text(&json!({ "content": [] })), None);
    }

    #[tokio::test]
    async fn missing_key_names_the_env_var() {
        let mut args = ToolArgs::new();
        args.named.insert("prompt".into(), json!("hi"));

        let err = ClaudeChat
            .execute(args, &ToolContext::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }
}
