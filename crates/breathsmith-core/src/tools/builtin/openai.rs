//! OpenAI chat tools.
//!
//! `openai_chat` talks to the Responses API and falls back to Chat
//! Completions when that fails; the web-search and built-in-tools variants
//! require the Responses API. All three fail at call time with a clear
//! message when `OPENAI_API_KEY` is absent.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::tools::{ParamSchema, Tool, ToolArgs, ToolContext, ToolSchema};

pub(crate) const DEFAULT_MODEL: &str = "gpt-4.1-mini";

fn api_key(ctx: &ToolContext) -> Result<String> {
    ctx.config
        .openai_api_key
        .clone()
        .ok_or_else(|| anyhow!("OPENAI_API_KEY is not set; OpenAI tools are disabled"))
}

/// POST to the Responses API and extract the last message text.
async fn responses_request(
    ctx: &ToolContext,
    key: &str,
    model: &str,
    input: &str,
    builtin_tools: &[&str],
    max_tokens: i64,
) -> Result<String> {
    let mut body = json!({
        "model": model,
        "input": input,
        "max_output_tokens": max_tokens,
    });
    if !builtin_tools.is_empty() {
        body["tools"] = Value::Array(builtin_tools.iter().map(|t| json!({ "type": t })).collect());
    }

    let resp = ctx
        .http
        .post(format!("{}/responses", ctx.config.openai_base_url))
        .bearer_auth(key)
        .json(&body)
        .send()
        .await
        .context("sending request to the Responses API")?;

    let status = resp.status();
    if !status.is_success() {
        let detail = resp.text().await.unwrap_or_default();
        bail!("Responses API returned {status}: {detail}");
    }

    let payload: Value = resp.json().await.context("decoding Responses API reply")?;
    extract_responses_text(&payload)
        .ok_or_else(|| anyhow!("no response received from the Responses API"))
}

/// Find the text of the last message in a Responses API `output` array.
fn extract_responses_text(payload: &Value) -> Option<String> {
    for item in payload.get("output")?.as_array()?.iter().rev() {
        if let Some(content) = item.get("content").and_then(Value::as_array) {
            for part in content {
                if let Some(text) = part.get("text").and_then(Value::as_str) {
                    return Some(text.to_string());
                }
            }
        }
    }
    None
}

/// POST to the Chat Completions API (the fallback path).
async fn chat_completions_request(
    ctx: &ToolContext,
    key: &str,
    model: &str,
    prompt: &str,
    max_tokens: i64,
) -> Result<String> {
    let body = json!({
        "model": model,
        "messages": [{ "role": "user", "content": prompt }],
        "max_tokens": max_tokens,
    });

    let resp = ctx
        .http
        .post(format!("{}/chat/completions", ctx.config.openai_base_url))
        .bearer_auth(key)
        .json(&body)
        .send()
        .await
        .context("sending request to the Chat Completions API")?;

    let status = resp.status();
    if !status.is_success() {
        let detail = resp.text().await.unwrap_or_default();
        bail!("Chat Completions API returned {status}: {detail}");
    }

    let payload: Value = resp
        .json()
        .await
        .context("decoding Chat Completions reply")?;
    payload
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| anyhow!("no response received from the Chat Completions API"))
}

/// Send a prompt, preferring the Responses API.
pub(crate) async fn send_chat(
    ctx: &ToolContext,
    prompt: &str,
    model: &str,
    max_tokens: i64,
) -> Result<String> {
    let key = api_key(ctx)?;
    match responses_request(ctx, &key, model, prompt, &[], max_tokens).await {
        Ok(text) => Ok(text),
        Err(err) => {
            tracing::debug!(
                error = %format!("{err:#}"),
                "Responses API failed, falling back to Chat Completions"
            );
            chat_completions_request(ctx, &key, model, prompt, max_tokens).await
        }
    }
}

/// openai_chat: send a prompt to OpenAI.
pub struct OpenAiChat;

#[async_trait]
impl Tool for OpenAiChat {
    fn name(&self) -> &str {
        "openai_chat"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("openai_chat", "Send a prompt to OpenAI and get a response")
            .param(ParamSchema::required(
                "prompt",
                "string",
                "The message/question to send to OpenAI",
            ))
            .param(ParamSchema::optional(
                "model",
                "string",
                json!(DEFAULT_MODEL),
                "The OpenAI model to use",
            ))
            .param(ParamSchema::optional(
                "max_tokens",
                "int",
                json!(500),
                "Maximum tokens in the response",
            ))
    }

    async fn execute(&self, args: ToolArgs, ctx: &ToolContext) -> Result<String> {
        let prompt = args.get_string("prompt").context("prompt is required")?;
        let model = args
            .get_string("model")
            .unwrap_or_else(|| DEFAULT_MODEL.into());
        let max_tokens = args.get_int("max_tokens").unwrap_or(500);

        send_chat(ctx, &prompt, &model, max_tokens).await
    }
}

/// openai_web_search: ask OpenAI to search the web and answer with sources.
pub struct OpenAiWebSearch;

#[async_trait]
impl Tool for OpenAiWebSearch {
    fn name(&self) -> &str {
        "openai_web_search"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "openai_web_search",
            "Ask OpenAI to search the web and answer with sources",
        )
        .param(ParamSchema::required(
            "query",
            "string",
            "The search query or question",
        ))
        .param(ParamSchema::optional(
            "model",
            "string",
            json!(DEFAULT_MODEL),
            "The OpenAI model to use",
        ))
        .param(ParamSchema::optional(
            "max_tokens",
            "int",
            json!(1000),
            "Maximum tokens in the response",
        ))
    }

    async fn execute(&self, args: ToolArgs, ctx: &ToolContext) -> Result<String> {
        let query = args.get_string("query").context("query is required")?;
        let model = args
            .get_string("model")
            .unwrap_or_else(|| DEFAULT_MODEL.into());
        let max_tokens = args.get_int("max_tokens").unwrap_or(1000);

        let key = api_key(ctx)?;
        // No Chat Completions fallback: web search needs the Responses API.
        responses_request(ctx, &key, &model, &query, &["web_search"], max_tokens)
            .await
            .context("web search requires the Responses API")
    }
}

/// openai_with_tools: prompt with optional built-in tools enabled.
pub struct OpenAiWithTools;

#[async_trait]
impl Tool for OpenAiWithTools {
    fn name(&self) -> &str {
        "openai_with_tools"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "openai_with_tools",
            "Send a prompt to OpenAI with optional built-in tools enabled",
        )
        .param(ParamSchema::required(
            "prompt",
            "string",
            "The message/question to send to OpenAI",
        ))
        .param(ParamSchema::optional(
            "enable_web_search",
            "bool",
            json!(false),
            "Enable real-time web search",
        ))
        .param(ParamSchema::optional(
            "enable_file_search",
            "bool",
            json!(false),
            "Enable file search over uploaded documents",
        ))
        .param(ParamSchema::optional(
            "model",
            "string",
            json!(DEFAULT_MODEL),
            "The OpenAI model to use",
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

        let mut tools = Vec::new();
        if args.get_bool("enable_web_search").unwrap_or(false) {
            tools.push("web_search");
        }
        if args.get_bool("enable_file_search").unwrap_or(false) {
            tools.push("file_search");
        }

        let key = api_key(ctx)?;
        responses_request(ctx, &key, &model, &prompt, &tools, max_tokens).await
    }
}
