//! claude_vs_openai: the same prompt through both providers, side by side.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::json;

use crate::tools::{ParamSchema, Tool, ToolArgs, ToolContext, ToolSchema};

use super::{claude, openai};

const COMPARE_MAX_TOKENS: i64 = 800;

/// Comparison tool: one prompt, both providers, one report.
pub struct ClaudeVsOpenAi;

#[async_trait]
impl Tool for ClaudeVsOpenAi {
    fn name(&self) -> &str {
        "claude_vs_openai"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "claude_vs_openai",
            "Compare responses from Claude and OpenAI for the same prompt",
        )
        .param(ParamSchema::required(
            "prompt",
            "string",
            "The question/prompt to send to both models",
        ))
        .param(ParamSchema::optional(
            "claude_model",
            "string",
            json!(claude::DEFAULT_MODEL),
            "Claude model to use",
        ))
        .param(ParamSchema::optional(
            "openai_model",
            "string",
            json!(openai::DEFAULT_MODEL),
            "OpenAI model to use",
        ))
    }

    async fn execute(&self, args: ToolArgs, ctx: &ToolContext) -> Result<String> {
        let prompt = args.get_string("prompt").context("prompt is required")?;
        let claude_model = args
            .get_string("claude_model")
            .unwrap_or_else(|| claude::DEFAULT_MODEL.into());
        let openai_model = args
            .get_string("openai_model")
            .unwrap_or_else(|| openai::DEFAULT_MODEL.into());

        // One provider failing still yields a useful comparison; embed the
        // error in its slot instead of failing the whole call.
        let claude_response = claude::send_chat(ctx, &prompt, &claude_model, COMPARE_MAX_TOKENS)
            .await
            .unwrap_or_else(|e| format!("Error: {e:#}"));
        let openai_response = openai::send_chat(ctx, &prompt, &openai_model, COMPARE_MAX_TOKENS)
            .await
            .unwrap_or_else(|e| format!("Error: {e:#}"));

        Ok(format!(
            "**Claude ({claude_model}):**\n{claude_response}\n\n**OpenAI ({openai_model}):**\n{openai_response}"
        ))
    }
}
