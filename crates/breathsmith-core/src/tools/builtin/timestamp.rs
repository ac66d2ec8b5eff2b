//! get_timestamp: Current time in a handful of formats.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use serde_json::json;

use crate::tools::{ParamSchema, Tool, ToolArgs, ToolContext, ToolSchema};

/// Timestamp tool: format the current local time.
pub struct GetTimestamp;

#[async_trait]
impl Tool for GetTimestamp {
    fn name(&self) -> &str {
        "get_timestamp"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("get_timestamp", "Get the current timestamp in various formats").param(
            ParamSchema::optional(
                "format_type",
                "string",
                json!("iso"),
                "Output format: 'iso', 'unix', or 'readable'",
            )
            .with_allowed(["iso", "unix", "readable"]),
        )
    }

    async fn execute(&self, args: ToolArgs, _ctx: &ToolContext) -> Result<String> {
        let format_type = args.get_string("format_type").unwrap_or_else(|| "iso".into());
        let now = Local::now();

        Ok(match format_type.as_str() {
            "unix" => now.timestamp().to_string(),
            "readable" => now.format("%Y-%m-%d %H:%M:%S").to_string(),
            // The closed set leaves only "iso" here.
            _ => now.to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unix_format_is_the_current_epoch_second() {
        let mut args = ToolArgs::new();
        args.named.insert("format_type".into(), json!("unix"));

        let out = GetTimestamp
            .execute(args, &ToolContext::default())
            .await
            .unwrap();

        let reported: i64 = out.parse().expect("numeric string");
        let now = chrono::Utc::now().timestamp();
        assert!((now - reported).abs() <= 2, "reported {reported}, now {now}");
    }

    #[tokio::test]
    async fn default_format_is_iso() {
        let out = GetTimestamp
            .execute(ToolArgs::new(), &ToolContext::default())
            .await
            .unwrap();
        assert!(out.contains('T'), "expected RFC 3339, got {out}");
    }

    #[tokio::test]
    async fn readable_format_has_date_and_time() {
        let mut args = ToolArgs::new();
        args.named.insert("format_type".into(), json!("readable"));

        let out = GetTimestamp
            .execute(args, &ToolContext::default())
            .await
            .unwrap();
        assert_eq!(out.len(), "2026-01-01 00:00:00".len());
        assert!(out.contains(' '));
    }
}
