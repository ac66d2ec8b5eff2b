//! Log inspection tools for the configured log directory.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde_json::json;

use crate::tools::{ParamSchema, Tool, ToolArgs, ToolContext, ToolSchema};

const MCP_LOG: &str = "mcp.log";
const SERVER_LOG: &str = "mcp-server-breathsmith.log";

fn require_log_dir(ctx: &ToolContext) -> Result<&Path> {
    let dir = ctx.config.log_dir.as_path();
    if !dir.is_dir() {
        bail!(
            "log directory not found: {} (set BREATHSMITH_LOG_DIR to override)",
            dir.display()
        );
    }
    Ok(dir)
}

/// All `mcp*.log` files in the directory, sorted by name.
fn mcp_log_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("reading log directory: {}", dir.display()))?
    {
        let entry = entry.context("reading log directory entry")?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with("mcp") && name.ends_with(".log") {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

fn tail(path: &Path, lines: usize) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading log file: {}", path.display()))?;
    let all: Vec<&str> = content.lines().collect();
    let start = all.len().saturating_sub(lines);
    Ok(all[start..].join("\n"))
}

/// read_claude_logs: tail the MCP host and server logs.
pub struct ReadClaudeLogs;

#[async_trait]
impl Tool for ReadClaudeLogs {
    fn name(&self) -> &str {
        "read_claude_logs"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "read_claude_logs",
            "Read recent lines from the MCP host logs",
        )
        .param(
            ParamSchema::optional(
                "log_type",
                "string",
                json!("mcp"),
                "Which logs to read: the host log, this server's log, or all MCP logs",
            )
            .with_allowed(["mcp", "breathsmith", "all"]),
        )
        .param(ParamSchema::optional(
            "lines",
            "int",
            json!(20),
            "Number of lines to read from the end of each file",
        ))
    }

    async fn execute(&self, args: ToolArgs, ctx: &ToolContext) -> Result<String> {
        let log_type = args.get_string("log_type").unwrap_or_else(|| "mcp".into());
        let lines = args.get_int("lines").unwrap_or(20).max(1) as usize;

        let dir = require_log_dir(ctx)?;
        let files: Vec<PathBuf> = match log_type.as_str() {
            "breathsmith" => vec![dir.join(SERVER_LOG)],
            "all" => mcp_log_files(dir)?,
            _ => vec![dir.join(MCP_LOG)],
        };

        let mut sections = Vec::new();
        for path in &files {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            if !path.is_file() {
                sections.push(format!("=== {name} ===\n(file not found)"));
                continue;
            }
            let body = tail(path, lines)?;
            if body.is_empty() {
                sections.push(format!("=== {name} ===\n(empty)"));
            } else {
                sections.push(format!("=== {name} ===\n{body}"));
            }
        }

        if sections.is_empty() {
            return Ok(format!("No MCP log files found in {}", dir.display()));
        }
        Ok(sections.join("\n\n"))
    }
}

/// list_claude_logs: every `.log` file with size and modification time.
pub struct ListClaudeLogs;

#[async_trait]
impl Tool for ListClaudeLogs {
    fn name(&self) -> &str {
        "list_claude_logs"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "list_claude_logs",
            "List the log files in the MCP host log directory",
        )
    }

    async fn execute(&self, _args: ToolArgs, ctx: &ToolContext) -> Result<String> {
        let dir = require_log_dir(ctx)?;

        let mut logs = Vec::new();
        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("reading log directory: {}", dir.display()))?
        {
            let entry = entry.context("reading log directory entry")?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.ends_with(".log") {
                continue;
            }
            let meta = entry
                .metadata()
                .with_context(|| format!("reading metadata for {name}"))?;
            let size_mb = meta.len() as f64 / (1024.0 * 1024.0);
            let modified = meta
                .modified()
                .map(|t| {
                    DateTime::<Local>::from(t)
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string()
                })
                .unwrap_or_else(|_| "unknown".to_string());
            logs.push((name, size_mb, modified));
        }
        logs.sort_by(|a, b| a.0.cmp(&b.0));

        if logs.is_empty() {
            return Ok(format!("No log files found in {}", dir.display()));
        }

        let mut lines = vec![format!("Log files in {}:", dir.display()), String::new()];
        for (name, size_mb, modified) in logs {
            lines.push(format!("{name}  ({size_mb:.2} MB, modified {modified})"));
        }
        Ok(lines.join("\n"))
    }
}
