//! Package-manager command tools (uv, npm, npx, yarn, bun).
//!
//! One parameterized tool per program: run a subcommand with a timeout and
//! report exit code, project-file probes, stdout, and stderr. A non-zero
//! exit code is still a successful invocation; only spawn failures and
//! timeouts fail the handler.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::json;
use tokio::process::Command;

use crate::tools::{ParamSchema, Tool, ToolArgs, ToolContext, ToolSchema};

const DEFAULT_TIMEOUT_SECS: i64 = 60;

/// A tool that runs one package manager's subcommands.
pub struct PackageCommand {
    tool_name: &'static str,
    program: &'static str,
    description: &'static str,
    /// Project files worth reporting on (package.json, lock files, ...).
    probe_files: &'static [&'static str],
    /// Whether an empty command is meaningful (yarn: plain install).
    allow_empty: bool,
}

impl PackageCommand {
    pub fn uv() -> Self {
        Self {
            tool_name: "uv_command",
            program: "uv",
            description: "Run uv commands like sync, add, run (without the 'uv' prefix)",
            probe_files: &[],
            allow_empty: false,
        }
    }

    pub fn npm() -> Self {
        Self {
            tool_name: "npm_command",
            program: "npm",
            description: "Run npm commands like install, run, test (without the 'npm' prefix)",
            probe_files: &["package.json"],
            allow_empty: false,
        }
    }

    pub fn npx() -> Self {
        Self {
            tool_name: "npx_command",
            program: "npx",
            description: "Run npx commands to execute packages without installing them globally",
            probe_files: &["package.json", "node_modules"],
            allow_empty: false,
        }
    }

    pub fn yarn() -> Self {
        Self {
            tool_name: "yarn_command",
            program: "yarn",
            description: "Run yarn commands; an empty command runs a plain install",
            probe_files: &["package.json", "yarn.lock", "node_modules"],
            allow_empty: true,
        }
    }

    pub fn bun() -> Self {
        Self {
            tool_name: "bun_command",
            program: "bun",
            description: "Run bun commands for package management and script execution",
            probe_files: &["package.json", "bun.lockb", "node_modules"],
            allow_empty: false,
        }
    }
}

#[async_trait]
impl Tool for PackageCommand {
    fn name(&self) -> &str {
        self.tool_name
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(self.tool_name, self.description)
            .param(ParamSchema::required(
                "command",
                "string",
                "The subcommand and arguments, without the program name",
            ))
            .param(ParamSchema::optional(
                "directory",
                "string",
                json!(null),
                "Directory to run in (defaults to the configured base directory)",
            ))
            .param(ParamSchema::optional(
                "timeout",
                "int",
                json!(DEFAULT_TIMEOUT_SECS),
                "Timeout in seconds",
            ))
    }

    async fn execute(&self, args: ToolArgs, ctx: &ToolContext) -> Result<String> {
        let command = args.get_string("command").context("command is required")?;
        let command = command.trim();
        if command.is_empty() && !self.allow_empty {
            bail!("{}: empty command provided", self.tool_name);
        }

        let cwd = match args.get_string("directory") {
            Some(dir) => PathBuf::from(dir),
            None => ctx.config.base_dir.clone(),
        };
        if !cwd.is_dir() {
            bail!("directory does not exist: {}", cwd.display());
        }

        let timeout_secs = args
            .get_int("timeout")
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1) as u64;

        let mut cmd = Command::new(self.program);
        if !command.is_empty() {
            // Whitespace splitting only; shell quoting is out of scope.
            cmd.args(command.split_whitespace());
        }
        cmd.current_dir(&cwd);
        cmd.kill_on_drop(true);

        let run = tokio::time::timeout(Duration::from_secs(timeout_secs), cmd.output());
        let output = match run.await {
            Err(_) => bail!(
                "{} {} timed out after {} seconds",
                self.program,
                command,
                timeout_secs
            ),
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                bail!("'{}' command not found. Is it installed?", self.program)
            }
            Ok(Err(e)) => {
                return Err(e).with_context(|| format!("failed to run {}", self.program))
            }
            Ok(Ok(output)) => output,
        };

        let shown = if command.is_empty() {
            self.program.to_string()
        } else {
            format!("{} {}", self.program, command)
        };

        let mut report = Vec::new();
        report.push(format!("Command: {shown}"));
        report.push(format!("Directory: {}", cwd.display()));
        for file in self.probe_files {
            report.push(format!("{} present: {}", file, cwd.join(file).exists()));
        }
        report.push(format!(
            "Exit code: {}",
            output.status.code().unwrap_or(-1)
        ));

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            report.push(format!("\nSTDOUT:\n{}", stdout.trim()));
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            report.push(format!("\nSTDERR:\n{}", stderr.trim()));
        }

        Ok(report.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test double that runs a harmless, universally available program.
    fn echo_tool() -> PackageCommand {
        PackageCommand {
            tool_name: "echo_command",
            program: "echo",
            description: "echo for tests",
            probe_files: &["package.json"],
            allow_empty: false,
        }
    }

    fn args_for(command: &str) -> ToolArgs {
        let mut args = ToolArgs::new();
        args.named.insert("command".into(), json!(command));
        args
    }

    #[tokio::test]
    async fn reports_exit_code_and_stdout() {
        let out = echo_tool()
            .execute(args_for("hello world"), &ToolContext::default())
            .await
            .unwrap();

        assert!(out.contains("Command: echo hello world"));
        assert!(out.contains("Exit code: 0"));
        assert!(out.contains("hello world"));
        assert!(out.contains("package.json present: "));
    }

    #[tokio::test]
    async fn empty_command_is_rejected() {
        let err = echo_tool()
            .execute(args_for("   "), &ToolContext::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("empty command"));
    }

    #[tokio::test]
    async fn missing_directory_is_rejected() {
        let mut args = args_for("hello");
        args.named
            .insert("directory".into(), json!("/definitely/not/a/real/dir"));

        let err = echo_tool()
            .execute(args, &ToolContext::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("directory does not exist"));
    }

    #[tokio::test]
    async fn missing_program_is_a_handler_error() {
        let tool = PackageCommand {
            tool_name: "ghost_command",
            program: "breathsmith-no-such-program",
            description: "missing program",
            probe_files: &[],
            allow_empty: false,
        };

        let err = tool
            .execute(args_for("--version"), &ToolContext::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn slow_command_times_out() {
        let tool = PackageCommand {
            tool_name: "sleep_command",
            program: "sleep",
            description: "sleep for tests",
            probe_files: &[],
            allow_empty: false,
        };

        let mut args = args_for("5");
        args.named.insert("timeout".into(), json!(1));

        let err = tool
            .execute(args, &ToolContext::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out after 1 seconds"));
    }
}
