//! Builtin tool handlers.
//!
//! Each tool is an independent, stateless request/response adapter over its
//! external collaborator: a chat API, a package manager subprocess, a SQLite
//! file, or the log directory.

mod claude;
mod compare;
mod debug;
mod echo;
mod logs;
mod openai;
mod pkg;
mod sqlite;
mod timestamp;

use crate::error::RegistrationError;

use super::registry::ToolRegistry;

/// Register the full builtin tool set.
///
/// Called exactly once at startup. A duplicate name is a programming error
/// and aborts startup.
pub fn register_builtins(registry: &mut ToolRegistry) -> Result<(), RegistrationError> {
    registry.register(timestamp::GetTimestamp)?;
    registry.register(echo::TestTool)?;

    registry.register(openai::OpenAiChat)?;
    registry.register(openai::OpenAiWebSearch)?;
    registry.register(openai::OpenAiWithTools)?;
    registry.register(claude::ClaudeChat)?;
    registry.register(claude::ClaudeOpus4)?;
    registry.register(compare::ClaudeVsOpenAi)?;

    registry.register(pkg::PackageCommand::uv())?;
    registry.register(pkg::PackageCommand::npm())?;
    registry.register(pkg::PackageCommand::npx())?;
    registry.register(pkg::PackageCommand::yarn())?;
    registry.register(pkg::PackageCommand::bun())?;

    registry.register(sqlite::SqliteExecute)?;
    registry.register(sqlite::SqliteInfo)?;

    registry.register(logs::ReadClaudeLogs)?;
    registry.register(logs::ListClaudeLogs)?;
    registry.register(debug::DebugMcpConnection)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_register_without_collisions() {
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry).expect("builtin registration failed");

        let names = registry.names();
        for expected in [
            "get_timestamp",
            "test_tool",
            "openai_chat",
            "openai_web_search",
            "openai_with_tools",
            "claude_chat",
            "claude_opus_4",
            "claude_vs_openai",
            "uv_command",
            "npm_command",
            "npx_command",
            "yarn_command",
            "bun_command",
            "sqlite_execute",
            "sqlite_info",
            "read_claude_logs",
            "list_claude_logs",
            "debug_mcp_connection",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
    }

    #[test]
    fn registering_builtins_twice_is_a_duplicate() {
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry).unwrap();
        let err = register_builtins(&mut registry).unwrap_err();
        assert_eq!(err.name, "get_timestamp");
    }

    #[test]
    fn every_schema_name_matches_its_registry_key() {
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry).unwrap();
        for schema in registry.schemas() {
            let tool = registry.get(&schema.name).expect("registered");
            assert_eq!(tool.name(), schema.name);
        }
    }
}
