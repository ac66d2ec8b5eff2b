//! breathsmith-core: the tool contract layer of breathsmith.
//!
//! This crate provides:
//!
//! - **Tools**: The `Tool` trait, declared schemas, and the builtin tool set
//! - **Registry**: Write-once tool registry and the invocation adapter
//! - **Validation**: Argument checking and coercion against declared schemas
//! - **Outcome**: The success/failure result shape returned to the host
//! - **Config**: Process-wide configuration read once from the environment
//!
//! The host protocol boundary (MCP) lives in `breathsmith-mcp`; this crate
//! knows nothing about the wire format beyond JSON argument mappings.

pub mod config;
pub mod error;
pub mod outcome;
pub mod tools;

pub use config::Config;
pub use error::{InvokeError, RegistrationError};
pub use outcome::{FailureKind, InvokeOutcome};
pub use tools::{
    register_builtins, validate_against_schema, ParamSchema, Tool, ToolArgs, ToolContext,
    ToolRegistry, ToolSchema,
};
