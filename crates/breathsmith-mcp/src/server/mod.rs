//! MCP server side: configuration, schema conversion, and the handler.

pub mod config;
pub mod handler;
pub mod schema;

pub use config::McpServerConfig;
pub use handler::BreathsmithHandler;
