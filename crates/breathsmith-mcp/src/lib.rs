//! MCP plumbing for breathsmith.
//!
//! The `server` module exposes the tool registry to MCP hosts over stdio;
//! the `client` module is a thin stdio client used by the integration tests
//! and for driving a breathsmith server from another process.

pub mod client;
pub mod config;
pub mod server;

pub use client::McpClient;
pub use config::{McpConfig, McpTransport};
pub use server::{BreathsmithHandler, McpServerConfig};
