//! Client-side connection configuration.

/// How to reach an MCP server.
#[derive(Debug, Clone)]
pub enum McpTransport {
    /// Spawn a child process and speak MCP over its stdio.
    Stdio {
        command: String,
        args: Vec<String>,
        env: Vec<(String, String)>,
    },
}

/// Configuration for one MCP server connection.
#[derive(Debug, Clone)]
pub struct McpConfig {
    /// Name for identification in logs and errors.
    pub name: String,
    /// Transport to reach the server.
    pub transport: McpTransport,
}

impl McpConfig {
    /// Stdio connection to a server binary.
    pub fn stdio(name: impl Into<String>, command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            transport: McpTransport::Stdio {
                command: command.into(),
                args,
                env: Vec::new(),
            },
        }
    }
}
