//! Tool registry and the invocation adapter.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{InvokeError, RegistrationError};
use crate::outcome::{FailureKind, InvokeOutcome};

use super::context::ToolContext;
use super::traits::{Tool, ToolSchema};
use super::validate::validate_against_schema;

/// Process-wide mapping from tool name to handler.
///
/// Populated once at startup, then shared read-only (`Arc<ToolRegistry>`).
/// There is no deletion or hot-reload.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its declared name.
    ///
    /// Duplicate names fail here, at startup, not at call time.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Result<(), RegistrationError> {
        self.register_arc(Arc::new(tool))
    }

    /// Register an already-shared tool.
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) -> Result<(), RegistrationError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(RegistrationError { name });
        }
        tracing::debug!(tool = %name, "registered tool");
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Registered tool names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Schemas of all registered tools, sorted by name.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self.tools.values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// True if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// The invocation adapter: one request in, one outcome out.
    ///
    /// Looks up the tool, validates and coerces the argument mapping against
    /// its schema, runs the handler, and wraps the result. Handler failures
    /// are captured and reported as failure outcomes; they never propagate
    /// as process-level faults.
    pub async fn invoke(
        &self,
        name: &str,
        raw_args: &Map<String, Value>,
        ctx: &ToolContext,
    ) -> InvokeOutcome {
        let Some(tool) = self.tools.get(name) else {
            let err = InvokeError::ToolNotFound {
                name: name.to_string(),
                known: self.names().join(", "),
            };
            tracing::warn!(tool = name, "invocation of unknown tool");
            return err.into();
        };

        let schema = tool.schema();
        let args = match validate_against_schema(&schema, raw_args) {
            Ok(args) => args,
            Err(err) => {
                tracing::warn!(tool = name, error = %err, "invalid arguments");
                return err.into();
            }
        };

        tracing::debug!(tool = name, "invoking tool");
        match tool.execute(args, ctx).await {
            Ok(output) => InvokeOutcome::success(output),
            Err(err) => {
                tracing::warn!(tool = name, error = %format!("{err:#}"), "tool handler failed");
                // {:#} keeps the anyhow context chain in the message.
                InvokeOutcome::failure(FailureKind::HandlerExecution, format!("{err:#}"))
            }
        }
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
