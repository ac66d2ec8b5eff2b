//! InvokeOutcome: the structured result of every tool invocation.
//!
//! Every call through the adapter produces exactly one outcome: a success
//! payload or a failure carrying its kind and message. The MCP layer
//! serializes this for the host and then discards it.

use serde::{Deserialize, Serialize};

use crate::error::InvokeError;

/// Category of a failed invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No tool registered under the requested name.
    ToolNotFound,
    /// A required parameter was absent and had no default.
    MissingArgument,
    /// A supplied value did not match the declared parameter type.
    ArgumentType,
    /// The handler itself failed (network, subprocess, SQL, I/O, ...).
    HandlerExecution,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FailureKind::ToolNotFound => "tool_not_found",
            FailureKind::MissingArgument => "missing_argument",
            FailureKind::ArgumentType => "argument_type",
            FailureKind::HandlerExecution => "handler_execution",
        };
        f.write_str(s)
    }
}

/// The result of one invocation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvokeOutcome {
    /// The handler completed normally.
    Success {
        /// The handler's return value.
        output: String,
    },
    /// The request was rejected or the handler failed.
    Failure {
        /// What went wrong, by category.
        kind: FailureKind,
        /// Human-readable message, preserving the underlying cause.
        message: String,
    },
}

impl InvokeOutcome {
    /// Create a successful outcome.
    pub fn success(output: impl Into<String>) -> Self {
        InvokeOutcome::Success {
            output: output.into(),
        }
    }

    /// Create a failed outcome.
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        InvokeOutcome::Failure {
            kind,
            message: message.into(),
        }
    }

    /// True if the invocation succeeded.
    pub fn ok(&self) -> bool {
        matches!(self, InvokeOutcome::Success { .. })
    }

    /// The success payload, if any.
    pub fn output(&self) -> Option<&str> {
        match self {
            InvokeOutcome::Success { output } => Some(output),
            InvokeOutcome::Failure { .. } => None,
        }
    }

    /// The failure kind, if any.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            InvokeOutcome::Success { .. } => None,
            InvokeOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    /// The failure message, if any.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            InvokeOutcome::Success { .. } => None,
            InvokeOutcome::Failure { message, .. } => Some(message),
        }
    }
}

impl From<InvokeError> for InvokeOutcome {
    fn from(err: InvokeError) -> Self {
        InvokeOutcome::failure(err.kind(), err.to_string())
    }
}
