//! Error taxonomy for the tool contract layer.
//!
//! `RegistrationError` is the only fatal kind and can only occur during
//! startup. Everything in `InvokeError` is recoverable: the invocation
//! adapter converts it into a failure `InvokeOutcome` for the host instead
//! of propagating it as a process-level fault.

use thiserror::Error;

use crate::outcome::FailureKind;

/// A tool name was registered twice. Fatal; aborts startup.
#[derive(Debug, Clone, Error)]
#[error("duplicate tool name: {name}")]
pub struct RegistrationError {
    /// The name that was already present in the registry.
    pub name: String,
}

/// A request was rejected before the handler ran.
#[derive(Debug, Clone, Error)]
pub enum InvokeError {
    /// The requested tool name is not in the registry.
    #[error("unknown tool: {name} (known tools: {known})")]
    ToolNotFound {
        /// The name the host asked for.
        name: String,
        /// Comma-separated list of registered names.
        known: String,
    },

    /// A required parameter had no supplied value and no default.
    #[error("{tool}: missing required argument: {param}")]
    MissingArgument { tool: String, param: String },

    /// A supplied value could not be coerced to the declared type.
    #[error("{tool}: argument '{param}' expects {expected}, got {got}")]
    ArgumentType {
        tool: String,
        param: String,
        expected: String,
        got: String,
    },

    /// An argument key matched no declared parameter.
    #[error("{tool}: unexpected argument: {param}")]
    UnexpectedArgument { tool: String, param: String },
}

impl InvokeError {
    /// The failure kind reported to the host for this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            InvokeError::ToolNotFound { .. } => FailureKind::ToolNotFound,
            InvokeError::MissingArgument { .. } => FailureKind::MissingArgument,
            // Unexpected keys are malformed arguments; the taxonomy has no
            // separate kind for them.
            InvokeError::ArgumentType { .. } | InvokeError::UnexpectedArgument { .. } => {
                FailureKind::ArgumentType
            }
        }
    }
}
