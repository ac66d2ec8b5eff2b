//! Tool system for breathsmith.
//!
//! Every capability exposed to the host is a tool: a named handler with a
//! declared schema, registered once at startup and invoked through the
//! registry's adapter.
//!
//! # Architecture
//!
//! ```text
//! host request (name + argument mapping)
//!     │
//!     ▼
//! ToolRegistry::invoke
//!     ├── lookup ──────────── ToolNotFound
//!     ├── validate/coerce ─── MissingArgument / ArgumentType
//!     ├── Tool::execute ───── HandlerExecution on Err
//!     ▼
//! InvokeOutcome (success | failure)
//! ```

mod builtin;
mod context;
mod registry;
mod traits;
mod validate;

pub use builtin::register_builtins;
pub use context::ToolContext;
pub use registry::ToolRegistry;
pub use traits::{ParamSchema, Tool, ToolArgs, ToolSchema};
pub use validate::validate_against_schema;
