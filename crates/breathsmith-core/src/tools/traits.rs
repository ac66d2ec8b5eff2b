//! Core tool trait and schema types.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use super::context::ToolContext;

/// Schema for a tool parameter.
#[derive(Debug, Clone)]
pub struct ParamSchema {
    /// Parameter name.
    pub name: String,
    /// Type hint (string, int, float, bool, array, any).
    pub param_type: String,
    /// Whether this parameter is required.
    pub required: bool,
    /// Default value if not required. `Value::Null` means "no value";
    /// the parameter is simply absent from the validated args.
    pub default: Option<Value>,
    /// Description shown to the host.
    pub description: String,
    /// Closed set of accepted values for string parameters.
    /// Empty means unconstrained.
    pub allowed: Vec<String>,
}

impl ParamSchema {
    /// Create a required parameter.
    pub fn required(
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            required: true,
            default: None,
            description: description.into(),
            allowed: Vec::new(),
        }
    }

    /// Create an optional parameter with a default value.
    pub fn optional(
        name: impl Into<String>,
        param_type: impl Into<String>,
        default: Value,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            required: false,
            default: Some(default),
            description: description.into(),
            allowed: Vec::new(),
        }
    }

    /// Restrict a string parameter to a closed set of values.
    ///
    /// Values outside the set are rejected at validation time rather than
    /// silently mapped to a default.
    pub fn with_allowed(mut self, allowed: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.allowed = allowed.into_iter().map(Into::into).collect();
        self
    }
}

/// Schema describing a tool's interface.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    /// Tool name (the registry key).
    pub name: String,
    /// Short description.
    pub description: String,
    /// Parameter definitions, in declaration order.
    pub params: Vec<ParamSchema>,
}

impl ToolSchema {
    /// Create a new tool schema.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter to the schema.
    pub fn param(mut self, param: ParamSchema) -> Self {
        self.params.push(param);
        self
    }

    /// Look up a parameter by name.
    pub fn find_param(&self, name: &str) -> Option<&ParamSchema> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// Validated arguments ready for tool execution.
///
/// Produced by `validate_against_schema`: every key matches a declared
/// parameter, defaults are filled in, and values are coerced to their
/// declared types. Handlers read values through the typed getters.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    /// Named arguments by parameter name.
    pub named: HashMap<String, Value>,
}

impl ToolArgs {
    /// Create empty args.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a raw value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    /// Get a string value, stringifying numbers and bools.
    pub fn get_string(&self, name: &str) -> Option<String> {
        self.named.get(name).and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    /// Get an integer value.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.named.get(name).and_then(|v| match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        })
    }

    /// Get a boolean value.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.named.get(name).and_then(|v| match v {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
            Value::Number(n) => n.as_i64().map(|i| i != 0),
            _ => None,
        })
    }

    /// Get an array value.
    pub fn get_array(&self, name: &str) -> Option<&Vec<Value>> {
        self.named.get(name).and_then(|v| v.as_array())
    }
}

/// A tool that can be invoked by the host.
///
/// Handlers are independent, stateless request/response adapters: the
/// registry treats them as opaque beyond their declared schema and the
/// `Ok`/`Err` discriminant of the outcome. A handler `Err` is captured by
/// the adapter and reported as a failure result; it never terminates the
/// process.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's name (used for lookup).
    fn name(&self) -> &str;

    /// The tool's declared schema.
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with validated arguments.
    async fn execute(&self, args: ToolArgs, ctx: &ToolContext) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn schema_builder_collects_params_in_order() {
        let schema = ToolSchema::new("demo", "A demo tool")
            .param(ParamSchema::required("first", "string", "First"))
            .param(ParamSchema::optional("second", "int", json!(5), "Second"));

        assert_eq!(schema.name, "demo");
        assert_eq!(schema.params.len(), 2);
        assert_eq!(schema.params[0].name, "first");
        assert!(schema.params[0].required);
        assert_eq!(schema.params[1].default, Some(json!(5)));
        assert!(schema.find_param("second").is_some());
        assert!(schema.find_param("third").is_none());
    }

    #[test]
    fn allowed_set_builder() {
        let param = ParamSchema::optional("format_type", "string", json!("iso"), "Format")
            .with_allowed(["iso", "unix", "readable"]);
        assert_eq!(param.allowed, vec!["iso", "unix", "readable"]);
    }

    #[test]
    fn args_getters_coerce_like_the_wire_types() {
        let mut args = ToolArgs::new();
        args.named.insert("s".into(), json!("text"));
        args.named.insert("n".into(), json!(42));
        args.named.insert("b".into(), json!(true));
        args.named.insert("a".into(), json!([1, 2]));

        assert_eq!(args.get_string("s").as_deref(), Some("text"));
        assert_eq!(args.get_string("n").as_deref(), Some("42"));
        assert_eq!(args.get_int("n"), Some(42));
        assert_eq!(args.get_bool("b"), Some(true));
        assert_eq!(args.get_array("a").map(|a| a.len()), Some(2));
        assert_eq!(args.get_string("missing"), None);
    }
}
