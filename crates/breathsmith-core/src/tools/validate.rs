//! Argument validation and coercion against a declared schema.
//!
//! Runs before every handler invocation. An explicit JSON `null` counts as
//! "not supplied" so hosts can pass through optional fields untouched.

use serde_json::{Map, Value};

use crate::error::InvokeError;

use super::traits::{ParamSchema, ToolArgs, ToolSchema};

/// Validate a raw argument mapping against a tool schema.
///
/// - keys that match no declared parameter are rejected;
/// - missing optional parameters get their declared default;
/// - missing required parameters fail with `MissingArgument`;
/// - supplied values are coerced to the declared type or fail with
///   `ArgumentType` naming the parameter, expected type, and received value.
pub fn validate_against_schema(
    schema: &ToolSchema,
    raw: &Map<String, Value>,
) -> Result<ToolArgs, InvokeError> {
    for key in raw.keys() {
        if schema.find_param(key).is_none() {
            return Err(InvokeError::UnexpectedArgument {
                tool: schema.name.clone(),
                param: key.clone(),
            });
        }
    }

    let mut args = ToolArgs::new();

    for param in &schema.params {
        let supplied = raw.get(&param.name).filter(|v| !v.is_null());

        let value = match supplied {
            Some(value) => coerce(&schema.name, param, value)?,
            None => match &param.default {
                Some(default) if !default.is_null() => default.clone(),
                // Null default: optional with no value, leave absent.
                Some(_) => continue,
                None => {
                    return Err(InvokeError::MissingArgument {
                        tool: schema.name.clone(),
                        param: param.name.clone(),
                    })
                }
            },
        };

        args.named.insert(param.name.clone(), value);
    }

    Ok(args)
}

/// Coerce one supplied value to its declared type.
fn coerce(tool: &str, param: &ParamSchema, value: &Value) -> Result<Value, InvokeError> {
    let mismatch = |expected: &str| InvokeError::ArgumentType {
        tool: tool.to_string(),
        param: param.name.clone(),
        expected: expected.to_string(),
        got: describe(value),
    };

    match param.param_type.as_str() {
        "string" => {
            let s = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return Err(mismatch("string")),
            };
            if !param.allowed.is_empty() && !param.allowed.iter().any(|a| a == &s) {
                return Err(InvokeError::ArgumentType {
                    tool: tool.to_string(),
                    param: param.name.clone(),
                    expected: format!("one of [{}]", param.allowed.join(", ")),
                    got: format!("\"{}\"", s),
                });
            }
            Ok(Value::String(s))
        }
        "int" => match value {
            Value::Number(n) => n.as_i64().map(Value::from).ok_or_else(|| mismatch("int")),
            Value::String(s) => s
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| mismatch("int")),
            _ => Err(mismatch("int")),
        },
        "float" => match value {
            Value::Number(n) => n.as_f64().map(Value::from).ok_or_else(|| mismatch("float")),
            Value::String(s) => s
                .parse::<f64>()
                .map(Value::from)
                .map_err(|_| mismatch("float")),
            _ => Err(mismatch("float")),
        },
        "bool" => match value {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::String(s) => match s.as_str() {
                "true" | "yes" | "1" => Ok(Value::Bool(true)),
                "false" | "no" | "0" => Ok(Value::Bool(false)),
                _ => Err(mismatch("bool")),
            },
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Bool(i != 0)),
                None => Err(mismatch("bool")),
            },
            _ => Err(mismatch("bool")),
        },
        "array" => match value {
            Value::Array(_) => Ok(value.clone()),
            _ => Err(mismatch("array")),
        },
        // "any" and unknown hints pass through untouched.
        _ => Ok(value.clone()),
    }
}

/// Short description of a received value for error messages.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("bool {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) if s.chars().count() <= 40 => format!("\"{}\"", s),
        Value::String(s) => format!("\"{}…\"", s.chars().take(40).collect::<String>()),
        Value::Array(a) => format!("array of {} items", a.len()),
        Value::Object(_) => "object".to_string(),
    }
}
