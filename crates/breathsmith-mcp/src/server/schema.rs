//! Conversion from registry tool schemas to MCP JSON Schema objects.

use serde_json::{json, Map, Value};

use breathsmith_core::{ParamSchema, ToolSchema};

/// Build the `input_schema` object advertised for a tool.
pub fn input_schema(schema: &ToolSchema) -> Map<String, Value> {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for param in &schema.params {
        properties.insert(param.name.clone(), param_schema(param));
        if param.required {
            required.push(Value::String(param.name.clone()));
        }
    }

    let mut object = Map::new();
    object.insert("type".into(), json!("object"));
    object.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        object.insert("required".into(), Value::Array(required));
    }
    object
}

fn param_schema(param: &ParamSchema) -> Value {
    let mut prop = Map::new();
    if let Some(json_type) = json_type(&param.param_type) {
        prop.insert("type".into(), json!(json_type));
    }
    prop.insert("description".into(), json!(param.description));
    if !param.allowed.is_empty() {
        prop.insert("enum".into(), json!(param.allowed));
    }
    if let Some(default) = &param.default {
        if !default.is_null() {
            prop.insert("default".into(), default.clone());
        }
    }
    Value::Object(prop)
}

/// Map a registry type hint to a JSON Schema type. `any` has no type key.
fn json_type(param_type: &str) -> Option<&'static str> {
    match param_type {
        "string" => Some("string"),
        "int" => Some("integer"),
        "float" => Some("number"),
        "bool" => Some("boolean"),
        "array" => Some("array"),
        _ => None,
    }
}
