//! Argument validation against a tool's JSON Schema.
//!
//! Covers the subset the tool parameter structs generate: `type` (single or
//! list, including `"null"` for optional fields), `required`, `properties`,
//! `items`, `minimum`/`maximum`, `minItems`, `minLength` and `anyOf`.
//! Unknown properties are ignored.

use serde_json::{Map, Value};

use crate::error::ToolError;

/// Check `arguments` against `schema`, naming the first offending field.
pub fn validate(schema: &Value, arguments: &Value) -> Result<(), ToolError> {
    let args = arguments
        .as_object()
        .ok_or_else(|| ToolError::invalid("arguments", "expected an object"))?;

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if args.get(name).map_or(true, Value::is_null) {
                return Err(ToolError::invalid(name, "is required"));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (name, property) in properties {
            if let Some(value) = args.get(name) {
                check_value(name, property, value)?;
            }
        }
    }

    Ok(())
}

fn check_value(field: &str, schema: &Value, value: &Value) -> Result<(), ToolError> {
    let Some(schema) = schema.as_object() else {
        return Ok(());
    };

    if let Some(variants) = schema.get("anyOf").and_then(Value::as_array) {
        let mut first_err = None;
        for variant in variants {
            match check_value(field, variant, value) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        if let Some(err) = first_err {
            return Err(err);
        }
    }

    if let Some(expected) = schema.get("type") {
        let allowed: Vec<&str> = match expected {
            Value::String(t) => vec![t.as_str()],
            Value::Array(ts) => ts.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        };
        if !allowed.is_empty() && !allowed.iter().any(|t| type_matches(t, value)) {
            return Err(ToolError::invalid(
                field,
                format!("expected {}, got {}", allowed.join(" or "), type_name(value)),
            ));
        }
    }

    match value {
        Value::Number(n) => check_bounds(field, schema, n.as_f64().unwrap_or(f64::NAN))?,
        Value::String(s) => {
            if let Some(min) = schema.get("minLength").and_then(Value::as_u64) {
                if (s.chars().count() as u64) < min {
                    return Err(ToolError::invalid(field, format!("must be at least {min} characters")));
                }
            }
        }
        Value::Array(items) => {
            if let Some(min) = schema.get("minItems").and_then(Value::as_u64) {
                if (items.len() as u64) < min {
                    return Err(ToolError::invalid(field, format!("must contain at least {min} item(s)")));
                }
            }
            if let Some(item_schema) = schema.get("items") {
                for (i, item) in items.iter().enumerate() {
                    check_value(&format!("{field}[{i}]"), item_schema, item)?;
                }
            }
        }
        _ => {}
    }

    Ok(())
}

fn check_bounds(field: &str, schema: &Map<String, Value>, n: f64) -> Result<(), ToolError> {
    if let Some(min) = schema.get("minimum").and_then(Value::as_f64) {
        if n < min {
            return Err(ToolError::invalid(field, format!("must be >= {min}")));
        }
    }
    if let Some(max) = schema.get("maximum").and_then(Value::as_f64) {
        if n > max {
            return Err(ToolError::invalid(field, format!("must be <= {max}")));
        }
    }
    Ok(())
}

fn type_matches(expected: &str, value: &Value) -> bool {
    match expected {
        "null" => value.is_null(),
        "boolean" => value.is_boolean(),
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        _ => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "keywords": { "type": "array", "items": { "type": "string" }, "minItems": 1 },
                "importance": { "type": ["integer", "null"], "minimum": 1, "maximum": 10 },
                "content": { "type": "string", "minLength": 1 }
            },
            "required": ["keywords"]
        })
    }

    fn field_of(err: ToolError) -> String {
        match err {
            ToolError::InvalidArguments { field, .. } => field,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn accepts_valid_arguments_and_ignores_extras() {
        let args = json!({ "keywords": ["a"], "importance": null, "extra": true });
        validate(&schema(), &args).unwrap();
    }

    #[test]
    fn missing_required_field_is_named() {
        let err = validate(&schema(), &json!({})).unwrap_err();
        assert_eq!(field_of(err), "keywords");
    }

    #[test]
    fn wrong_item_type_names_the_index() {
        let err = validate(&schema(), &json!({ "keywords": ["ok", 3] })).unwrap_err();
        assert_eq!(field_of(err), "keywords[1]");
    }

    #[test]
    fn empty_array_violates_min_items() {
        let err = validate(&schema(), &json!({ "keywords": [] })).unwrap_err();
        assert_eq!(field_of(err), "keywords");
    }

    #[test]
    fn integer_bounds_and_float_rejection() {
        let err = validate(&schema(), &json!({ "keywords": ["a"], "importance": 11 })).unwrap_err();
        assert_eq!(field_of(err), "importance");
        let err = validate(&schema(), &json!({ "keywords": ["a"], "importance": 2.5 })).unwrap_err();
        assert_eq!(field_of(err), "importance");
    }

    #[test]
    fn non_object_arguments_are_rejected() {
        let err = validate(&schema(), &json!(["keywords"])).unwrap_err();
        assert_eq!(field_of(err), "arguments");
    }

    #[test]
    fn any_of_accepts_matching_variant() {
        let schema = json!({
            "properties": { "limit": { "anyOf": [ { "type": "integer" }, { "type": "null" } ] } }
        });
        validate(&schema, &json!({ "limit": null })).unwrap();
        let err = validate(&schema, &json!({ "limit": "ten" })).unwrap_err();
        assert_eq!(field_of(err), "limit");
    }
}
