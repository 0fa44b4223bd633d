//! Schema-driven validation of tool-call arguments.
//!
//! Only the subset of JSON schema that tool catalogs use is understood:
//! `required`, `properties.<name>.type` and `properties.<name>.enum`.
//! The validator reports problems; it never mutates or coerces values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of validating one set of arguments.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validator for tool arguments against a parameter schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolParameterValidator;

impl ToolParameterValidator {
    /// Validate `arguments` against `schema`.
    ///
    /// Missing arguments or a missing/null schema are trivially valid.
    /// Required names are checked even when the schema has no `properties`;
    /// type and enum checks need `properties`.
    pub fn validate(
        &self,
        arguments: Option<&Map<String, Value>>,
        schema: Option<&Value>,
    ) -> ValidationReport {
        let (Some(arguments), Some(Value::Object(schema))) = (arguments, schema) else {
            return ValidationReport::valid();
        };

        let mut errors = Vec::new();

        if let Some(Value::Array(required)) = schema.get("required") {
            for name in required.iter().filter_map(Value::as_str) {
                if !arguments.contains_key(name) {
                    errors.push(format!("Required parameter '{}' is missing", name));
                }
            }
        }

        if let Some(Value::Object(properties)) = schema.get("properties") {
            for (name, property) in properties {
                if let Some(value) = arguments.get(name) {
                    check_property(name, value, property, &mut errors);
                }
            }
        }

        ValidationReport::from_errors(errors)
    }
}

fn check_property(name: &str, value: &Value, property: &Value, errors: &mut Vec<String>) {
    if let Some(expected) = property.get("type").and_then(Value::as_str) {
        if !matches_type(value, expected) {
            errors.push(format!("Parameter '{}' must be of type '{}'", name, expected));
            return;
        }
    }

    if let Some(Value::Array(allowed)) = property.get("enum") {
        if !allowed.contains(value) {
            let list = allowed
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            errors.push(format!("Parameter '{}' must be one of: {}", name, list));
        }
    }
}

fn matches_type(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        // Unknown type names are not enforced.
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(schema: Value, args: Value) -> ValidationReport {
        let args = args.as_object().cloned().unwrap();
        ToolParameterValidator.validate(Some(&args), Some(&schema))
    }

    #[test]
    fn missing_required_parameter() {
        let report = validate(json!({"required": ["name"]}), json!({}));
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["Required parameter 'name' is missing"]);
    }

    #[test]
    fn integer_rejects_decimal() {
        let report = validate(
            json!({"properties": {"age": {"type": "integer"}}}),
            json!({"age": 30.5}),
        );
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("'integer'"));
    }

    #[test]
    fn integer_rejects_string_and_accepts_whole_numbers() {
        let schema = json!({"properties": {"age": {"type": "integer"}}});
        assert!(!validate(schema.clone(), json!({"age": "30"})).is_valid);
        assert!(validate(schema.clone(), json!({"age": 30})).is_valid);
        assert!(validate(schema, json!({"age": -4})).is_valid);
    }

    #[test]
    fn number_accepts_integer_and_decimal_but_not_string() {
        let schema = json!({"properties": {"ratio": {"type": "number"}}});
        assert!(validate(schema.clone(), json!({"ratio": 1})).is_valid);
        assert!(validate(schema.clone(), json!({"ratio": 0.75})).is_valid);
        assert!(!validate(schema, json!({"ratio": "0.75"})).is_valid);
    }

    #[test]
    fn boolean_rejects_surrogates() {
        let schema = json!({"properties": {"verbose": {"type": "boolean"}}});
        assert!(validate(schema.clone(), json!({"verbose": false})).is_valid);
        assert!(!validate(schema.clone(), json!({"verbose": "true"})).is_valid);
        assert!(!validate(schema, json!({"verbose": 1})).is_valid);
    }

    #[test]
    fn composite_types() {
        let schema = json!({"properties": {
            "paths": {"type": "array"},
            "filter": {"type": "object"}
        }});
        assert!(validate(schema.clone(), json!({"paths": ["C:\\"], "filter": {}})).is_valid);
        let report = validate(schema, json!({"paths": "C:\\", "filter": []}));
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn enum_is_case_sensitive() {
        let schema = json!({"properties": {"level": {"type": "string", "enum": ["Error", "Warning"]}}});
        assert!(validate(schema.clone(), json!({"level": "Error"})).is_valid);
        let report = validate(schema, json!({"level": "error"}));
        assert_eq!(
            report.errors,
            vec!["Parameter 'level' must be one of: Error, Warning"]
        );
    }

    #[test]
    fn extra_properties_are_ignored() {
        let schema = json!({"properties": {"a": {"type": "string"}}, "required": ["a"]});
        assert!(validate(schema, json!({"a": "x", "b": 7})).is_valid);
    }

    #[test]
    fn trivially_valid_inputs() {
        let args = json!({"a": 1}).as_object().cloned().unwrap();
        let validator = ToolParameterValidator;
        assert!(validator.validate(None, Some(&json!({"required": ["a"]}))).is_valid);
        assert!(validator.validate(Some(&args), None).is_valid);
        assert!(validator.validate(Some(&args), Some(&Value::Null)).is_valid);
        assert!(validate(json!({"type": "object"}), json!({"a": "anything"})).is_valid);
    }

    #[test]
    fn never_mutates_arguments() {
        let schema = json!({"properties": {"n": {"type": "integer"}}});
        let args = json!({"n": "5"}).as_object().cloned().unwrap();
        let before = args.clone();
        let _ = ToolParameterValidator.validate(Some(&args), Some(&schema));
        assert_eq!(args, before);
    }
}
