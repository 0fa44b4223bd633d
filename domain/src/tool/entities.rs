//! Tool domain entities

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

fn function_type() -> String {
    "function".to_string()
}

/// Schema of a function the model may call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// JSON-schema-like parameter spec (`type`, `properties`, `required`)
    #[serde(default)]
    pub parameters: Value,
}

/// Definition of a tool offered to a model
///
/// Wire shape: `{"type": "function", "function": {name, description, parameters}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type", default = "function_type")]
    pub tool_type: String,
    pub function: FunctionSpec,
}

impl ToolDefinition {
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            tool_type: function_type(),
            function: FunctionSpec {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    pub fn parameters(&self) -> &Value {
        &self.function.parameters
    }
}

/// Arguments of a tool call as emitted by the model.
///
/// Models send either a JSON-encoded string or an already structured object.
/// Anything else (null, numbers, arrays) deserializes to an empty object.
/// Both forms serialize as a JSON-encoded string, the shape chat-completion
/// servers expect when a call is echoed back in the history.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum ToolArguments {
    Raw(String),
    Parsed(Map<String, Value>),
}

impl Serialize for ToolArguments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ToolArguments::Raw(raw) => serializer.serialize_str(raw),
            ToolArguments::Parsed(map) => {
                let encoded = serde_json::to_string(map).map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&encoded)
            }
        }
    }
}

impl From<Value> for ToolArguments {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => ToolArguments::Raw(s),
            Value::Object(map) => ToolArguments::Parsed(map),
            _ => ToolArguments::Parsed(Map::new()),
        }
    }
}

impl Default for ToolArguments {
    fn default() -> Self {
        ToolArguments::Parsed(Map::new())
    }
}

impl ToolArguments {
    /// Strictly parse the arguments into an object.
    ///
    /// Returns the parse error for raw strings that are not a JSON object.
    pub fn try_normalize(&self) -> Result<Map<String, Value>, String> {
        match self {
            ToolArguments::Parsed(map) => Ok(map.clone()),
            ToolArguments::Raw(raw) if raw.trim().is_empty() => Ok(Map::new()),
            ToolArguments::Raw(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(map)) => Ok(map),
                Ok(other) => Err(format!("expected a JSON object, got {}", json_kind(&other))),
                Err(e) => Err(e.to_string()),
            },
        }
    }

    /// Parsed arguments, falling back to an empty object on any parse failure.
    pub fn normalize(&self) -> Map<String, Value> {
        self.try_normalize().unwrap_or_default()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Name and arguments of a called function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: ToolArguments,
}

/// A structured request, emitted by a model, to invoke one tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub tool_type: String,
    pub function: FunctionCall,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: ToolArguments) -> Self {
        Self {
            id: id.into(),
            tool_type: function_type(),
            function: FunctionCall {
                name: name.into(),
                arguments,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// Outcome of one executed tool call, as reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub name: String,
    /// Arguments after normalization
    pub arguments: Map<String, Value>,
    /// Result text, possibly truncated or an embedded error message
    pub result: String,
    /// Whether `result` was cut to the result limit
    #[serde(default)]
    pub truncated: bool,
}

impl ToolResult {
    pub fn new(
        name: impl Into<String>,
        arguments: Map<String, Value>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            arguments,
            result: result.into(),
            truncated: false,
        }
    }

    pub fn with_truncated(mut self, truncated: bool) -> Self {
        self.truncated = truncated;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_arguments_string_and_object_forms() {
        let from_string: ToolArguments = serde_json::from_value(json!("{\"path\":\"C:\\\\\"}")).unwrap();
        assert!(matches!(from_string, ToolArguments::Raw(_)));
        assert_eq!(from_string.normalize()["path"], "C:\\");

        let from_object: ToolArguments = serde_json::from_value(json!({"count": 2})).unwrap();
        assert!(matches!(from_object, ToolArguments::Parsed(_)));
        assert_eq!(from_object.normalize()["count"], 2);
    }

    #[test]
    fn test_malformed_arguments_become_empty() {
        let args = ToolArguments::Raw("{not json".to_string());
        assert!(args.try_normalize().is_err());
        assert!(args.normalize().is_empty());

        let array = ToolArguments::Raw("[1,2]".to_string());
        assert!(array.try_normalize().unwrap_err().contains("array"));
        assert!(array.normalize().is_empty());
    }

    #[test]
    fn test_arguments_serialize_as_string() {
        let mut args = Map::new();
        args.insert("drive".to_string(), json!("C:"));
        let call = ToolCall::new("c1", "pcai_get_disk_health", ToolArguments::Parsed(args));

        let wire = serde_json::to_value(&call).unwrap();
        assert_eq!(wire["function"]["arguments"], json!("{\"drive\":\"C:\"}"));

        let raw = ToolCall::new("c2", "pcai_get_usb", ToolArguments::Raw("{}".to_string()));
        assert_eq!(serde_json::to_value(&raw).unwrap()["function"]["arguments"], json!("{}"));

        let back: ToolCall = serde_json::from_value(wire).unwrap();
        assert_eq!(back.function.arguments.normalize()["drive"], "C:");
    }

    #[test]
    fn test_null_arguments_deserialize_to_empty() {
        let call: ToolCall = serde_json::from_value(json!({
            "id": "c1",
            "function": {"name": "pcai_get_docker_status", "arguments": null}
        }))
        .unwrap();
        assert_eq!(call.tool_type, "function");
        assert!(call.function.arguments.normalize().is_empty());
    }

    #[test]
    fn test_tool_definition_wire_shape() {
        let def: ToolDefinition = serde_json::from_value(json!({
            "type": "function",
            "function": {
                "name": "pcai_get_disk_health",
                "description": "SMART status",
                "parameters": {"type": "object", "properties": {}}
            }
        }))
        .unwrap();
        assert_eq!(def.name(), "pcai_get_disk_health");
        assert_eq!(def.parameters()["type"], "object");
    }
}
