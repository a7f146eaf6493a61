//! Tool definition model.
//!
//! A [`ToolDefinition`] is the unit every rule inspects: a name, a
//! description, a JSON-Schema-shaped input schema and optional behavioral
//! annotations. Definitions are produced by the parsers (or by callers that
//! already hold them) and are only ever borrowed by the engine.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// Behavioral hints a tool can declare about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only_hint: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destructive_hint: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotent_hint: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_world_hint: Option<bool>,
}

/// Where a tool definition came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ToolOrigin {
    /// Parsed from a file on disk.
    File(PathBuf),
    /// Listed by a running server at the given URL or command line.
    Server(String),
    /// Constructed in memory.
    #[default]
    Inline,
}

impl fmt::Display for ToolOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolOrigin::File(path) => write!(f, "{}", path.display()),
            ToolOrigin::Server(url) => f.write_str(url),
            ToolOrigin::Inline => f.write_str("inline"),
        }
    }
}

/// Provenance of a tool definition plus the raw payload it was parsed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolSource {
    pub origin: ToolOrigin,
    pub raw: Option<Value>,
}

impl ToolSource {
    pub fn new(origin: ToolOrigin, raw: Value) -> Self {
        Self {
            origin,
            raw: Some(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,

    /// Empty when the document omits it or sets it to `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    #[serde(alias = "input_schema")]
    pub input_schema: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<ToolAnnotations>,

    #[serde(skip)]
    pub source: ToolSource,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            annotations: None,
            source: ToolSource::default(),
        }
    }

    pub fn with_annotations(mut self, annotations: ToolAnnotations) -> Self {
        self.annotations = Some(annotations);
        self
    }

    pub fn with_source(mut self, source: ToolSource) -> Self {
        self.source = source;
        self
    }

    /// Top-level `properties` of the input schema, if it declares any.
    pub fn properties(&self) -> Option<&serde_json::Map<String, Value>> {
        self.input_schema.get("properties").and_then(Value::as_object)
    }

    /// Names listed in the top-level `required` array.
    pub fn required(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}
