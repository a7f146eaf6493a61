//! Built-in rule checks, one module per category.
//!
//! Every check has the [`RuleCheck`](crate::RuleCheck) signature and is wired
//! to its id in the registry's built-in table.

pub mod best_practice;
pub mod lexicon;
pub mod llm;
pub mod naming;
pub mod schema;
pub mod security;

use serde_json::Value;

use crate::diagnostics::{RuleError, ValidationIssue};
use crate::schema_analysis::property_pointer;
use crate::tool::ToolDefinition;

pub(crate) type CheckResult = Result<Vec<ValidationIssue>, RuleError>;

/// A top-level parameter of a tool.
pub(crate) struct Parameter<'a> {
    pub name: &'a str,
    pub schema: &'a Value,
}

impl Parameter<'_> {
    pub fn pointer(&self) -> String {
        property_pointer(self.name)
    }

    pub fn description(&self) -> Option<&str> {
        self.schema.get("description").and_then(Value::as_str)
    }
}

/// Top-level parameters in declaration order.
pub(crate) fn parameters(tool: &ToolDefinition) -> impl Iterator<Item = Parameter<'_>> {
    tool.properties()
        .into_iter()
        .flat_map(|props| props.iter())
        .map(|(name, schema)| Parameter {
            name: name.as_str(),
            schema,
        })
}

/// Whether an optional string field holds something other than whitespace.
pub(crate) fn is_blank(text: Option<&str>) -> bool {
    text.is_none_or(|t| t.trim().is_empty())
}
