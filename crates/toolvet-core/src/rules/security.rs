//! Security posture rules (SEC-001 to SEC-006)

use serde_json::Value;

use super::CheckResult;
use super::lexicon::{destructive_verb, is_credential_name, is_injection_prone_name};
use crate::engine::RuleContext;
use crate::schema_analysis::{SchemaNode, walk_schema};
use crate::tool::ToolDefinition;

/// Keywords that bound the values a string parameter accepts.
const STRING_CONSTRAINTS: &[&str] = &["maxLength", "enum", "const", "pattern", "format"];

/// Keywords that restrict a string to an expected shape.
const SHAPE_CONSTRAINTS: &[&str] = &["pattern", "enum", "const"];

fn has_any(node: &SchemaNode<'_>, keys: &[&str]) -> bool {
    keys.iter().any(|key| node.schema.contains_key(*key))
}

/// SEC-001: string parameters are bounded.
pub fn check_string_bounds(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let mut issues = Vec::new();
    walk_schema(&tool.input_schema, |node| {
        let Some(name) = node.property else {
            return;
        };
        if node.has_type("string") && !has_any(node, STRING_CONSTRAINTS) {
            issues.push(
                ctx.issue(
                    tool,
                    format!("String parameter '{}' accepts input of any length", name),
                )
                .at(node.pointer.clone())
                .with_suggestion("Add maxLength, pattern, enum or format"),
            );
        }
    });
    Ok(issues)
}

/// SEC-002: parameters that look like commands, queries, paths or URLs are
/// constrained to an expected shape.
pub fn check_injection_prone_parameters(
    tool: &ToolDefinition,
    ctx: &RuleContext<'_>,
) -> CheckResult {
    let mut issues = Vec::new();
    walk_schema(&tool.input_schema, |node| {
        let Some(name) = node.property else {
            return;
        };
        let stringly = node.has_type("string") || !node.schema.contains_key("type");
        if stringly && is_injection_prone_name(name) && !has_any(node, SHAPE_CONSTRAINTS) {
            issues.push(
                ctx.issue(
                    tool,
                    format!(
                        "Parameter '{}' may reach an interpreter, filesystem or network call without a pattern or enum",
                        name
                    ),
                )
                .at(node.pointer.clone())
                .with_suggestion("Constrain the value with a pattern or an enum of allowed values"),
            );
        }
    });
    Ok(issues)
}

/// SEC-003
pub fn check_destructive_hint(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let Some(verb) = destructive_verb(&tool.name) else {
        return Ok(Vec::new());
    };

    let hint = tool
        .annotations
        .as_ref()
        .and_then(|annotations| annotations.destructive_hint);
    if hint == Some(true) {
        return Ok(Vec::new());
    }

    let message = match hint {
        Some(false) => format!(
            "Tool '{}' looks destructive ('{}') but sets destructiveHint to false",
            tool.name, verb
        ),
        _ => format!(
            "Tool '{}' looks destructive ('{}') but does not set destructiveHint",
            tool.name, verb
        ),
    };
    Ok(vec![
        ctx.issue(tool, message)
            .at("/annotations/destructiveHint")
            .with_suggestion("Set annotations.destructiveHint to true so clients can ask for confirmation"),
    ])
}

/// SEC-004: credentials passed as tool arguments end up in model context.
pub fn check_credential_parameters(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let mut issues = Vec::new();
    walk_schema(&tool.input_schema, |node| {
        let Some(name) = node.property else {
            return;
        };
        if is_credential_name(name) {
            issues.push(
                ctx.issue(tool, format!("Parameter '{}' accepts a credential", name))
                    .at(node.pointer.clone())
                    .with_suggestion("Load credentials from server configuration instead of tool arguments"),
            );
        }
    });
    Ok(issues)
}

/// SEC-005: numeric parameters are range-limited.
pub fn check_numeric_bounds(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let mut issues = Vec::new();
    walk_schema(&tool.input_schema, |node| {
        let Some(name) = node.property else {
            return;
        };
        if !(node.has_type("integer") || node.has_type("number")) || has_any(node, &["enum", "const"])
        {
            return;
        }

        let mut missing = Vec::new();
        if !has_any(node, &["minimum", "exclusiveMinimum"]) {
            missing.push("minimum");
        }
        if !has_any(node, &["maximum", "exclusiveMaximum"]) {
            missing.push("maximum");
        }
        if !missing.is_empty() {
            issues.push(
                ctx.issue(
                    tool,
                    format!(
                        "Numeric parameter '{}' has no {}",
                        name,
                        missing.join(" or ")
                    ),
                )
                .at(node.pointer.clone()),
            );
        }
    });
    Ok(issues)
}

/// SEC-006: object schemas reject unexpected keys.
pub fn check_additional_properties(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let mut issues = Vec::new();
    walk_schema(&tool.input_schema, |node| {
        if node.properties().is_none_or(|props| props.is_empty()) {
            return;
        }
        if node.schema.get("additionalProperties") == Some(&Value::Bool(false)) {
            return;
        }

        let label = node
            .property
            .map(|name| format!("Object parameter '{}'", name))
            .unwrap_or_else(|| "Object schema".to_string());
        issues.push(
            ctx.issue(tool, format!("{} accepts undeclared properties", label))
                .at(node.pointer.clone())
                .with_suggestion("Set \"additionalProperties\": false"),
        );
    });
    Ok(issues)
}
