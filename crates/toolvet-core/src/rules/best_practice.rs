//! Best-practice style rules (BP-001 to BP-005)

use serde_json::Value;

use super::lexicon::{WORKFLOW_KEYWORDS, WORKFLOW_MARKER_THRESHOLD, find_terms};
use super::{CheckResult, parameters};
use crate::engine::RuleContext;
use crate::schema_analysis::SCHEMA_POINTER;
use crate::tool::{ToolAnnotations, ToolDefinition};

/// BP-001: schemas with parameters say which ones are required.
pub fn check_required_declared(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let has_parameters = tool.properties().is_some_and(|props| !props.is_empty());
    if !has_parameters || tool.input_schema.get("required").is_some() {
        return Ok(Vec::new());
    }
    Ok(vec![
        ctx.issue(tool, "Input schema does not declare which parameters are required")
            .at(SCHEMA_POINTER)
            .with_suggestion("Add a \"required\" array, empty if every parameter is optional"),
    ])
}

/// BP-002
pub fn check_annotations_present(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let declared = tool
        .annotations
        .as_ref()
        .is_some_and(|annotations| *annotations != ToolAnnotations::default());
    if declared {
        return Ok(Vec::new());
    }
    Ok(vec![
        ctx.issue(tool, "Tool declares no behavioral annotations")
            .at("/annotations")
            .with_suggestion("Set readOnlyHint, destructiveHint, idempotentHint and openWorldHint"),
    ])
}

/// BP-003: descriptions read as sentences.
pub fn check_description_format(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let description = tool.description.trim();
    let (Some(first), Some(last)) = (description.chars().next(), description.chars().last())
    else {
        return Ok(Vec::new());
    };

    let mut problems = Vec::new();
    if first.is_lowercase() {
        problems.push("start with an uppercase letter");
    }
    if !matches!(last, '.' | '!' | '?' | ')') {
        problems.push("end with punctuation");
    }
    if problems.is_empty() {
        return Ok(Vec::new());
    }

    Ok(vec![
        ctx.issue(
            tool,
            format!("Description should {}", problems.join(" and ")),
        )
        .at("/description"),
    ])
}

/// BP-004: one tool, one action. Descriptions that walk through steps usually
/// hide several tools.
pub fn check_workflow_description(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let markers = find_terms(&tool.description, WORKFLOW_KEYWORDS);
    if markers.len() < WORKFLOW_MARKER_THRESHOLD {
        return Ok(Vec::new());
    }

    Ok(vec![
        ctx.issue(
            tool,
            format!(
                "Description reads like a multi-step workflow ({})",
                markers.join(", ")
            ),
        )
        .at("/description")
        .with_suggestion("Split the steps into separate tools the model can sequence"),
    ])
}

/// BP-005
pub fn check_boolean_defaults(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let required = tool.required();
    Ok(parameters(tool)
        .filter(|param| param.schema.get("type").and_then(Value::as_str) == Some("boolean"))
        .filter(|param| !required.contains(&param.name))
        .filter(|param| param.schema.get("default").is_none())
        .map(|param| {
            ctx.issue(
                tool,
                format!("Optional boolean parameter '{}' has no default", param.name),
            )
            .at(param.pointer())
            .with_suggestion("Declare \"default\": false (or true) so omission is unambiguous")
        })
        .collect())
}
