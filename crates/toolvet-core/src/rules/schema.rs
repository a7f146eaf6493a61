//! Schema correctness rules (SCH-001 to SCH-008)

use serde_json::Value;

use super::CheckResult;
use crate::engine::RuleContext;
use crate::schema_analysis::{
    MAX_NESTING_DEPTH, SCHEMA_POINTER, find_cross_tool_duplicates, find_sibling_duplicates,
    property_pointer, schema_depth, walk_schema,
};
use crate::tool::ToolDefinition;

/// Type names defined by JSON Schema.
pub const JSON_SCHEMA_TYPES: &[&str] = &[
    "string", "number", "integer", "boolean", "object", "array", "null",
];

/// Keywords that give a property a shape without an explicit `type`.
const TYPE_SUBSTITUTES: &[&str] = &["$ref", "oneOf", "anyOf", "allOf", "enum", "const", "not"];

/// SCH-001: the input schema root is an object schema.
pub fn check_object_root(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let Some(root) = tool.input_schema.as_object() else {
        return Ok(vec![
            ctx.issue(tool, "inputSchema must be a JSON object")
                .at(SCHEMA_POINTER)
                .with_suggestion(r#"Use {"type": "object", "properties": {...}}"#),
        ]);
    };

    let message = match root.get("type") {
        Some(Value::String(t)) if t == "object" => return Ok(Vec::new()),
        Some(other) => format!("inputSchema type must be \"object\", found {}", other),
        None => "inputSchema does not declare \"type\": \"object\"".to_string(),
    };

    Ok(vec![
        ctx.issue(tool, message)
            .at(format!("{}/type", SCHEMA_POINTER))
            .with_suggestion(r#"Set "type": "object" on the input schema root"#),
    ])
}

/// SCH-002: every property declares its type.
pub fn check_property_types(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let mut issues = Vec::new();
    walk_schema(&tool.input_schema, |node| {
        let Some(name) = node.property else {
            return;
        };
        let typed = node.schema.contains_key("type")
            || TYPE_SUBSTITUTES.iter().any(|key| node.schema.contains_key(*key));
        if !typed {
            issues.push(
                ctx.issue(tool, format!("Property '{}' does not declare a type", name))
                    .at(node.pointer.clone())
                    .with_suggestion("Add a \"type\" such as \"string\" or \"integer\""),
            );
        }
    });
    Ok(issues)
}

/// SCH-003: `required` is a list of names that exist in `properties`.
pub fn check_required_list(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let mut issues = Vec::new();
    walk_schema(&tool.input_schema, |node| {
        let Some(required) = node.schema.get("required") else {
            return;
        };
        let pointer = format!("{}/required", node.pointer);

        let Some(entries) = required.as_array() else {
            issues.push(
                ctx.issue(tool, "\"required\" must be an array of property names")
                    .at(pointer),
            );
            return;
        };

        let properties = node.properties();
        for (i, entry) in entries.iter().enumerate() {
            let Some(name) = entry.as_str() else {
                issues.push(
                    ctx.issue(tool, format!("\"required\" entry {} is not a string", entry))
                        .at(format!("{}/{}", pointer, i)),
                );
                continue;
            };
            if !properties.is_some_and(|props| props.contains_key(name)) {
                issues.push(
                    ctx.issue(
                        tool,
                        format!("Required property '{}' is not defined in properties", name),
                    )
                    .at(format!("{}/{}", pointer, i))
                    .with_suggestion(format!(
                        "Define '{}' under properties or remove it from required",
                        name
                    )),
                );
            }
        }
    });
    Ok(issues)
}

/// SCH-004: every `type` is a known JSON Schema type.
pub fn check_type_names(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let mut issues = Vec::new();
    walk_schema(&tool.input_schema, |node| {
        let Some(declared) = node.schema.get("type") else {
            return;
        };
        let pointer = format!("{}/type", node.pointer);

        let invalid: Vec<String> = match declared {
            Value::String(t) if JSON_SCHEMA_TYPES.contains(&t.as_str()) => Vec::new(),
            Value::Array(types) => types
                .iter()
                .filter(|t| !t.as_str().is_some_and(|t| JSON_SCHEMA_TYPES.contains(&t)))
                .map(Value::to_string)
                .collect(),
            other => vec![other.to_string()],
        };

        for value in invalid {
            issues.push(
                ctx.issue(tool, format!("Unknown type {}", value))
                    .at(pointer.clone())
                    .with_suggestion(format!("Use one of: {}", JSON_SCHEMA_TYPES.join(", "))),
            );
        }
    });
    Ok(issues)
}

/// SCH-005: array schemas say what they contain.
pub fn check_array_items(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let mut issues = Vec::new();
    walk_schema(&tool.input_schema, |node| {
        if node.has_type("array")
            && !node.schema.contains_key("items")
            && !node.schema.contains_key("prefixItems")
        {
            let label = node
                .property
                .map(|name| format!("Array property '{}'", name))
                .unwrap_or_else(|| "Array schema".to_string());
            issues.push(
                ctx.issue(tool, format!("{} does not declare items", label))
                    .at(node.pointer.clone())
                    .with_suggestion("Add an \"items\" schema describing the elements"),
            );
        }
    });
    Ok(issues)
}

/// SCH-006: `enum` is a non-empty array of distinct values.
pub fn check_enum_values(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let mut issues = Vec::new();
    walk_schema(&tool.input_schema, |node| {
        let Some(values) = node.schema.get("enum") else {
            return;
        };
        let pointer = format!("{}/enum", node.pointer);

        match values.as_array() {
            None => issues.push(ctx.issue(tool, "\"enum\" must be an array").at(pointer)),
            Some(values) if values.is_empty() => issues.push(
                ctx.issue(tool, "\"enum\" is empty, so no value can be valid")
                    .at(pointer),
            ),
            Some(values) => {
                let duplicate = values
                    .iter()
                    .enumerate()
                    .find(|(i, value)| values[..*i].contains(value));
                if let Some((_, value)) = duplicate {
                    issues.push(
                        ctx.issue(tool, format!("\"enum\" lists {} more than once", value))
                            .at(pointer),
                    );
                }
            }
        }
    });
    Ok(issues)
}

/// SCH-007: schemas stay shallow enough to fill in reliably.
pub fn check_nesting_depth(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let depth = schema_depth(&tool.input_schema);
    if depth <= MAX_NESTING_DEPTH {
        return Ok(Vec::new());
    }

    Ok(vec![
        ctx.issue(
            tool,
            format!(
                "Input schema is nested {} levels deep (maximum {})",
                depth, MAX_NESTING_DEPTH
            ),
        )
        .at(SCHEMA_POINTER)
        .with_suggestion("Flatten nested objects or split the tool"),
    ])
}

/// SCH-008: repeated structures within a tool or across the tool set.
pub fn check_duplicate_structures(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let mut issues = Vec::new();

    for duplicate in find_sibling_duplicates(tool)? {
        issues.push(
            ctx.issue(
                tool,
                format!(
                    "Property '{}' duplicates the structure of '{}'",
                    duplicate.property, duplicate.earlier
                ),
            )
            .at(property_pointer(&duplicate.property))
            .with_suggestion("Define the shared structure once under $defs and reference it"),
        );
    }

    for duplicate in find_cross_tool_duplicates(tool, ctx.all_tools)? {
        issues.push(
            ctx.issue(
                tool,
                format!(
                    "Property '{}' has the same structure as '{}' in tool '{}'",
                    duplicate.property, duplicate.other_property, duplicate.other_tool
                ),
            )
            .at(property_pointer(&duplicate.property))
            .with_suggestion("Keep shared structures identical on purpose, or share one definition"),
        );
    }

    Ok(issues)
}
