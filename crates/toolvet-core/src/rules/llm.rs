//! LLM-compatibility heuristics (LLM-001 to LLM-007)
//!
//! These rules judge how well a model can pick and fill in a tool from its
//! definition alone.

use super::lexicon::{AMBIGUOUS_TERMS, USAGE_GUIDANCE_PHRASES, find_terms};
use super::{CheckResult, is_blank, parameters};
use crate::engine::RuleContext;
use crate::tool::ToolDefinition;

pub const MIN_DESCRIPTION_LENGTH: usize = 20;
pub const MAX_DESCRIPTION_LENGTH: usize = 1024;
pub const MAX_PARAMETERS: usize = 10;

const DESCRIPTION_POINTER: &str = "/description";

/// LLM-001
pub fn check_description_present(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    if !tool.description.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![
        ctx.issue(tool, "Tool description is empty")
            .at(DESCRIPTION_POINTER)
            .with_suggestion("Describe what the tool does and when to use it"),
    ])
}

/// LLM-002: empty descriptions are left to LLM-001.
pub fn check_description_min_length(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let length = tool.description.trim().chars().count();
    if length == 0 || length >= MIN_DESCRIPTION_LENGTH {
        return Ok(Vec::new());
    }
    Ok(vec![
        ctx.issue(
            tool,
            format!(
                "Tool description is {} characters; at least {} are recommended",
                length, MIN_DESCRIPTION_LENGTH
            ),
        )
        .at(DESCRIPTION_POINTER),
    ])
}

/// LLM-003
pub fn check_description_max_length(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let length = tool.description.chars().count();
    if length <= MAX_DESCRIPTION_LENGTH {
        return Ok(Vec::new());
    }
    Ok(vec![
        ctx.issue(
            tool,
            format!(
                "Tool description is {} characters; keep it under {}",
                length, MAX_DESCRIPTION_LENGTH
            ),
        )
        .at(DESCRIPTION_POINTER)
        .with_suggestion("Move reference material out of the description"),
    ])
}

/// LLM-004: every parameter explains itself.
pub fn check_parameter_descriptions(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    Ok(parameters(tool)
        .filter(|param| is_blank(param.description()))
        .map(|param| {
            ctx.issue(
                tool,
                format!("Parameter '{}' has no description", param.name),
            )
            .at(param.pointer())
            .with_suggestion("Add a description with the expected format and an example")
        })
        .collect())
}

/// LLM-005
pub fn check_ambiguous_terms(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let terms = find_terms(&tool.description, AMBIGUOUS_TERMS);
    if terms.is_empty() {
        return Ok(Vec::new());
    }

    let quoted: Vec<String> = terms.iter().map(|term| format!("'{}'", term)).collect();
    Ok(vec![
        ctx.issue(
            tool,
            format!("Description uses vague wording: {}", quoted.join(", ")),
        )
        .at(DESCRIPTION_POINTER)
        .with_suggestion("Name the concrete inputs, outputs and effects instead"),
    ])
}

/// LLM-006: descriptions say when the tool is the right choice.
pub fn check_usage_guidance(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    if tool.description.trim().is_empty()
        || !find_terms(&tool.description, USAGE_GUIDANCE_PHRASES).is_empty()
    {
        return Ok(Vec::new());
    }
    Ok(vec![
        ctx.issue(tool, "Description does not say when to use the tool")
            .at(DESCRIPTION_POINTER)
            .with_suggestion("Add a sentence such as \"Use this when ...\""),
    ])
}

/// LLM-007
pub fn check_parameter_count(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let count = parameters(tool).count();
    if count <= MAX_PARAMETERS {
        return Ok(Vec::new());
    }
    Ok(vec![
        ctx.issue(
            tool,
            format!(
                "Tool takes {} parameters; more than {} makes calls error-prone",
                count, MAX_PARAMETERS
            ),
        )
        .at("/inputSchema/properties")
        .with_suggestion("Group related parameters into objects or split the tool"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSetting;
    use crate::diagnostics::ValidationIssue;
    use crate::registry::{RuleCheck, RuleMeta};
    use serde_json::{Value, json};

    fn run(id: &str, check: RuleCheck, tool: ToolDefinition) -> Vec<ValidationIssue> {
        let tools = [tool];
        let ctx = RuleContext {
            all_tools: &tools,
            rule_config: RuleSetting::EnabledDefault,
            rule: RuleMeta::from_catalog(id).unwrap(),
        };
        check(&tools[0], &ctx).unwrap()
    }

    fn described(description: &str) -> ToolDefinition {
        ToolDefinition::new("tool", description, json!({"type": "object"}))
    }

    #[test]
    fn test_llm_001_empty_description() {
        assert_eq!(run("LLM-001", check_description_present, described("")).len(), 1);
        assert_eq!(run("LLM-001", check_description_present, described("   ")).len(), 1);
        assert!(run("LLM-001", check_description_present, described("Finds users.")).is_empty());
    }

    #[test]
    fn test_llm_002_short_description() {
        assert!(run("LLM-002", check_description_min_length, described("")).is_empty());
        let issues = run("LLM-002", check_description_min_length, described("Finds users."));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("12 characters"));
        assert!(
            run(
                "LLM-002",
                check_description_min_length,
                described("Finds users matching filters.")
            )
            .is_empty()
        );
    }

    #[test]
    fn test_llm_003_long_description() {
        assert!(run("LLM-003", check_description_max_length, described(&"a".repeat(1024))).is_empty());
        assert_eq!(
            run("LLM-003", check_description_max_length, described(&"a".repeat(1025))).len(),
            1
        );
    }

    #[test]
    fn test_llm_004_parameter_descriptions() {
        let tool = ToolDefinition::new(
            "tool",
            "A tool.",
            json!({
                "type": "object",
                "properties": {
                    "a": {"type": "string", "description": "Documented"},
                    "b": {"type": "string"},
                    "c": {"type": "string", "description": " "}
                }
            }),
        );
        let issues = run("LLM-004", check_parameter_descriptions, tool);
        let paths: Vec<_> = issues.iter().filter_map(|i| i.path.as_deref()).collect();
        assert_eq!(paths, vec!["/inputSchema/properties/b", "/inputSchema/properties/c"]);
    }

    #[test]
    fn test_llm_005_ambiguous_terms() {
        let issues = run(
            "LLM-005",
            check_ambiguous_terms,
            described("Handles various account stuff."),
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Description uses vague wording: 'various', 'stuff'");
        assert!(run("LLM-005", check_ambiguous_terms, described("Finds users by name.")).is_empty());
    }

    #[test]
    fn test_llm_006_usage_guidance() {
        assert!(
            run(
                "LLM-006",
                check_usage_guidance,
                described("Finds users. Use this when searching by name.")
            )
            .is_empty()
        );
        assert_eq!(run("LLM-006", check_usage_guidance, described("Finds users.")).len(), 1);
        assert!(run("LLM-006", check_usage_guidance, described("")).is_empty());
    }

    #[test]
    fn test_llm_007_parameter_count() {
        let properties = |n: usize| -> serde_json::Map<String, Value> {
            (0..n)
                .map(|i| (format!("p{}", i), json!({"type": "string"})))
                .collect()
        };
        let ten = ToolDefinition::new(
            "tool",
            "A tool.",
            json!({"type": "object", "properties": properties(10)}),
        );
        assert!(run("LLM-007", check_parameter_count, ten).is_empty());

        let eleven = ToolDefinition::new(
            "tool",
            "A tool.",
            json!({"type": "object", "properties": properties(11)}),
        );
        let issues = run("LLM-007", check_parameter_count, eleven);
        assert!(issues[0].message.contains("11 parameters"));
    }
}
