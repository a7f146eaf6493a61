//! Execution engine: runs every enabled rule against every tool.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::{RuleConfig, RuleSetting};
use crate::diagnostics::ValidationIssue;
use crate::registry::{Rule, RuleMeta};
use crate::tool::ToolDefinition;

/// What a rule sees besides the tool under inspection.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The complete input list, including the tool being checked.
    pub all_tools: &'a [ToolDefinition],
    /// This rule's resolved setting.
    pub rule_config: RuleSetting,
    /// Metadata of the rule being run.
    pub rule: RuleMeta,
}

impl RuleContext<'_> {
    /// Start an issue for `tool` attributed to the running rule.
    pub fn issue(&self, tool: &ToolDefinition, message: impl Into<String>) -> ValidationIssue {
        ValidationIssue::new(
            self.rule.id,
            self.rule.category,
            self.rule.default_severity,
            tool.name.clone(),
            message,
        )
        .with_documentation(self.rule.documentation())
    }

    /// Every tool except `tool` itself.
    pub fn other_tools<'t>(
        &'t self,
        tool: &'t ToolDefinition,
    ) -> impl Iterator<Item = &'t ToolDefinition> + 't {
        self.all_tools
            .iter()
            .filter(move |other| !std::ptr::eq(*other, tool))
    }
}

/// Run `rules` over `tools`, returning one issue list per tool in input order.
///
/// Within a tool, issues follow rule order and then emission order. Disabled
/// rules are skipped. Every issue gets the rule's effective severity.
pub fn execute(
    tools: &[ToolDefinition],
    rules: &[Rule],
    rule_config: &RuleConfig,
) -> Vec<Vec<ValidationIssue>> {
    #[cfg(feature = "parallel")]
    {
        tools
            .par_iter()
            .map(|tool| run_rules(tool, tools, rules, rule_config))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        tools
            .iter()
            .map(|tool| run_rules(tool, tools, rules, rule_config))
            .collect()
    }
}

/// Run every enabled rule against one tool.
pub fn run_rules(
    tool: &ToolDefinition,
    all_tools: &[ToolDefinition],
    rules: &[Rule],
    rule_config: &RuleConfig,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for rule in rules {
        let setting = rule_config.setting(rule.id());
        if !setting.is_enabled() {
            tracing::trace!(rule = rule.id(), tool = %tool.name, "rule disabled");
            continue;
        }

        let context = RuleContext {
            all_tools,
            rule_config: setting,
            rule: rule.meta,
        };
        let severity = setting.effective_severity(rule.default_severity());

        let raw = match (rule.check)(tool, &context) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(rule = rule.id(), tool = %tool.name, error = %e, "rule check failed");
                vec![
                    context
                        .issue(tool, format!("Rule {} failed: {}", rule.id(), e))
                        .with_suggestion("Report this tool definition to the validator maintainers"),
                ]
            }
        };

        tracing::trace!(rule = rule.id(), tool = %tool.name, count = raw.len(), "rule checked");
        issues.extend(raw.into_iter().map(|mut issue| {
            issue.severity = severity;
            issue
        }));
    }

    issues
}
