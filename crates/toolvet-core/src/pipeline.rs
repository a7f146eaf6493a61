//! Validation pipeline: tools in, report out.

use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{ValidationSummary, aggregate, flatten, is_tool_valid};
use crate::config::ValidatorConfig;
use crate::diagnostics::{Severity, ValidationIssue};
use crate::engine::execute;
use crate::registry::RuleRegistry;
use crate::tool::{ToolDefinition, ToolOrigin};

/// Tool protocol revision the built-in rules are written against.
pub const SPEC_VERSION: &str = "2025-06-18";

/// Per-tool slice of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolReport {
    pub name: String,
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
    pub tool: ToolDefinition,
    /// File path or server the tool came from, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMetadata {
    /// Version of the validator that produced the report.
    pub version: String,
    pub spec_version: String,
    /// RFC 3339 time the run finished.
    pub timestamp: String,
    pub duration_ms: u64,
    pub config_source: String,
    pub llm_analysis: bool,
}

/// Complete outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// `true` when no issue has error severity.
    pub valid: bool,
    pub summary: ValidationSummary,
    /// Every issue, tool-major then in rule registration order.
    pub issues: Vec<ValidationIssue>,
    pub tools: Vec<ToolReport>,
    pub metadata: ValidationMetadata,
}

impl ValidationResult {
    pub fn count(&self, severity: Severity) -> usize {
        self.summary.issues_by_severity.get(severity)
    }

    /// Whether the run should fail a CI gate. With `strict`, warnings fail too.
    pub fn fails(&self, strict: bool) -> bool {
        !self.valid || (strict && self.count(Severity::Warning) > 0)
    }
}

/// Validate `tools` with the built-in rules.
pub fn validate_tools(tools: &[ToolDefinition], config: &ValidatorConfig) -> ValidationResult {
    validate_tools_with_registry(tools, config, &RuleRegistry::with_defaults())
}

/// Validate `tools` with the rules of a custom registry.
///
/// Only rules present in the resolved rule table run; see
/// [`RuleRegistry::load_configured`].
pub fn validate_tools_with_registry(
    tools: &[ToolDefinition],
    config: &ValidatorConfig,
    registry: &RuleRegistry,
) -> ValidationResult {
    let started = Instant::now();
    let rules = registry.load_configured(config.rules());
    tracing::debug!(
        rules = rules.len(),
        tools = tools.len(),
        "starting validation"
    );

    let per_tool = execute(tools, &rules, config.rules());
    let summary = aggregate(&per_tool);
    let issues = flatten(&per_tool);

    let reports: Vec<ToolReport> = tools
        .iter()
        .zip(per_tool)
        .map(|(tool, issues)| ToolReport {
            name: tool.name.clone(),
            valid: is_tool_valid(&issues),
            issues,
            tool: tool.clone(),
            source: match &tool.source.origin {
                ToolOrigin::Inline => None,
                origin => Some(origin.to_string()),
            },
        })
        .collect();

    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let valid = summary.issues_by_severity.error == 0;

    tracing::info!(
        tools = summary.total_tools,
        valid_tools = summary.valid_tools,
        issues = issues.len(),
        score = summary.maturity_score,
        duration_ms,
        "validation complete"
    );

    ValidationResult {
        valid,
        summary,
        issues,
        tools: reports,
        metadata: ValidationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            spec_version: SPEC_VERSION.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            duration_ms,
            config_source: config.source().to_string(),
            llm_analysis: false,
        },
    }
}
