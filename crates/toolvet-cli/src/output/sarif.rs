//! SARIF 2.1.0 reporter.

use serde::Serialize;
use toolvet_core::{Severity, ValidationIssue, ValidationResult};
use toolvet_rules::{RULES_DATA, RuleData};

const SARIF_SCHEMA: &str = "https://json.schemastore.org/sarif-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";

#[derive(Debug, Serialize)]
pub struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<Run>,
}

#[derive(Debug, Serialize)]
struct Run {
    tool: Tool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct Tool {
    driver: Driver,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Driver {
    name: &'static str,
    version: &'static str,
    information_uri: &'static str,
    rules: Vec<ReportingDescriptor>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportingDescriptor {
    id: &'static str,
    name: &'static str,
    short_description: Message,
    help_uri: String,
    default_configuration: DefaultConfiguration,
    properties: RuleProperties,
}

#[derive(Debug, Serialize)]
struct DefaultConfiguration {
    level: &'static str,
}

#[derive(Debug, Serialize)]
struct RuleProperties {
    category: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    level: &'static str,
    message: Message,
    locations: Vec<Location>,
}

#[derive(Debug, Serialize)]
struct Message {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    logical_locations: Vec<LogicalLocation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogicalLocation {
    fully_qualified_name: String,
    kind: &'static str,
}

fn level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Suggestion => "note",
    }
}

fn descriptor(rule: &RuleData) -> ReportingDescriptor {
    ReportingDescriptor {
        id: rule.id,
        name: rule.name,
        short_description: Message {
            text: rule.description.to_string(),
        },
        help_uri: toolvet_rules::documentation_url(rule.id),
        default_configuration: DefaultConfiguration {
            level: Severity::parse(rule.default_severity).map_or("warning", level),
        },
        properties: RuleProperties {
            category: rule.category,
        },
    }
}

fn sarif_result(issue: &ValidationIssue) -> SarifResult {
    let text = match &issue.suggestion {
        Some(suggestion) => format!("{} ({})", issue.message, suggestion),
        None => issue.message.clone(),
    };
    let location = match &issue.path {
        Some(path) => format!("{}{}", issue.tool, path),
        None => issue.tool.clone(),
    };

    SarifResult {
        rule_id: issue.id.clone(),
        level: level(issue.severity),
        message: Message { text },
        locations: vec![Location {
            logical_locations: vec![LogicalLocation {
                fully_qualified_name: location,
                kind: "member",
            }],
        }],
    }
}

/// Build a single-run SARIF log listing every catalogued rule.
pub fn to_sarif(result: &ValidationResult) -> SarifLog {
    SarifLog {
        schema: SARIF_SCHEMA,
        version: SARIF_VERSION,
        runs: vec![Run {
            tool: Tool {
                driver: Driver {
                    name: "toolvet",
                    version: env!("CARGO_PKG_VERSION"),
                    information_uri: toolvet_rules::DOCS_BASE_URL,
                    rules: RULES_DATA.iter().map(descriptor).collect(),
                },
            },
            results: result.issues.iter().map(sarif_result).collect(),
        }],
    }
}
