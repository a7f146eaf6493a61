//! Human-readable reporter.

use colored::{ColoredString, Colorize};
use std::fmt::Write;
use toolvet_core::{
    MaturityLevel, Severity, ToolReport, ValidationIssue, ValidationResult,
};
use toolvet_rules::RULES_DATA;

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow().bold(),
        Severity::Suggestion => "suggestion".cyan(),
    }
}

fn maturity_label(level: MaturityLevel) -> ColoredString {
    let label = level.as_str();
    match level {
        MaturityLevel::Exemplary => label.green().bold(),
        MaturityLevel::Mature => label.green(),
        MaturityLevel::Moderate => label.yellow(),
        MaturityLevel::Immature => label.red(),
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

fn write_issue(out: &mut String, issue: &ValidationIssue) {
    let _ = write!(
        out,
        "    {} {} {}",
        severity_label(issue.severity),
        issue.id.dimmed(),
        issue.message
    );
    if let Some(path) = &issue.path {
        let _ = write!(out, " {}", format!("at {}", path).dimmed());
    }
    out.push('\n');
    if let Some(suggestion) = &issue.suggestion {
        let _ = writeln!(out, "      {} {}", "help:".bold(), suggestion);
    }
}

fn write_tool(out: &mut String, report: &ToolReport) {
    let marker = if report.valid {
        "✓".green()
    } else {
        "✗".red()
    };
    let _ = write!(out, "{} {}", marker, report.name.bold());
    if let Some(source) = &report.source {
        let _ = write!(out, " {}", format!("({})", source).dimmed());
    }
    out.push('\n');
    for issue in &report.issues {
        write_issue(out, issue);
    }
}

/// Per-tool blocks followed by the summary and maturity lines.
pub fn render_text(result: &ValidationResult) -> String {
    let mut out = String::new();
    for report in &result.tools {
        write_tool(&mut out, report);
    }
    if !result.tools.is_empty() {
        out.push('\n');
    }

    let summary = &result.summary;
    let _ = writeln!(
        out,
        "{}: {}, {} valid; {}, {}, {}",
        "Summary".bold(),
        plural(summary.total_tools, "tool"),
        summary.valid_tools,
        plural(result.count(Severity::Error), "error"),
        plural(result.count(Severity::Warning), "warning"),
        plural(result.count(Severity::Suggestion), "suggestion"),
    );
    let _ = writeln!(
        out,
        "{}: {}/100 ({})",
        "Maturity".bold(),
        summary.maturity_score,
        maturity_label(summary.maturity_level)
    );
    out
}

/// One line per catalogued rule: id, default severity, category and title.
pub fn render_rule_list() -> String {
    let mut out = String::new();
    for rule in RULES_DATA {
        let severity = Severity::parse(rule.default_severity)
            .map_or_else(|| rule.default_severity.normal(), severity_label);
        let _ = writeln!(
            out,
            "{:<9} {:<21} {:<18} {}",
            rule.id.bold(),
            severity,
            rule.category,
            rule.name
        );
    }
    out
}
