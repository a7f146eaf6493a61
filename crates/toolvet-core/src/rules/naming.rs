//! Naming convention rules (NAME-001 to NAME-006)

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use super::lexicon::find_abbreviations;
use super::{CheckResult, parameters};
use crate::engine::RuleContext;
use crate::tool::ToolDefinition;

/// Shortest tool name that is not flagged as too terse.
pub const MIN_NAME_LENGTH: usize = 3;

static VALID_NAME: OnceLock<Regex> = OnceLock::new();
static SNAKE_CASE: OnceLock<Regex> = OnceLock::new();
static KEBAB_CASE: OnceLock<Regex> = OnceLock::new();
static CAMEL_CASE: OnceLock<Regex> = OnceLock::new();
static PASCAL_CASE: OnceLock<Regex> = OnceLock::new();
static LOWER_CASE: OnceLock<Regex> = OnceLock::new();

fn valid_name_re() -> &'static Regex {
    VALID_NAME.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap())
}

/// Casing convention of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CaseStyle {
    Snake,
    Kebab,
    Camel,
    Pascal,
    /// A single lowercase word, compatible with snake, kebab and camel case.
    Lower,
    Other,
}

impl CaseStyle {
    pub fn detect(identifier: &str) -> Self {
        let checks: [(&OnceLock<Regex>, &str, CaseStyle); 5] = [
            (&LOWER_CASE, r"^[a-z][a-z0-9]*$", CaseStyle::Lower),
            (&SNAKE_CASE, r"^[a-z][a-z0-9]*(_[a-z0-9]+)+$", CaseStyle::Snake),
            (&KEBAB_CASE, r"^[a-z][a-z0-9]*(-[a-z0-9]+)+$", CaseStyle::Kebab),
            (&CAMEL_CASE, r"^[a-z][a-z0-9]*([A-Z][a-z0-9]*)+$", CaseStyle::Camel),
            (&PASCAL_CASE, r"^[A-Z][a-z0-9]+([A-Z][a-z0-9]*)*$", CaseStyle::Pascal),
        ];

        checks
            .iter()
            .find(|(cell, pattern, _)| {
                cell.get_or_init(|| Regex::new(pattern).unwrap())
                    .is_match(identifier)
            })
            .map_or(CaseStyle::Other, |(_, _, style)| *style)
    }

    /// Whether the style says anything about a naming convention.
    pub fn is_distinctive(self) -> bool {
        !matches!(self, CaseStyle::Lower | CaseStyle::Other)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CaseStyle::Snake => "snake_case",
            CaseStyle::Kebab => "kebab-case",
            CaseStyle::Camel => "camelCase",
            CaseStyle::Pascal => "PascalCase",
            CaseStyle::Lower => "lowercase",
            CaseStyle::Other => "mixed",
        }
    }
}

/// The distinctive style used by strictly more names than any other.
pub fn dominant_style<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<CaseStyle> {
    let mut counts: Vec<(CaseStyle, usize)> = Vec::new();
    for style in names.into_iter().map(CaseStyle::detect) {
        if !style.is_distinctive() {
            continue;
        }
        match counts.iter_mut().find(|(s, _)| *s == style) {
            Some((_, count)) => *count += 1,
            None => counts.push((style, 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    match counts.as_slice() {
        [] => None,
        [(style, _)] => Some(*style),
        [(style, top), (_, second), ..] if top > second => Some(*style),
        _ => None,
    }
}

/// NAME-001: tool names use a portable character set.
pub fn check_name_format(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    if valid_name_re().is_match(&tool.name) {
        return Ok(Vec::new());
    }

    let message = if tool.name.is_empty() {
        "Tool name is empty".to_string()
    } else {
        format!(
            "Tool name '{}' must be 1-64 letters, digits, '_' or '-'",
            tool.name
        )
    };
    Ok(vec![
        ctx.issue(tool, message)
            .at("/name")
            .with_suggestion("Rename the tool using only [A-Za-z0-9_-]"),
    ])
}

/// NAME-002
pub fn check_name_length(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let length = tool.name.chars().count();
    if length == 0 || length >= MIN_NAME_LENGTH {
        return Ok(Vec::new());
    }

    Ok(vec![
        ctx.issue(
            tool,
            format!(
                "Tool name '{}' is shorter than {} characters",
                tool.name, MIN_NAME_LENGTH
            ),
        )
        .at("/name")
        .with_suggestion("Use a descriptive verb_noun name such as 'search_users'"),
    ])
}

/// NAME-003: a tool follows the casing most of its siblings use.
pub fn check_name_casing_across_tools(
    tool: &ToolDefinition,
    ctx: &RuleContext<'_>,
) -> CheckResult {
    let style = CaseStyle::detect(&tool.name);
    if !style.is_distinctive() {
        return Ok(Vec::new());
    }

    let Some(dominant) = dominant_style(ctx.all_tools.iter().map(|t| t.name.as_str())) else {
        return Ok(Vec::new());
    };
    if style == dominant {
        return Ok(Vec::new());
    }

    Ok(vec![
        ctx.issue(
            tool,
            format!(
                "Tool name '{}' is {} but most tools use {}",
                tool.name,
                style.as_str(),
                dominant.as_str()
            ),
        )
        .at("/name"),
    ])
}

/// NAME-004: parameters of one tool share a casing style.
pub fn check_parameter_casing(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let styles: BTreeSet<CaseStyle> = parameters(tool)
        .map(|param| CaseStyle::detect(param.name))
        .filter(|style| style.is_distinctive())
        .collect();

    if styles.len() <= 1 {
        return Ok(Vec::new());
    }

    let names: Vec<&str> = styles.iter().map(|style| style.as_str()).collect();
    Ok(vec![
        ctx.issue(
            tool,
            format!("Parameter names mix casing styles: {}", names.join(", ")),
        )
        .at("/inputSchema/properties")
        .with_suggestion("Pick one casing style for every parameter"),
    ])
}

/// NAME-005: names spell words out.
pub fn check_abbreviations(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let mut issues = Vec::new();

    for (short, long) in find_abbreviations(&tool.name) {
        issues.push(
            ctx.issue(
                tool,
                format!("Tool name '{}' abbreviates '{}' as '{}'", tool.name, long, short),
            )
            .at("/name")
            .with_suggestion(format!("Spell out '{}'", long)),
        );
    }

    for param in parameters(tool) {
        for (short, long) in find_abbreviations(param.name) {
            issues.push(
                ctx.issue(
                    tool,
                    format!("Parameter '{}' abbreviates '{}' as '{}'", param.name, long, short),
                )
                .at(param.pointer())
                .with_suggestion(format!("Spell out '{}'", long)),
            );
        }
    }

    Ok(issues)
}

/// NAME-006: a name identifies one tool. The first occurrence is kept and
/// every later one is reported.
pub fn check_unique_names(tool: &ToolDefinition, ctx: &RuleContext<'_>) -> CheckResult {
    let earlier = ctx
        .all_tools
        .iter()
        .take_while(|other| !std::ptr::eq(*other, tool))
        .filter(|other| other.name == tool.name)
        .count();

    if earlier == 0 {
        return Ok(Vec::new());
    }

    Ok(vec![
        ctx.issue(
            tool,
            format!("Tool name '{}' is already used by an earlier tool", tool.name),
        )
        .at("/name")
        .with_suggestion("Give every tool a unique name"),
    ])
}
