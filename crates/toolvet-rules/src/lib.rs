//! Rule catalog for toolvet - tool definition validator.
//!
//! This crate provides the static metadata of every built-in rule. The check
//! functions live in `toolvet-core`; this catalog is what reporters and
//! external tooling (CI gates, SARIF rule tables) key off.
//!
//! # Usage
//!
//! ```
//! use toolvet_rules::RULES_DATA;
//!
//! for rule in RULES_DATA {
//!     println!("{} [{}]: {}", rule.id, rule.category, rule.name);
//! }
//! ```
//!
//! # Rule Categories
//!
//! - **SCH-xxx**: Schema correctness
//! - **NAME-xxx**: Naming conventions
//! - **SEC-xxx**: Security posture
//! - **LLM-xxx**: LLM compatibility heuristics
//! - **BP-xxx**: Best-practice style

/// Static metadata for one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleData {
    /// Stable identifier, `PREFIX-NNN`. Never renumbered.
    pub id: &'static str,
    /// Short human-readable title.
    pub name: &'static str,
    /// One of `schema`, `security`, `llm-compatibility`, `naming`, `best-practice`.
    pub category: &'static str,
    /// One of `error`, `warning`, `suggestion`.
    pub default_severity: &'static str,
    /// What the rule checks.
    pub description: &'static str,
}

// Include the auto-generated rules data from build.rs
include!(concat!(env!("OUT_DIR"), "/rules_data.rs"));

/// Rule id prefixes and the category each one belongs to.
pub const CATEGORY_PREFIXES: &[(&str, &str)] = &[
    ("SCH-", "schema"),
    ("SEC-", "security"),
    ("LLM-", "llm-compatibility"),
    ("NAME-", "naming"),
    ("BP-", "best-practice"),
];

/// Base URL for per-rule documentation pages.
pub const DOCS_BASE_URL: &str = "https://toolvet.dev/rules";

/// Returns the total number of rules.
pub fn rule_count() -> usize {
    RULES_DATA.len()
}

/// Looks up a rule by ID.
pub fn get_rule(id: &str) -> Option<&'static RuleData> {
    RULES_DATA.iter().find(|rule| rule.id == id)
}

/// Looks up a rule by ID, returning the name if found.
pub fn get_rule_name(id: &str) -> Option<&'static str> {
    get_rule(id).map(|rule| rule.name)
}

/// Documentation URL for a rule id.
pub fn documentation_url(id: &str) -> String {
    format!("{}/{}", DOCS_BASE_URL, id.to_ascii_lowercase())
}

/// Category implied by a rule id prefix.
pub fn category_for_id(id: &str) -> Option<&'static str> {
    CATEGORY_PREFIXES
        .iter()
        .find(|(prefix, _)| id.starts_with(prefix))
        .map(|(_, category)| *category)
}
