//! Reduction of per-tool issues into summary statistics and a maturity score.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Category, Severity, ValidationIssue};

/// Score given to a tool with no issues, and to an empty run.
pub const MAX_SCORE: u8 = 100;

/// Issue counts per category. Every category is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub schema: usize,
    pub security: usize,
    #[serde(rename = "llm-compatibility")]
    pub llm_compatibility: usize,
    pub naming: usize,
    #[serde(rename = "best-practice")]
    pub best_practice: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Schema => self.schema,
            Category::Security => self.security,
            Category::LlmCompatibility => self.llm_compatibility,
            Category::Naming => self.naming,
            Category::BestPractice => self.best_practice,
        }
    }

    fn bump(&mut self, category: Category) {
        let slot = match category {
            Category::Schema => &mut self.schema,
            Category::Security => &mut self.security,
            Category::LlmCompatibility => &mut self.llm_compatibility,
            Category::Naming => &mut self.naming,
            Category::BestPractice => &mut self.best_practice,
        };
        *slot += 1;
    }

    pub fn total(&self) -> usize {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Issue counts per severity. Every severity is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub error: usize,
    pub warning: usize,
    pub suggestion: usize,
}

impl SeverityCounts {
    pub fn from_issues<'a>(issues: impl IntoIterator<Item = &'a ValidationIssue>) -> Self {
        let mut counts = Self::default();
        for issue in issues {
            counts.bump(issue.severity);
        }
        counts
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Suggestion => self.suggestion,
        }
    }

    fn bump(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.error += 1,
            Severity::Warning => self.warning += 1,
            Severity::Suggestion => self.suggestion += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.error + self.warning + self.suggestion
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaturityLevel {
    Exemplary,
    Mature,
    Moderate,
    Immature,
}

impl MaturityLevel {
    /// Level for a 0-100 score.
    pub fn from_score(score: u8) -> Self {
        match score {
            91.. => MaturityLevel::Exemplary,
            71..=90 => MaturityLevel::Mature,
            41..=70 => MaturityLevel::Moderate,
            _ => MaturityLevel::Immature,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MaturityLevel::Exemplary => "exemplary",
            MaturityLevel::Mature => "mature",
            MaturityLevel::Moderate => "moderate",
            MaturityLevel::Immature => "immature",
        }
    }
}

impl std::fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total_tools: usize,
    pub valid_tools: usize,
    pub issues_by_category: CategoryCounts,
    pub issues_by_severity: SeverityCounts,
    pub maturity_score: u8,
    pub maturity_level: MaturityLevel,
}

/// A tool is valid when none of its issues is an error.
pub fn is_tool_valid(issues: &[ValidationIssue]) -> bool {
    !issues.iter().any(ValidationIssue::is_error)
}

/// Score for one tool: 100 minus the severity penalties, floored at 0.
pub fn tool_score(issues: &[ValidationIssue]) -> u8 {
    let penalty: u32 = issues.iter().map(|issue| issue.severity.penalty()).sum();
    u32::from(MAX_SCORE).saturating_sub(penalty) as u8
}

/// Summarize per-tool issue lists, given in tool order.
pub fn aggregate(per_tool: &[Vec<ValidationIssue>]) -> ValidationSummary {
    let mut by_category = CategoryCounts::default();
    let mut by_severity = SeverityCounts::default();
    let mut valid_tools = 0;
    let mut score_sum: u32 = 0;

    for issues in per_tool {
        for issue in issues {
            by_category.bump(issue.category);
            by_severity.bump(issue.severity);
        }
        if is_tool_valid(issues) {
            valid_tools += 1;
        }
        score_sum += u32::from(tool_score(issues));
    }

    let maturity_score = if per_tool.is_empty() {
        MAX_SCORE
    } else {
        (f64::from(score_sum) / per_tool.len() as f64).round() as u8
    };

    ValidationSummary {
        total_tools: per_tool.len(),
        valid_tools,
        issues_by_category: by_category,
        issues_by_severity: by_severity,
        maturity_score,
        maturity_level: MaturityLevel::from_score(maturity_score),
    }
}

/// Concatenate per-tool issue lists, preserving tool-major order.
pub fn flatten(per_tool: &[Vec<ValidationIssue>]) -> Vec<ValidationIssue> {
    per_tool.iter().flatten().cloned().collect()
}
