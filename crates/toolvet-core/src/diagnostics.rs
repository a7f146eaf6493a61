//! Issue types, severities, categories and error reporting

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type ToolvetResult<T> = Result<T, ToolvetError>;

/// How serious an issue is.
///
/// Ordered from most to least severe so that sorting puts errors first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Suggestion,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Suggestion];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Suggestion => "suggestion",
        }
    }

    /// Parse a severity name, ignoring ASCII case.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|severity| value.eq_ignore_ascii_case(severity.as_str()))
    }

    /// Points deducted from a tool's maturity score per issue.
    pub fn penalty(self) -> u32 {
        match self {
            Severity::Error => 5,
            Severity::Warning => 2,
            Severity::Suggestion => 1,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule category. The serialized names are part of the report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Schema,
    Security,
    LlmCompatibility,
    Naming,
    BestPractice,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Schema,
        Category::Security,
        Category::LlmCompatibility,
        Category::Naming,
        Category::BestPractice,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Schema => "schema",
            Category::Security => "security",
            Category::LlmCompatibility => "llm-compatibility",
            Category::Naming => "naming",
            Category::BestPractice => "best-practice",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding reported against a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Id of the rule that produced this issue.
    pub id: String,
    pub category: Category,
    /// Effective severity, after config overrides.
    pub severity: Severity,
    pub message: String,
    /// Name of the tool the issue applies to.
    pub tool: String,
    /// JSON-pointer-like location inside the tool definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl ValidationIssue {
    pub fn new(
        id: impl Into<String>,
        category: Category,
        severity: Severity,
        tool: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            severity,
            message: message.into(),
            tool: tool.into(),
            path: None,
            suggestion: None,
            documentation: None,
        }
    }

    /// Attach a location inside the tool definition.
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_documentation(mut self, url: impl Into<String>) -> Self {
        self.documentation = Some(url.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Failure reading an input or config file from disk.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Failed to read file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to read symlink: {path}")]
    Symlink { path: PathBuf },

    #[error("File too large: {path} ({size} bytes, limit {limit} bytes)")]
    TooBig {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    #[error("Not a regular file: {path}")]
    NotRegular { path: PathBuf },
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("Invalid TOML in config {path}: {message}")]
    Toml { path: PathBuf, message: String },

    #[error("Invalid JSON in config {path}: {message}")]
    Json { path: PathBuf, message: String },

    #[error("Invalid YAML in config {path}: {message}")]
    Yaml { path: PathBuf, message: String },

    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },
}

/// Tool definition parsing errors.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("Invalid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[source] serde_yaml::Error),

    #[error(
        "Unrecognized tool document: expected a tool object, an array of tools, or an object with a 'tools' array"
    )]
    UnrecognizedShape,

    #[error("Invalid tool definition at index {index}: {message}")]
    InvalidTool { index: usize, message: String },
}

/// A rule that could not finish its check.
///
/// The engine records these as issues instead of aborting the run.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("failed to serialize schema: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Failed(String),
}

/// Top-level error type for the library.
#[derive(Error, Debug)]
pub enum ToolvetError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
