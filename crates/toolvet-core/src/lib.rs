//! # toolvet-core
//!
//! Rule engine for validating tool definitions: a name, a description and a
//! JSON-Schema-shaped input schema, as exposed by tool servers to language
//! models.
//!
//! Checks cover:
//! - Schema correctness (SCH-xxx)
//! - Naming conventions (NAME-xxx)
//! - Security posture (SEC-xxx)
//! - LLM-compatibility heuristics (LLM-xxx)
//! - Best-practice style (BP-xxx)
//!
//! ```
//! use serde_json::json;
//! use toolvet_core::{ToolDefinition, ValidatorConfig, validate_tools};
//!
//! let tool = ToolDefinition::new(
//!     "search-users",
//!     "Finds users matching filters. Use this when searching by name.",
//!     json!({"type": "object", "properties": {}}),
//! );
//! let result = validate_tools(&[tool], &ValidatorConfig::default());
//! assert!(result.valid);
//! ```

pub mod aggregate;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod file_utils;
pub mod parsers;
pub mod pipeline;
pub mod registry;
pub mod rules;
pub mod schema_analysis;
pub mod tool;

pub use aggregate::{CategoryCounts, MaturityLevel, SeverityCounts, ValidationSummary};
pub use config::{
    ConfigSource, OutputFormat, RuleConfig, RuleSetting, ValidatorConfig, ValidatorConfigBuilder,
};
pub use diagnostics::{
    Category, ConfigError, ParseError, ReadError, RuleError, Severity, ToolvetError,
    ToolvetResult, ValidationIssue,
};
pub use engine::{RuleContext, execute};
pub use parsers::{InputFormat, parse_tools, parse_tools_file};
pub use pipeline::{
    SPEC_VERSION, ToolReport, ValidationMetadata, ValidationResult, validate_tools,
    validate_tools_with_registry,
};
pub use registry::{Rule, RuleCheck, RuleMeta, RuleProvider, RuleRegistry, RuleRegistryBuilder};
pub use tool::{ToolAnnotations, ToolDefinition, ToolOrigin, ToolSource};
