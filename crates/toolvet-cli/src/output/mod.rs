//! Report rendering for the three output formats.

mod sarif;
mod text;

use anyhow::{Context, Result};
use toolvet_core::{OutputFormat, ValidationResult};

pub use sarif::to_sarif;
pub use text::{render_rule_list, render_text};

/// Render `result` in `format`.
pub fn render(result: &ValidationResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(result).context("failed to serialize JSON report")
        }
        OutputFormat::Sarif => serde_json::to_string_pretty(&to_sarif(result))
            .context("failed to serialize SARIF report"),
    }
}
