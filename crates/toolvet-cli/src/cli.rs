//! Command-line arguments.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use toolvet_core::OutputFormat;

/// Validate tool definitions before they reach a language model
#[derive(Parser, Debug)]
#[command(name = "toolvet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Tool definition files (JSON or YAML). Use `-` to read standard input.
    #[arg(value_name = "PATHS", required_unless_present = "list_rules")]
    pub paths: Vec<PathBuf>,

    /// Config file to use instead of discovering one
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Override a rule setting, e.g. `--rule LLM-006=off` or `--rule SEC-001=error`
    #[arg(long = "rule", value_name = "ID=VALUE")]
    pub rules: Vec<String>,

    /// Treat warnings as failures
    #[arg(long)]
    pub strict: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print the rule catalog and exit
    #[arg(long)]
    pub list_rules: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_repeated_rule_flags() {
        let cli = Cli::parse_from([
            "toolvet",
            "tools.json",
            "--rule",
            "LLM-006=off",
            "--rule",
            "SEC-001=error",
        ]);
        assert_eq!(cli.rules, vec!["LLM-006=off", "SEC-001=error"]);
        assert_eq!(cli.paths, vec![PathBuf::from("tools.json")]);
    }

    #[test]
    fn test_paths_optional_with_list_rules() {
        let cli = Cli::parse_from(["toolvet", "--list-rules"]);
        assert!(cli.paths.is_empty());
        assert!(Cli::try_parse_from(["toolvet"]).is_err());
    }

    #[test]
    fn test_format_maps_to_output_format() {
        let cli = Cli::parse_from(["toolvet", "-", "--format", "sarif"]);
        assert_eq!(cli.format.map(OutputFormat::from), Some(OutputFormat::Sarif));
    }
}
