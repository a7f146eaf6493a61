//! toolvet - validate tool definitions from the command line.

mod cli;
mod output;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use toolvet_core::config::load_user_config;
use toolvet_core::{
    InputFormat, OutputFormat, ToolDefinition, ToolOrigin, ValidatorConfig, parse_tools,
    parse_tools_file, validate_tools,
};

const EXIT_FAILED: u8 = 1;
const EXIT_TOOLING: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::from(EXIT_TOOLING)
        }
    }
}

/// Log to stderr. `TOOLVET_LOG` takes an `EnvFilter` directive; `verbose`
/// (from `--verbose` or `[output] verbose`) forces debug.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("TOOLVET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.list_rules {
        init_tracing(cli.verbose);
        print!("{}", output::render_rule_list());
        return Ok(ExitCode::SUCCESS);
    }

    let config = resolve_config(cli)?;
    // `--verbose` is folded into the resolved output settings.
    init_tracing(config.output().verbose);
    tracing::debug!(source = %config.source(), "resolved config source");
    if !config.output().color {
        colored::control::set_override(false);
    }

    let tools = load_tools(&cli.paths)?;
    let result = validate_tools(&tools, &config);

    let rendered = output::render(&result, config.output().format)?;
    if config.output().format == OutputFormat::Text {
        print!("{}", rendered);
    } else {
        println!("{}", rendered);
    }

    if result.fails(cli.strict) {
        Ok(ExitCode::from(EXIT_FAILED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn resolve_config(cli: &Cli) -> Result<ValidatorConfig> {
    let start_dir = std::env::current_dir().context("failed to determine working directory")?;
    let (user, source) = load_user_config(cli.config.as_deref(), &start_dir)
        .context("failed to load configuration")?;

    let mut builder = ValidatorConfig::builder();
    builder
        .user_config(user)
        .source(source)
        .rule_overrides(&cli.rules);
    if let Some(format) = cli.format {
        builder.format(format.into());
    }
    if cli.verbose {
        builder.verbose(true);
    }
    if cli.no_color {
        builder.color(false);
    }
    Ok(builder.build())
}

fn load_tools(paths: &[PathBuf]) -> Result<Vec<ToolDefinition>> {
    if paths.is_empty() {
        bail!("no input files given");
    }

    let mut tools = Vec::new();
    for path in paths {
        if is_stdin(path) {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("failed to read standard input")?;
            tools.extend(
                parse_tools(&content, InputFormat::Auto, ToolOrigin::Inline)
                    .context("failed to parse standard input")?,
            );
        } else {
            tools.extend(
                parse_tools_file(path)
                    .with_context(|| format!("failed to load {}", path.display()))?,
            );
        }
    }
    Ok(tools)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}
