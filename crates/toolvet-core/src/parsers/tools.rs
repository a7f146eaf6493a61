//! Tool document parser.
//!
//! Accepts a single tool object, a bare array of tools, an object with a
//! `tools` array, or a captured `tools/list` response
//! (`{"result": {"tools": [...]}}`), written as JSON or YAML.
//!
//! ## Security
//!
//! Files are read through [`safe_read_file`], which refuses symlinks,
//! non-regular files and anything over [`MAX_FILE_SIZE`](crate::file_utils::MAX_FILE_SIZE).

use serde_json::Value;
use std::path::Path;

use crate::diagnostics::ParseError;
use crate::file_utils::safe_read_file;
use crate::tool::{ToolDefinition, ToolOrigin, ToolSource};

/// Syntax of a tool document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    Json,
    Yaml,
    /// JSON when the content starts with `{` or `[`, YAML otherwise.
    #[default]
    Auto,
}

impl InputFormat {
    /// Format implied by a file extension.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => InputFormat::Json,
            Some("yaml" | "yml") => InputFormat::Yaml,
            _ => InputFormat::Auto,
        }
    }

    fn resolve(self, content: &str) -> Self {
        match self {
            InputFormat::Auto => {
                let trimmed = content.trim_start();
                if trimmed.starts_with('{') || trimmed.starts_with('[') {
                    InputFormat::Json
                } else {
                    InputFormat::Yaml
                }
            }
            explicit => explicit,
        }
    }
}

/// Parse every tool in a document.
///
/// Entries keep their order. The first malformed entry fails the whole
/// document with its index.
pub fn parse_tools(
    content: &str,
    format: InputFormat,
    origin: ToolOrigin,
) -> Result<Vec<ToolDefinition>, ParseError> {
    let document: Value = match format.resolve(content) {
        InputFormat::Yaml => serde_yaml::from_str(content).map_err(ParseError::Yaml)?,
        _ => serde_json::from_str(content).map_err(ParseError::Json)?,
    };

    tool_entries(document)?
        .into_iter()
        .enumerate()
        .map(|(index, raw)| parse_entry(index, raw, &origin))
        .collect()
}

/// Read and parse a tool document from disk.
pub fn parse_tools_file(path: &Path) -> Result<Vec<ToolDefinition>, ParseError> {
    let content = safe_read_file(path)?;
    let tools = parse_tools(
        &content,
        InputFormat::from_path(path),
        ToolOrigin::File(path.to_path_buf()),
    )?;
    tracing::debug!(path = %path.display(), count = tools.len(), "parsed tool definitions");
    Ok(tools)
}

fn tool_entries(document: Value) -> Result<Vec<Value>, ParseError> {
    match document {
        Value::Array(entries) => Ok(entries),
        Value::Object(mut map) => {
            if let Some(Value::Array(entries)) = map.remove("tools") {
                return Ok(entries);
            }
            if let Some(Value::Object(mut result)) = map.remove("result")
                && let Some(Value::Array(entries)) = result.remove("tools")
            {
                return Ok(entries);
            }
            if map.contains_key("name") {
                return Ok(vec![Value::Object(map)]);
            }
            Err(ParseError::UnrecognizedShape)
        }
        _ => Err(ParseError::UnrecognizedShape),
    }
}

fn parse_entry(index: usize, raw: Value, origin: &ToolOrigin) -> Result<ToolDefinition, ParseError> {
    let invalid = |message: &str| ParseError::InvalidTool {
        index,
        message: message.to_string(),
    };

    let Some(entry) = raw.as_object() else {
        return Err(invalid("expected an object"));
    };
    if !entry.get("name").is_some_and(Value::is_string) {
        return Err(invalid("missing string field 'name'"));
    }
    if !entry.contains_key("inputSchema") && !entry.contains_key("input_schema") {
        return Err(invalid("missing field 'inputSchema'"));
    }

    let tool: ToolDefinition =
        serde_json::from_value(raw.clone()).map_err(|e| invalid(&e.to_string()))?;
    Ok(tool.with_source(ToolSource::new(origin.clone(), raw)))
}
