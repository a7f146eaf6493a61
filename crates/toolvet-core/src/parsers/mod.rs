//! Parsers turning tool documents into [`ToolDefinition`](crate::ToolDefinition)s.

pub mod tools;

pub use tools::{InputFormat, parse_tools, parse_tools_file};
