//! Data model for parsed pattern documentation: format-agnostic.

use serde::Serialize;
use std::collections::BTreeMap;

/// A single documented pattern, built from one `@pattern` comment block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    /// @pattern
    pub name: String,
    /// @title
    pub title: String,
    /// @description, verbatim including blank lines
    pub description: String,
    pub meta: Meta,
    /// @param entries in declaration order
    pub parameters: Vec<Parameter>,
    /// @example entries in declaration order
    pub examples: Vec<Example>,
}

/// Free-form `@meta` entries plus the reserved `todos` and `deprecated` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Meta {
    #[serde(flatten)]
    pub entries: BTreeMap<String, String>,
    /// @todo entries in encounter order
    pub todos: Vec<String>,
    /// @deprecated (last one wins)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

impl Meta {
    /// Look up a free-form `@meta` value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated.is_some()
    }
}

/// Parsed `@param` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    /// Content of the `{Type}` braces, empty if omitted
    #[serde(rename = "type")]
    pub ty: String,
    /// False when the name was written as `[name]` or `[name=default]`
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub description: String,
}

/// Parsed `@example` entry and the fenced blocks that follow it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub description: String,
    /// @exampleHeight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub code_blocks: Vec<CodeBlock>,
}

/// A fenced code block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Language tag after the opening fence, e.g. "html" in "```html"
    pub syntax: Option<String>,
    pub code: String,
}
