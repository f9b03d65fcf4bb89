//! JSON renderer: structured output for site generators and tooling.
//!
//! Serializes the pattern model directly under a top-level `patterns` key.

use crate::model::Pattern;
use crate::render::Renderer;
use anyhow::{Context, Result};
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonDocument<'a> {
    patterns: &'a [Pattern],
}

impl Renderer for JsonRenderer {
    fn render(&self, patterns: &[Pattern]) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&JsonDocument { patterns })
            .context("failed to serialize patterns")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
