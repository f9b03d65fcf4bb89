//! Parser module: comment extraction through pattern assembly.

pub mod builder;
pub mod comment;
pub mod fields;
pub mod merge;
pub mod normalize;
pub mod token;

use crate::model::Pattern;
use anyhow::{anyhow, Result};
use std::path::Path;
use tracing::debug;

/// File extensions that can carry `/* ... */` pattern comments.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "css", "scss", "sass", "less", "js", "jsx", "ts", "tsx", "html",
];

/// Parse every `@pattern` comment in `input`, in source order.
pub fn parse(input: &str) -> Vec<Pattern> {
    let mut patterns = Vec::new();
    for body in comment::extract_bodies(input) {
        let lines = normalize::normalize(body);
        let tokens = token::tokenize(&lines);
        let found = builder::build(tokens);
        if found.is_empty() {
            debug!(lines = lines.len(), "comment without @pattern skipped");
        }
        patterns.extend(found);
    }
    patterns
}

/// Parse a source file, rejecting extensions that do not use block comments.
pub fn parse_file(path: &Path, content: &str) -> Result<Vec<Pattern>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext) => Ok(parse(content)),
        _ => Err(anyhow!("unsupported file type: {}", path.display())),
    }
}
