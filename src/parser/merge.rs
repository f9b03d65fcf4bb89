//! Group parsed files by module name.
//!
//! A component is often documented across a stylesheet and a script that
//! share a stem (`button.css`, `button.js`); those land in one output
//! document, in input order.

use crate::model::Pattern;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::warn;

/// Merge per-file pattern lists into one list per module name.
///
/// Input order is preserved within a group; groups come out sorted by name.
pub fn merge(docs: Vec<(String, Vec<Pattern>)>) -> Vec<(String, Vec<Pattern>)> {
    let mut groups: BTreeMap<String, Vec<(String, Vec<Pattern>)>> = BTreeMap::new();

    for (source_file, patterns) in docs {
        groups
            .entry(module_name(&source_file))
            .or_default()
            .push((source_file, patterns));
    }

    groups
        .into_iter()
        .map(|(name, members)| {
            warn_duplicates(&name, &members);
            let patterns = members.into_iter().flat_map(|(_, p)| p).collect();
            (name, patterns)
        })
        .collect()
}

/// Derive the module name from a source path.
/// "src/components/button.css" → "button", "button.module.scss" → "button.module"
pub fn module_name(source: &str) -> String {
    Path::new(source)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| source.to_string())
}

/// Report pattern names declared by more than one file of a group.
fn warn_duplicates(module: &str, members: &[(String, Vec<Pattern>)]) {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (source, patterns) in members {
        for pattern in patterns {
            match seen.get(pattern.name.as_str()) {
                Some(first) if *first != source.as_str() => warn!(
                    module,
                    pattern = %pattern.name,
                    first = %first,
                    again = %source,
                    "pattern documented in more than one file"
                ),
                Some(_) => {}
                None => {
                    seen.insert(&pattern.name, source);
                }
            }
        }
    }
}
