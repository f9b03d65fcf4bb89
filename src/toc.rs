//! GitHub-flavored markdown anchor/slug generation for the pattern index.

use std::collections::HashMap;

/// Generate a table-of-contents link to an already-computed anchor.
pub fn render_toc_link(text: &str, anchor: &str) -> String {
    format!("[{}](#{})", text, anchor)
}

/// Generate a TOC list item.
pub fn render_toc_item(name: &str, anchor: &str) -> String {
    format!("* {}", render_toc_link(name, anchor))
}

/// GitHub heading anchor slug generation.
///
/// - lowercase
/// - remove all chars that aren't alphanumeric, space, hyphen, or underscore
/// - replace spaces with hyphens
pub fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}

/// Hands out anchors in document order, suffixing repeats with `-1`, `-2`, ...
/// the way GitHub does for headings that share a slug.
#[derive(Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    pub fn slug(&mut self, text: &str) -> String {
        let base = github_slug(text);
        let mut slug = base.clone();
        while self.seen.contains_key(&slug) {
            let count = self.seen.entry(base.clone()).or_insert(0);
            *count += 1;
            slug = format!("{}-{}", base, count);
        }
        self.seen.insert(slug.clone(), 0);
        slug
    }
}
