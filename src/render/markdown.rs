//! GitHub-flavored markdown renderer.
//!
//! Descriptions are emitted verbatim; only the structured fields get
//! markdown formatting.

use crate::model::*;
use crate::render::Renderer;
use crate::toc::{self, Slugger};
use anyhow::Result;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, patterns: &[Pattern]) -> Result<String> {
        let mut output = String::new();
        if patterns.is_empty() {
            return Ok(output);
        }

        // Anchors depend on every heading before them, index included
        let mut slugger = Slugger::default();
        slugger.slug("Index");
        let sections: Vec<(String, String)> = patterns
            .iter()
            .map(|pattern| render_pattern(pattern, &mut slugger))
            .collect();

        output.push_str("## Index\n\n");
        for (pattern, (anchor, _)) in patterns.iter().zip(&sections) {
            output.push_str(&toc::render_toc_item(&pattern.name, anchor));
            output.push('\n');
        }
        output.push('\n');

        for (_, section) in &sections {
            output.push_str(section);
            output.push('\n');
        }

        Ok(output)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// Render a single pattern's documentation block, returning its anchor too.
fn render_pattern(pattern: &Pattern, slugger: &mut Slugger) -> (String, String) {
    let mut lines: Vec<String> = Vec::new();

    let anchor = heading(&mut lines, slugger, 3, &pattern.name);

    if !pattern.title.is_empty() {
        lines.push(format!("_{}_\n", pattern.title));
    }

    let badges = render_badges(&pattern.meta);
    if !badges.is_empty() {
        lines.push(badges);
        lines.push(String::new());
    }

    if let Some(ref deprecated) = pattern.meta.deprecated {
        lines.push(format!("**Deprecated:** {}\n", deprecated));
    }

    let description = pattern.description.trim_matches('\n');
    if !description.is_empty() {
        lines.push(description.to_string());
        lines.push(String::new());
    }

    if !pattern.parameters.is_empty() {
        heading(&mut lines, slugger, 4, "Parameters");
        for param in &pattern.parameters {
            lines.push(format!("* {}", render_param(param)));
        }
        lines.push(String::new());
    }

    if !pattern.examples.is_empty() {
        heading(&mut lines, slugger, 4, "Examples");
        for example in &pattern.examples {
            render_example(&mut lines, slugger, example);
        }
    }

    if !pattern.meta.todos.is_empty() {
        heading(&mut lines, slugger, 4, "Todo");
        for todo in &pattern.meta.todos {
            lines.push(format!("* {}", todo));
        }
        lines.push(String::new());
    }

    (anchor, lines.join("\n"))
}

/// Push a heading and claim its anchor.
fn heading(lines: &mut Vec<String>, slugger: &mut Slugger, level: usize, text: &str) -> String {
    lines.push(format!("{} {}\n", "#".repeat(level), text));
    slugger.slug(text)
}

/// `{String} [label=OK] - Text` → `**label** (String, optional, default: `OK`): Text`
fn render_param(param: &Parameter) -> String {
    let mut details: Vec<String> = Vec::new();
    if !param.ty.is_empty() {
        details.push(param.ty.clone());
    }
    if !param.required {
        details.push("optional".to_string());
    }
    if let Some(ref default) = param.default_value {
        details.push(format!("default: `{}`", default));
    }

    let mut out = format!("**{}**", param.name);
    if !details.is_empty() {
        out.push_str(&format!(" ({})", details.join(", ")));
    }
    if !param.description.is_empty() {
        out.push_str(&format!(": {}", param.description));
    }
    out
}

fn render_example(lines: &mut Vec<String>, slugger: &mut Slugger, example: &Example) {
    if !example.description.is_empty() {
        heading(lines, slugger, 5, &example.description);
    }
    if let Some(height) = example.height {
        lines.push(format!("_Preview height: {}px_\n", height));
    }
    for block in &example.code_blocks {
        lines.push(format!("```{}", block.syntax.as_deref().unwrap_or("")));
        lines.push(block.code.clone());
        lines.push("```".to_string());
        lines.push(String::new());
    }
}

/// Render free-form `@meta` entries as badges.
///
/// Output: `> `category: Forms` `version: 1.0``
fn render_badges(meta: &Meta) -> String {
    let badges: Vec<String> = meta
        .entries
        .iter()
        .map(|(key, value)| {
            if value.is_empty() {
                format!("`{}`", key)
            } else {
                format!("`{}: {}`", key, value)
            }
        })
        .collect();

    if badges.is_empty() {
        return String::new();
    }

    format!("> {}", badges.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, ty: &str, required: bool, default: Option<&str>, desc: &str) -> Parameter {
        Parameter {
            name: name.to_string(),
            ty: ty.to_string(),
            required,
            default_value: default.map(String::from),
            description: desc.to_string(),
        }
    }

    #[test]
    fn required_param() {
        assert_eq!(
            render_param(&param("size", "Number", true, None, "Pixel size")),
            "**size** (Number): Pixel size"
        );
    }

    #[test]
    fn optional_param_with_default() {
        assert_eq!(
            render_param(&param("label", "String", false, Some("OK"), "Text")),
            "**label** (String, optional, default: `OK`): Text"
        );
    }

    #[test]
    fn bare_param() {
        assert_eq!(render_param(&param("x", "", true, None, "")), "**x**");
    }

    #[test]
    fn badges_from_meta() {
        let mut meta = Meta::default();
        meta.entries.insert("version".to_string(), "1.0".to_string());
        meta.entries.insert("beta".to_string(), String::new());
        assert_eq!(render_badges(&meta), "> `beta` `version: 1.0`");
        assert_eq!(render_badges(&Meta::default()), "");
    }

    #[test]
    fn description_is_verbatim() {
        let pattern = Pattern {
            name: "Card".to_string(),
            description: "\nIntro.\n\nHeading\n-------\n* item\n\n".to_string(),
            ..Default::default()
        };
        let (_, out) = render_pattern(&pattern, &mut Slugger::default());
        assert!(out.contains("Intro.\n\nHeading\n-------\n* item\n"));
    }

    #[test]
    fn full_document() {
        let pattern = Pattern {
            name: "Button".to_string(),
            title: "A button".to_string(),
            examples: vec![Example {
                description: "Basic".to_string(),
                height: None,
                code_blocks: vec![CodeBlock {
                    syntax: Some("html".to_string()),
                    code: "<x-button></x-button>".to_string(),
                }],
            }],
            ..Default::default()
        };
        let out = MarkdownRenderer.render(&[pattern]).unwrap();
        assert_eq!(
            out,
            "## Index\n\n\
             * [Button](#button)\n\n\
             ### Button\n\n\
             _A button_\n\n\
             #### Examples\n\n\
             ##### Basic\n\n\
             ```html\n\
             <x-button></x-button>\n\
             ```\n\n"
        );
    }

    #[test]
    fn repeated_names_get_distinct_anchors() {
        let named = |name: &str| Pattern {
            name: name.to_string(),
            ..Default::default()
        };
        let out = MarkdownRenderer
            .render(&[named("Button"), named("Button"), named("Examples")])
            .unwrap();
        assert!(out.starts_with(
            "## Index\n\n\
             * [Button](#button)\n\
             * [Button](#button-1)\n\
             * [Examples](#examples)\n\n"
        ));
    }

    #[test]
    fn anchors_count_earlier_subheadings() {
        let button = Pattern {
            name: "Button".to_string(),
            examples: vec![Example::default()],
            ..Default::default()
        };
        let examples = Pattern {
            name: "Examples".to_string(),
            ..Default::default()
        };
        let out = MarkdownRenderer.render(&[button, examples]).unwrap();
        assert!(out.contains("* [Examples](#examples-1)\n"));
    }

    #[test]
    fn empty_list_renders_nothing() {
        assert_eq!(MarkdownRenderer.render(&[]).unwrap(), "");
    }
}
