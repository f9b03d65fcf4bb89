//! Payload grammars for individual tags and code fences.
//!
//! Every parser here is best-effort: input it cannot make sense of is kept as
//! literal text in the most plausible field rather than rejected.

use crate::model::{CodeBlock, Parameter};
use regex::Regex;
use std::sync::LazyLock;

/// "```" optionally followed by a syntax name, nothing else.
static RE_FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```([^\s`]+)?\s*$").unwrap());

static RE_LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+").unwrap());

/// Returns `Some(syntax)` if the line opens a fence.
pub fn fence_open(line: &str) -> Option<Option<&str>> {
    let caps = RE_FENCE_OPEN.captures(line)?;
    Some(caps.get(1).map(|m| m.as_str()))
}

pub fn is_fence_close(line: &str) -> bool {
    line.trim_end() == "```"
}

/// Build a code block from the lines between the fences.
pub fn code_block(syntax: Option<&str>, lines: &[&str]) -> CodeBlock {
    CodeBlock {
        syntax: syntax.map(str::to_string),
        code: lines.join("\n").trim().to_string(),
    }
}

/// Parse `@param {Type} name - description` and its optional forms
/// `[name]` and `[name=default]`.
pub fn parse_param(payload: &str) -> Parameter {
    let text = payload.trim();

    let (ty, rest) = match text.strip_prefix('{').and_then(|s| s.split_once('}')) {
        Some((ty, rest)) => (ty.to_string(), rest.trim_start()),
        None => (String::new(), text),
    };

    let bracketed = rest
        .strip_prefix('[')
        .and_then(|s| s.split_once(']'));

    let (name, default_value, required, after) = match bracketed {
        Some((inner, after)) => match inner.split_once('=') {
            Some((name, default)) => (
                name.trim().to_string(),
                Some(default.to_string()),
                false,
                after,
            ),
            None => (inner.trim().to_string(), None, false, after),
        },
        None => {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            (rest[..end].to_string(), None, true, &rest[end..])
        }
    };

    let description = after
        .find(" - ")
        .map(|i| after[i + 3..].trim().to_string())
        .unwrap_or_default();

    Parameter {
        name,
        ty,
        required,
        default_value,
        description,
    }
}

/// Parse `@meta key value` or `@meta key - value`.
///
/// Returns `None` for an empty payload.
pub fn parse_meta(payload: &str) -> Option<(String, String)> {
    let text = payload.trim();
    if text.is_empty() {
        return None;
    }
    let (key, rest) = text
        .split_once(char::is_whitespace)
        .unwrap_or((text, ""));
    let rest = rest.trim();
    let value = match rest.strip_prefix("- ") {
        Some(value) => value.trim_start(),
        None if rest == "-" => "",
        None => rest,
    };
    Some((key.to_string(), value.to_string()))
}

/// Parse `@exampleHeight` the way `parseInt` would: leading digits only.
pub fn parse_height(payload: &str) -> Option<u32> {
    RE_LEADING_INT
        .find(payload.trim())
        .and_then(|m| m.as_str().parse().ok())
}

/// The tag-line remainder, without any continuation lines.
pub fn first_line(payload: &str) -> &str {
    payload.lines().next().unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fence_open_variants() {
        assert_eq!(fence_open("```"), Some(None));
        assert_eq!(fence_open("```html"), Some(Some("html")));
        assert_eq!(fence_open("```js  "), Some(Some("js")));
        assert_eq!(fence_open("``` html"), None);
        assert_eq!(fence_open("```js extra"), None);
        assert_eq!(fence_open("  ```"), None);
        assert_eq!(fence_open("``"), None);
    }

    #[test]
    fn fence_close_requires_bare_backticks() {
        assert!(is_fence_close("```"));
        assert!(is_fence_close("``` "));
        assert!(!is_fence_close("```js"));
        assert!(!is_fence_close(" ```"));
    }

    #[test]
    fn code_block_trims_outer_whitespace_only() {
        let block = code_block(Some("html"), &["", "\t<a", "\t\thref=\"x\"", "></a>", ""]);
        assert_eq!(block.syntax.as_deref(), Some("html"));
        assert_eq!(block.code, "<a\n\t\thref=\"x\"\n></a>");
    }

    #[test]
    fn required_param() {
        let p = parse_param("{Number} paramA - Required parameter");
        assert_eq!(p.name, "paramA");
        assert_eq!(p.ty, "Number");
        assert!(p.required);
        assert_eq!(p.default_value, None);
        assert_eq!(p.description, "Required parameter");
    }

    #[test]
    fn optional_param() {
        let p = parse_param("{Object} [paramB] - Optional parameter");
        assert_eq!(p.name, "paramB");
        assert_eq!(p.ty, "Object");
        assert!(!p.required);
        assert_eq!(p.default_value, None);
        assert_eq!(p.description, "Optional parameter");
    }

    #[test]
    fn optional_param_with_default() {
        let p = parse_param("{String} [paramC=some default] - With a default");
        assert_eq!(p.name, "paramC");
        assert!(!p.required);
        assert_eq!(p.default_value.as_deref(), Some("some default"));
        assert_eq!(p.description, "With a default");
    }

    #[test]
    fn empty_default_is_still_a_default() {
        let p = parse_param("[flag=]");
        assert_eq!(p.name, "flag");
        assert_eq!(p.default_value.as_deref(), Some(""));
    }

    #[test]
    fn param_without_type_or_description() {
        let p = parse_param("size");
        assert_eq!(p.name, "size");
        assert_eq!(p.ty, "");
        assert!(p.required);
        assert_eq!(p.description, "");
    }

    #[test]
    fn description_splits_on_first_separator() {
        let p = parse_param("{String} range - from - to");
        assert_eq!(p.description, "from - to");
    }

    #[test]
    fn unclosed_type_is_literal() {
        let p = parse_param("{Number value - desc");
        assert_eq!(p.ty, "");
        assert_eq!(p.name, "{Number");
        assert_eq!(p.description, "desc");
    }

    #[test]
    fn meta_space_separator() {
        assert_eq!(
            parse_meta("category Foos & Bars"),
            Some(("category".to_string(), "Foos & Bars".to_string()))
        );
    }

    #[test]
    fn meta_dash_separator() {
        assert_eq!(
            parse_meta("version - 0.2.4"),
            Some(("version".to_string(), "0.2.4".to_string()))
        );
        assert_eq!(parse_meta("version - 0.2.4"), parse_meta("version 0.2.4"));
    }

    #[test]
    fn meta_key_only() {
        assert_eq!(parse_meta("beta"), Some(("beta".to_string(), String::new())));
        assert_eq!(parse_meta("   "), None);
    }

    #[test]
    fn height_like_parse_int() {
        assert_eq!(parse_height("300\n"), Some(300));
        assert_eq!(parse_height(" 250px"), Some(250));
        assert_eq!(parse_height("tall"), None);
        assert_eq!(parse_height(""), None);
    }

    #[test]
    fn first_line_only() {
        assert_eq!(first_line("Basic usage \n\nmore"), "Basic usage");
        assert_eq!(first_line("\n"), "");
        assert_eq!(first_line(""), "");
    }
}
