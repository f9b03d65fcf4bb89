//! Tag tokenizer: line-by-line lexer over a normalized comment body.
//!
//! A line that begins with `@` plus a known tag name opens a new token; any
//! other line is appended to the payload of the open token. Fenced code is
//! captured verbatim and emitted as its own token, in source order.

use super::fields;
use crate::model::CodeBlock;
use tracing::trace;

/// Recognized `@` tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Pattern,
    Title,
    Meta,
    Param,
    Todo,
    Deprecated,
    Description,
    Example,
    ExampleHeight,
}

impl Tag {
    pub fn from_name(name: &str) -> Option<Self> {
        let tag = match name {
            "pattern" => Tag::Pattern,
            "title" => Tag::Title,
            "meta" => Tag::Meta,
            "param" => Tag::Param,
            "todo" => Tag::Todo,
            "deprecated" => Tag::Deprecated,
            "description" => Tag::Description,
            "example" => Tag::Example,
            "exampleHeight" => Tag::ExampleHeight,
            _ => return None,
        };
        Some(tag)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tag::Pattern => "pattern",
            Tag::Title => "title",
            Tag::Meta => "meta",
            Tag::Param => "param",
            Tag::Todo => "todo",
            Tag::Deprecated => "deprecated",
            Tag::Description => "description",
            Tag::Example => "example",
            Tag::ExampleHeight => "exampleHeight",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A tag and everything up to the next tag, each line newline-terminated.
    Tag { tag: Tag, payload: String },
    Fence(CodeBlock),
}

/// An open fence. Inside a description it is copied into the payload instead.
struct OpenFence<'a> {
    syntax: Option<&'a str>,
    lines: Vec<&'a str>,
    literal: bool,
}

/// Split normalized lines into tag and fence tokens.
pub fn tokenize<'a>(lines: &[&'a str]) -> Vec<Token> {
    let mut tokens = Vec::new();
    // Index of the tag token that receives continuation lines
    let mut current: Option<usize> = None;
    let mut fence: Option<OpenFence<'a>> = None;

    for &line in lines {
        if let Some(open) = fence.as_mut() {
            if open.literal {
                append_line(&mut tokens, current, line);
            }
            if !fields::is_fence_close(line) {
                if !open.literal {
                    open.lines.push(line);
                }
                continue;
            }
            if let Some(open) = fence.take() {
                if !open.literal {
                    tokens.push(Token::Fence(fields::code_block(open.syntax, &open.lines)));
                }
            }
            continue;
        }

        if let Some((tag, rest)) = tag_start(line) {
            let mut payload = String::with_capacity(rest.len() + 1);
            payload.push_str(rest);
            payload.push('\n');
            tokens.push(Token::Tag { tag, payload });
            current = Some(tokens.len() - 1);
            continue;
        }

        if let Some(syntax) = fields::fence_open(line) {
            let literal = current_tag(&tokens, current) == Some(Tag::Description);
            if literal {
                append_line(&mut tokens, current, line);
            }
            fence = Some(OpenFence {
                syntax,
                lines: Vec::new(),
                literal,
            });
            continue;
        }

        if current.is_none() && !line.trim().is_empty() {
            trace!(line, "text before first tag ignored");
        }
        append_line(&mut tokens, current, line);
    }

    if let Some(open) = fence {
        trace!("unclosed code fence runs to end of comment");
        if !open.literal {
            tokens.push(Token::Fence(fields::code_block(open.syntax, &open.lines)));
        }
    }

    tokens
}

/// Recognize `@tag rest...` after optional indentation; the tag name must end
/// at whitespace or end of line.
fn tag_start(line: &str) -> Option<(Tag, &str)> {
    let after_at = line.trim_start_matches([' ', '\t']).strip_prefix('@')?;
    let name_len = after_at
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(after_at.len());
    let (name, rest) = after_at.split_at(name_len);
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let tag = Tag::from_name(name)?;
    Some((tag, rest.trim_start()))
}

fn current_tag(tokens: &[Token], current: Option<usize>) -> Option<Tag> {
    match tokens.get(current?) {
        Some(Token::Tag { tag, .. }) => Some(*tag),
        _ => None,
    }
}

fn append_line(tokens: &mut [Token], current: Option<usize>, line: &str) {
    let Some(index) = current else {
        return;
    };
    if let Some(Token::Tag { payload, .. }) = tokens.get_mut(index) {
        payload.push_str(line);
        payload.push('\n');
    }
}
