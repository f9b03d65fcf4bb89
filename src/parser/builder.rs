//! Pattern builder: folds a token stream into `Pattern` records.

use super::fields;
use super::token::{Tag, Token};
use crate::model::{Example, Pattern};
use tracing::{debug, trace};

/// Builder state. Tokens only take effect once a `@pattern` has been seen.
#[derive(Default)]
enum State {
    #[default]
    SeekingPattern,
    InPattern(Pattern),
}

struct Builder {
    state: State,
    patterns: Vec<Pattern>,
    /// Most recent tag token, used to route fences and `@exampleHeight`
    last_tag: Option<Tag>,
    /// Whether the token just before this one was the `@example` tag itself
    after_example: bool,
}

/// Assemble the tokens of one comment body into patterns.
pub fn build(tokens: Vec<Token>) -> Vec<Pattern> {
    let mut builder = Builder {
        state: State::default(),
        patterns: Vec::new(),
        last_tag: None,
        after_example: false,
    };

    for token in tokens {
        builder.feed(token);
    }
    builder.finish()
}

impl Builder {
    fn feed(&mut self, token: Token) {
        match token {
            Token::Tag { tag, payload } => {
                self.tag(tag, &payload);
                self.after_example = tag == Tag::Example;
                self.last_tag = Some(tag);
            }
            Token::Fence(block) => {
                self.after_example = false;
                let pattern = match &mut self.state {
                    State::InPattern(pattern) => pattern,
                    State::SeekingPattern => return,
                };
                match (self.last_tag, pattern.examples.last_mut()) {
                    (Some(Tag::Example | Tag::ExampleHeight), Some(example)) => {
                        example.code_blocks.push(block);
                    }
                    _ => debug!(
                        pattern = %pattern.name,
                        syntax = ?block.syntax,
                        "code fence outside an @example dropped"
                    ),
                }
            }
        }
    }

    fn tag(&mut self, tag: Tag, payload: &str) {
        if tag == Tag::Pattern {
            self.close();
            let name = fields::first_line(payload);
            if name.is_empty() {
                debug!("@pattern without a name ignored");
            } else {
                self.state = State::InPattern(Pattern {
                    name: name.to_string(),
                    ..Default::default()
                });
            }
            return;
        }

        let pattern = match &mut self.state {
            State::InPattern(pattern) => pattern,
            State::SeekingPattern => {
                trace!(tag = tag.name(), "tag before @pattern ignored");
                return;
            }
        };

        match tag {
            Tag::Pattern => unreachable!("handled above"),
            Tag::Title => pattern.title = fields::first_line(payload).to_string(),
            Tag::Description => pattern.description = payload.to_string(),
            Tag::Meta => match fields::parse_meta(payload) {
                Some((key, value)) if key == "todos" => pattern.meta.todos.push(value),
                Some((key, value)) if key == "deprecated" => {
                    pattern.meta.deprecated = Some(value);
                }
                Some((key, value)) => {
                    pattern.meta.entries.insert(key, value);
                }
                None => debug!(pattern = %pattern.name, "empty @meta ignored"),
            },
            Tag::Param => pattern.parameters.push(fields::parse_param(payload)),
            Tag::Todo => pattern.meta.todos.push(payload.trim().to_string()),
            Tag::Deprecated => pattern.meta.deprecated = Some(payload.trim().to_string()),
            Tag::Example => pattern.examples.push(Example {
                description: fields::first_line(payload).to_string(),
                ..Default::default()
            }),
            Tag::ExampleHeight => match pattern.examples.last_mut() {
                Some(example) if self.after_example => {
                    example.height = fields::parse_height(payload);
                }
                _ => debug!(
                    pattern = %pattern.name,
                    "@exampleHeight not directly after @example ignored"
                ),
            },
        }
    }

    /// Push the in-progress pattern, if any.
    fn close(&mut self) {
        if let State::InPattern(pattern) = std::mem::take(&mut self.state) {
            trace!(
                name = %pattern.name,
                params = pattern.parameters.len(),
                examples = pattern.examples.len(),
                "pattern complete"
            );
            self.patterns.push(pattern);
        }
    }

    fn finish(mut self) -> Vec<Pattern> {
        self.close();
        self.patterns
    }
}
